//! Midpoint-rule integration of `4 / (1 + x^2)`.
//!
//! Integrating over `[0, 1]` gives `atan(1) * 4 = π`.

/// The integrand. Takes values in `[2, 4]` on `[0, 1]`.
#[inline]
pub fn integrand(x: f64) -> f64 {
    4.0 / (1.0 + x * x)
}

/// Midpoint-rule approximation of the integral of [`integrand`] over `[start, end]`.
///
/// The caller guarantees `steps >= 1` and `start < end`. Sample points are computed as
/// `start + i * step_size + step_size / 2` so results match the reference arithmetic bit for bit.
pub fn partial_integral(start: f64, end: f64, steps: u64) -> f64 {
    let step_size = (end - start) / steps as f64;
    let mut sum = 0.0;
    for i in 0..steps {
        let x = start + i as f64 * step_size + step_size / 2.0;
        sum += integrand(x);
    }
    sum * step_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    #[test]
    fn integrand_range_on_unit_interval() {
        assert_eq!(integrand(0.0), 4.0);
        assert_eq!(integrand(1.0), 2.0);
        assert!((integrand(0.5) - 3.2).abs() < 1e-15);
    }

    #[test]
    fn single_step_samples_the_midpoint() {
        let expected = integrand(0.5);
        assert_eq!(partial_integral(0.0, 1.0, 1), expected);
    }

    #[test]
    fn whole_interval_converges_to_pi() {
        let approx = partial_integral(0.0, 1.0, 1_000_000);
        // midpoint error is about h^2 / 12 here; the rest is rounding
        assert!((approx - std::f64::consts::PI).abs() < 1e-10, "got {}", approx);
    }

    #[test]
    fn error_shrinks_quadratically() {
        let pi = std::f64::consts::PI;
        let coarse = (partial_integral(0.0, 1.0, 100) - pi).abs();
        let fine = (partial_integral(0.0, 1.0, 1_000) - pi).abs();
        // ten times the steps should cut the error by roughly a hundred
        assert!(fine * 50.0 < coarse, "coarse={} fine={}", coarse, fine);
    }

    #[test]
    fn random_subintervals_stay_within_integrand_bounds() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let a: f64 = rng.gen_range(0.0..1.0);
            let b: f64 = rng.gen_range(0.0..1.0);
            if a == b {
                continue;
            }
            let (start, end) = if a < b { (a, b) } else { (b, a) };
            let steps = rng.gen_range(1..2_000);
            let width = end - start;
            let value = partial_integral(start, end, steps);
            let slack = 1e-12 * width;
            assert!(value >= 2.0 * width - slack, "{} < 2*{}", value, width);
            assert!(value <= 4.0 * width + slack, "{} > 4*{}", value, width);
        }
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let start: f64 = rng.gen_range(0.0..0.5);
            let end: f64 = rng.gen_range(0.5..1.0);
            let steps = rng.gen_range(1..10_000);
            let first = partial_integral(start, end, steps);
            let second = partial_integral(start, end, steps);
            assert_eq!(first.to_bits(), second.to_bits());
        }
    }
}
