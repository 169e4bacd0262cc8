use std::io::Write;

use crate::error::Result;
use crate::reducer::Estimate;

/// Writes the result and timing lines.
///
/// `precision` fixes the number of decimals. Without it the shortest round-trip form is used.
pub fn write_report<W: Write>(writer: &mut W, estimate: &Estimate, precision: Option<usize>) -> Result<()> {
    let seconds = estimate.elapsed.as_secs_f64();
    match precision {
        Some(digits) => {
            writeln!(writer, "Przyblizona wartosc liczby PI: {:.*}", digits, estimate.value)?;
            writeln!(writer, "Czas obliczen: {:.*} sekund", digits, seconds)?;
        }
        None => {
            writeln!(writer, "Przyblizona wartosc liczby PI: {}", estimate.value)?;
            writeln!(writer, "Czas obliczen: {} sekund", seconds)?;
        }
    }
    writer.flush()?;
    Ok(())
}
