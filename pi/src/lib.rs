//! Estimates π by integrating `4 / (1 + x^2)` over `[0, 1]` with the midpoint rule,
//! with the domain split evenly across worker threads.

pub mod error;
pub mod input;
pub mod integral;
pub mod logging;
pub mod plan;
pub mod reducer;
pub mod report;

pub use error::{InputFault, PiError, Result};
pub use input::{parse_count, Prompter, Request};
pub use integral::{integrand, partial_integral};
pub use plan::{Assignment, Interval, WorkPlan, MAX_WORKERS};
pub use reducer::{compute, integrate, Estimate, Reduction};
pub use report::write_report;

/// Command-line options shared by both binaries. With none given the program only prompts.
#[derive(Debug, Clone, clap::Args)]
pub struct RunOptions {
    /// Total number of midpoint steps (skips the first prompt)
    #[arg(long, allow_hyphen_values = true)]
    pub steps: Option<String>,

    /// Number of workers (skips the second prompt)
    #[arg(long, allow_hyphen_values = true)]
    pub threads: Option<String>,

    /// How partial results are combined
    #[arg(long, value_enum, default_value_t = Reduction::Locked)]
    pub reduction: Reduction,

    /// Fixed number of decimals in the output
    #[arg(long)]
    pub precision: Option<usize>,
}

impl RunOptions {
    /// Prompts on stdin/stdout for whatever was not given on the command line and builds the plan.
    pub fn plan(&self) -> Result<WorkPlan> {
        let stdin = std::io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
        let request = prompter.request(self.steps.as_deref(), self.threads.as_deref())?;
        WorkPlan::new(request.total_steps, request.threads)
    }

    pub fn report(&self, estimate: &Estimate) -> Result<()> {
        write_report(&mut std::io::stdout().lock(), estimate, self.precision)
    }
}
