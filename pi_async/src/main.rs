mod reducer;

use std::process::ExitCode;

use clap::Parser;
use pi_integral::{logging, Result, RunOptions};

#[derive(Parser)]
#[command(name = "pi_integral_async", version)]
#[command(about = "Approximate π by parallel midpoint-rule integration on tokio tasks", long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunOptions,
}

async fn run(cli: &Cli) -> Result<()> {
    // prompting blocks on stdin before any task exists
    let plan = cli.run.plan()?;
    let estimate = reducer::integrate(&plan, cli.run.reduction).await?;
    cli.run.report(&estimate)
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
