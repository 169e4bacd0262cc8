use std::process::ExitCode;

use clap::Parser;
use pi_integral::{integrate, logging, Result, RunOptions};

#[derive(Parser)]
#[command(name = "pi_integral", version)]
#[command(about = "Approximate π by parallel midpoint-rule integration on OS threads", long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunOptions,
}

fn run(cli: &Cli) -> Result<()> {
    let plan = cli.run.plan()?;
    let estimate = integrate(&plan, cli.run.reduction)?;
    cli.run.report(&estimate)
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
