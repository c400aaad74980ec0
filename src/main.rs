use std::io;
use std::process::ExitCode;

use clap::Parser;

use cliporg::cli::Cli;
use cliporg::{Config, Pipeline, SystemExecutor, tracing_sub};

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_sub::init(cli.verbose);

    let config = match Config::try_from(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("cliporg: {err}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(?config, "starting");

    let mut stdout = io::stdout().lock();
    let mut pipeline = Pipeline::new(&config, SystemExecutor::new());
    match pipeline.run(config.destination, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cliporg: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
