mod commands;
mod error;
mod logging;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::commands::Commands;
use crate::error::CliError;

#[derive(Parser)]
#[command(
    name = "cascade",
    version = env!("CASCADE_VERSION"),
    about = "Plan releases that cascade through workspace dependencies"
)]
struct Cli {
    /// Repository root (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    /// Log progress to stderr; `CASCADE_LOG` overrides the level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn run(self) -> Result<(), CliError> {
        logging::init(self.verbose)?;
        let root = match self.path {
            Some(path) => path,
            None => std::env::current_dir().map_err(CliError::CurrentDir)?,
        };
        self.command.execute(&root)
    }
}

fn main() -> ExitCode {
    match Cli::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &CliError) {
    for line in report_lines(err) {
        eprintln!("{line}");
    }
}

fn report_lines(err: &CliError) -> Vec<String> {
    let mut lines = vec![format!("error: {err}")];
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {cause}"));
        source = cause.source();
    }
    lines
}
