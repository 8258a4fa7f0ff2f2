use std::process::ExitCode;

use clap::Parser;
use lineplan::{CLIArguments, export_main, logging, plan_main};
use tracing::error;

fn main() -> ExitCode {
    let args = CLIArguments::parse();
    logging::init(args.verbose());

    let result = match args {
        CLIArguments::Plan(args) => plan_main(args),
        CLIArguments::Export(args) => export_main(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
