use std::process::ExitCode;

use clap::Parser;
use envcheck::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.verbose());

    match envcheck::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            envcheck::cli::report::print_error(&err);
            ExitStatus::Error.into()
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
