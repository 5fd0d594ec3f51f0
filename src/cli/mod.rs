//! Command-line interface layer.
//!
//! ## Module Structure
//!
//! - `args`: clap argument definitions
//! - `commands`: command handlers producing a `CommandResult`
//! - `report`: text and JSON printing
//! - `exit_status`: process exit codes

use anyhow::Result;

mod args;
pub mod commands;
mod exit_status;
pub mod report;
mod run;

pub use args::{
    Arguments, CheckArgs, CheckCommand, Command, CommonArgs, OutputFormat, ParseCommand,
};
pub use exit_status::ExitStatus;

/// Run a parsed command line, print its report and return the exit status.
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result)?;

    Ok(result.exit_status())
}
