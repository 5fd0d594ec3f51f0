use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check_command, init::init, parse::parse},
};

/// Dispatches to the appropriate command handler based on the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with the computed report and exit behavior
/// - `Err` if the command fails (e.g., template missing or malformed, config errors)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check_command(cmd),
        Some(Command::Parse(cmd)) => parse(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
