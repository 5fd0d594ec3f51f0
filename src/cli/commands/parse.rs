use anyhow::Result;

use super::{CommandResult, CommandSummary, ParseSummary};
use crate::{cli::args::ParseCommand, parser::parse_path};

pub fn parse(cmd: ParseCommand) -> Result<CommandResult> {
    let parsed = parse_path(&cmd.file)?;
    log::debug!(
        "{}: {} declaration(s), {} line error(s)",
        cmd.file.display(),
        parsed.declarations.len(),
        parsed.errors.len()
    );

    Ok(CommandResult {
        summary: CommandSummary::Parse(ParseSummary {
            file: cmd.file,
            parsed,
        }),
        format: cmd.format,
        exit_on_findings: true,
    })
}
