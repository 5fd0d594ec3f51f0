use std::path::PathBuf;

use super::super::{args::OutputFormat, exit_status::ExitStatus};
use crate::{issues::CheckReport, parser::ParsedFile};

#[derive(Debug)]
pub struct ParseSummary {
    pub file: PathBuf,
    pub parsed: ParsedFile,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: PathBuf,
}

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckReport),
    Parse(ParseSummary),
    Init(InitSummary),
}

/// Result of running envcheck commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub format: OutputFormat,
    /// If true, findings turn into exit status 1.
    /// If false, findings are reported and the run still exits 0.
    pub exit_on_findings: bool,
}

impl CommandResult {
    pub fn has_findings(&self) -> bool {
        match &self.summary {
            CommandSummary::Check(report) => report.has_findings(),
            CommandSummary::Parse(summary) => summary.parsed.has_errors(),
            CommandSummary::Init(_) => false,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_findings && self.has_findings() {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
