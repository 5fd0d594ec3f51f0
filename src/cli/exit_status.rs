use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Run completed; findings, if any, were reported only
/// - `Failure` (1): Findings were reported and the run asked to fail on them
///   (`check --strict`, or `parse` of a file with line errors)
/// - `Error` (2): The run was aborted (template missing or malformed, config error, I/O error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
