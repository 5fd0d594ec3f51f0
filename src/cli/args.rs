//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Reconcile declaration files with the template and the codebase
//! - `parse`: Parse a single declaration file and show its declarations
//! - `init`: Initialize envcheck configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::config::ScannerKind;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Parse(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// Common arguments shared by commands that work on a repository.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Repository root containing the declaration files (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Template file name (overrides config file)
    #[arg(long)]
    pub template: Option<String>,

    /// Exit with status 1 when any finding is reported
    #[arg(long)]
    pub strict: bool,

    /// Source scanner (overrides config file)
    #[arg(long, value_enum)]
    pub scanner: Option<ScannerKind>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Declaration file to parse
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check declaration files against the template and the codebase (unused, missing, undeclared keys)
    Check(CheckCommand),
    /// Parse one declaration file and print its resolved declarations and line errors
    Parse(ParseCommand),
    /// Initialize a new .envcheckrc.json configuration file
    Init,
}
