//! Report formatting and printing utilities.
//!
//! Text output is line-oriented: a `<file>: <category>` header followed by
//! indented names or `line: message` entries. JSON output serializes the
//! computed data as-is. Separate from core logic so the checker can be used
//! as a library.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use super::{
    args::OutputFormat,
    commands::{CommandResult, CommandSummary, InitSummary, ParseSummary},
};
use crate::{
    checker::CheckError,
    issues::{CheckReport, FileOutcome},
    parser::LineErrors,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub const UNUSED_HEADER: &str = "Unused envs";
pub const MISSING_HEADER: &str = "Missing envs";
pub const OK_HEADER: &str = "OK";
pub const PARSE_ERROR_HEADER: &str = "Error while parsing";
pub const UNDECLARED_HEADER: &str = "Error: Keys not declared in the template found";

/// Print a command result to stdout in its requested format.
pub fn print(result: &CommandResult) -> Result<()> {
    print_to(result, &mut io::stdout().lock())
}

/// Print a command result to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) -> Result<()> {
    match result.format {
        OutputFormat::Json => write_json(&result.summary, writer),
        OutputFormat::Text => write_text(&result.summary, writer).context("Failed to write report"),
    }
}

/// Print a run-aborting error.
///
/// A malformed template gets the same per-line listing on stdout as any
/// other declaration file; everything else goes to stderr.
pub fn print_error(err: &anyhow::Error) {
    if let Some(CheckError::TemplateInvalid { template, errors }) = err.downcast_ref::<CheckError>()
    {
        let mut out = io::stdout().lock();
        if write_parse_errors(template, errors, &mut out).is_ok() {
            return;
        }
    }
    eprintln!("{} {:#}", "Error:".bold().red(), err);
}

fn write_json<W: Write>(summary: &CommandSummary, writer: &mut W) -> Result<()> {
    let written = match summary {
        CommandSummary::Check(report) => serde_json::to_writer_pretty(&mut *writer, report),
        CommandSummary::Parse(summary) => {
            serde_json::to_writer_pretty(&mut *writer, &summary.parsed)
        }
        CommandSummary::Init(_) => return write_text(summary, writer).map_err(Into::into),
    };
    written.context("Failed to serialize report")?;
    writeln!(writer)?;
    Ok(())
}

fn write_text<W: Write>(summary: &CommandSummary, writer: &mut W) -> io::Result<()> {
    match summary {
        CommandSummary::Check(report) => write_check_report(report, writer),
        CommandSummary::Parse(summary) => write_parse_summary(summary, writer),
        CommandSummary::Init(InitSummary { created }) => writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", created.display()).green()
        ),
    }
}

/// Write the reconciliation report: template findings first, then every
/// sibling declaration file in order.
pub fn write_check_report<W: Write>(report: &CheckReport, writer: &mut W) -> io::Result<()> {
    let template = &report.template;

    if !template.unused.is_empty() {
        write_header(&template.file, UNUSED_HEADER.yellow(), writer)?;
        for name in &template.unused {
            writeln!(writer, " {}", name)?;
        }
    }

    if !template.missing.is_empty() {
        write_header(&template.file, MISSING_HEADER.red(), writer)?;
        for name in &template.missing {
            writeln!(writer, " {}", name)?;
        }
    }

    if template.is_ok() {
        write_header(&template.file, OK_HEADER.green(), writer)?;
    }

    for file in &report.files {
        match &file.outcome {
            FileOutcome::Clean => {}
            FileOutcome::ParseErrors { errors } => write_parse_errors(&file.file, errors, writer)?,
            FileOutcome::Unreadable { error } => {
                write_header(&file.file, PARSE_ERROR_HEADER.red(), writer)?;
                writeln!(writer, " {}", error)?;
            }
            FileOutcome::Undeclared { keys } => {
                write_header(&file.file, UNDECLARED_HEADER.red(), writer)?;
                for key in keys {
                    writeln!(writer, "  {}", key)?;
                }
            }
        }
    }

    Ok(())
}

/// Write a `<file>: Error while parsing` block with one ` line: message` per error.
pub fn write_parse_errors<W: Write>(
    file: &str,
    errors: &LineErrors,
    writer: &mut W,
) -> io::Result<()> {
    write_header(file, PARSE_ERROR_HEADER.red(), writer)?;
    for (line, error) in errors {
        writeln!(writer, " {}: {}", line.to_string().cyan(), error)?;
    }
    Ok(())
}

fn write_parse_summary<W: Write>(summary: &ParseSummary, writer: &mut W) -> io::Result<()> {
    let file = summary.file.display().to_string();
    let parsed = &summary.parsed;

    for located in &parsed.declarations {
        let decl = &located.declaration;
        if decl.comment.is_empty() {
            writeln!(writer, "{}: {}={}", located.line, decl.name.bold(), decl.value)?;
        } else {
            writeln!(
                writer,
                "{}: {}={}  {}",
                located.line,
                decl.name.bold(),
                decl.value,
                format!("# {}", decl.comment).dimmed()
            )?;
        }
    }

    if parsed.has_errors() {
        write_parse_errors(&file, &parsed.errors, writer)?;
    } else if parsed.declarations.is_empty() {
        writeln!(writer, "{}: no declarations", file.bold())?;
    }

    Ok(())
}

fn write_header<W: Write>(
    file: &str,
    category: colored::ColoredString,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, "{}: {}", file.bold(), category)
}
