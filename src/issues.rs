//! Reconciliation findings produced by a check run.
//!
//! The report is computed in full before anything is printed, so the CLI
//! reporter, the JSON output and tests all read the same data.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::parser::LineErrors;

// ============================================================
// Template
// ============================================================

/// Findings for the template file against the names read by the codebase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateReport {
    /// Template file name, relative to the repository root.
    pub file: String,
    /// Declared in the template, never read by code.
    pub unused: BTreeSet<String>,
    /// Read by code, absent from the template.
    pub missing: BTreeSet<String>,
}

impl TemplateReport {
    pub fn is_ok(&self) -> bool {
        self.unused.is_empty() && self.missing.is_empty()
    }
}

// ============================================================
// Sibling declaration files
// ============================================================

/// Outcome of checking one non-template declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Parsed cleanly and every key is declared in the template.
    Clean,
    /// The file has line errors; key reconciliation was skipped.
    ParseErrors { errors: LineErrors },
    /// Keys present in the file but not declared in the template.
    Undeclared { keys: BTreeSet<String> },
    /// The file could not be read as text; nothing was parsed.
    Unreadable { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        matches!(self.outcome, FileOutcome::Clean)
    }
}

// ============================================================
// Whole run
// ============================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub template: TemplateReport,
    /// Non-template declaration files, sorted by name.
    pub files: Vec<FileReport>,
}

impl CheckReport {
    /// True when any category (unused, missing, parse errors, undeclared) is non-empty.
    pub fn has_findings(&self) -> bool {
        !self.template.is_ok() || self.files.iter().any(|f| !f.is_clean())
    }

    pub fn summary(&self) -> FindingCounts {
        let mut counts = FindingCounts {
            unused: self.template.unused.len(),
            missing: self.template.missing.len(),
            ..Default::default()
        };
        for file in &self.files {
            match &file.outcome {
                FileOutcome::Clean => {}
                FileOutcome::ParseErrors { errors } => counts.parse_errors += errors.len(),
                FileOutcome::Undeclared { keys } => counts.undeclared += keys.len(),
                FileOutcome::Unreadable { .. } => counts.parse_errors += 1,
            }
        }
        counts
    }
}

/// Per-category totals across a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FindingCounts {
    pub unused: usize,
    pub missing: usize,
    pub parse_errors: usize,
    pub undeclared: usize,
}

impl FindingCounts {
    pub fn total(&self) -> usize {
        self.unused + self.missing + self.parse_errors + self.undeclared
    }
}
