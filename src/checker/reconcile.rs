//! Set reconciliation between template keys, code usage and declaration files.
//!
//! These are pure functions over key sets; the caller supplies already
//! parsed tables and scanned names.

use std::collections::BTreeSet;

use crate::{
    issues::{FileOutcome, FileReport, TemplateReport},
    parser::ParsedFile,
};

/// Keys declared in the template that no code reads.
pub fn unused_keys(
    template_keys: &BTreeSet<String>,
    used: &BTreeSet<String>,
) -> BTreeSet<String> {
    template_keys.difference(used).cloned().collect()
}

/// Keys read by code that the template does not declare.
pub fn missing_keys(
    template_keys: &BTreeSet<String>,
    used: &BTreeSet<String>,
) -> BTreeSet<String> {
    used.difference(template_keys).cloned().collect()
}

/// Keys in a declaration file that the template does not declare.
pub fn undeclared_keys(
    file_keys: &BTreeSet<String>,
    template_keys: &BTreeSet<String>,
) -> BTreeSet<String> {
    file_keys.difference(template_keys).cloned().collect()
}

pub fn reconcile_template(
    file: &str,
    template_keys: &BTreeSet<String>,
    used: &BTreeSet<String>,
) -> TemplateReport {
    TemplateReport {
        file: file.to_string(),
        unused: unused_keys(template_keys, used),
        missing: missing_keys(template_keys, used),
    }
}

/// Check one non-template file. Line errors take precedence: a file that
/// does not parse cleanly is not reconciled.
pub fn reconcile_file(
    file: &str,
    parsed: ParsedFile,
    template_keys: &BTreeSet<String>,
) -> FileReport {
    let outcome = if parsed.has_errors() {
        FileOutcome::ParseErrors {
            errors: parsed.errors,
        }
    } else {
        let keys = undeclared_keys(&parsed.env.key_set(), template_keys);
        if keys.is_empty() {
            FileOutcome::Clean
        } else {
            FileOutcome::Undeclared { keys }
        }
    };

    FileReport {
        file: file.to_string(),
        outcome,
    }
}
