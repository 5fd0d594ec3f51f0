use std::path::Path;

use super::{
    discovery::discover,
    error::CheckError,
    reconcile::{reconcile_file, reconcile_template},
    usage::{SourceCorpus, UsageMatcher},
};
use crate::{
    issues::{CheckReport, FileOutcome, FileReport},
    parser::{ParsedFile, parse_str},
};

pub const DEFAULT_TEMPLATE: &str = ".env.example";
pub const DEFAULT_ENV_FILE_NAME: &str = ".env";

/// What to look for in the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Template file name, relative to the root.
    pub template: String,
    /// Declaration files are this name and anything starting with it plus `.`.
    pub env_file_name: String,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            env_file_name: DEFAULT_ENV_FILE_NAME.to_string(),
        }
    }
}

/// Run the full consistency check for `root`.
///
/// 1. Discover the template and sibling declaration files.
/// 2. Parse the template; any line error aborts the run.
/// 3. Scan `corpus` for names read by the code.
/// 4. Reconcile template keys against used names.
/// 5. Parse and reconcile every other declaration file independently.
///
/// Only a missing or malformed template (or a template I/O / scan failure) is
/// an `Err`; everything else, unreadable sibling files included, ends up in
/// the returned report.
pub fn check<C: SourceCorpus>(
    root: &Path,
    options: &CheckOptions,
    matcher: &UsageMatcher,
    corpus: &C,
) -> Result<CheckReport, CheckError> {
    let files = discover(root, &options.template, &options.env_file_name)?;

    let template = read_declarations(&files.template)?;
    if template.has_errors() {
        return Err(CheckError::TemplateInvalid {
            template: options.template.clone(),
            errors: template.errors,
        });
    }
    let template_keys = template.env.key_set();

    let used = corpus.used_names(matcher)?;
    log::debug!("found {} distinct variable name(s) read by code", used.len());

    let mut report = CheckReport {
        template: reconcile_template(&options.template, &template_keys, &used),
        files: Vec::with_capacity(files.others.len()),
    };

    for path in &files.others {
        let name = display_name(root, path);
        let parsed = match read_declarations(path) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::warn!("{}", err);
                report.files.push(FileReport {
                    file: name,
                    outcome: FileOutcome::Unreadable {
                        error: unreadable_message(&err),
                    },
                });
                continue;
            }
        };
        log::debug!(
            "{}: {} declaration(s), {} line error(s)",
            name,
            parsed.env.len(),
            parsed.errors.len()
        );
        report
            .files
            .push(reconcile_file(&name, parsed, &template_keys));
    }

    Ok(report)
}

fn read_declarations(path: &Path) -> Result<ParsedFile, CheckError> {
    let content = std::fs::read_to_string(path).map_err(|e| CheckError::io(path, e))?;
    Ok(parse_str(&content))
}

fn unreadable_message(err: &CheckError) -> String {
    match err {
        CheckError::Io { source, .. } => format!("cannot read file: {}", source),
        other => other.to_string(),
    }
}

fn display_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
