use std::{io, path::PathBuf};

use thiserror::Error;

use crate::parser::LineErrors;

/// Conditions that abort a whole check run.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{template} not found in {}", root.display())]
    TemplateNotFound { template: String, root: PathBuf },

    #[error("{template}: Error while parsing ({} line error(s))", errors.len())]
    TemplateInvalid { template: String, errors: LineErrors },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("source scan failed: {0}")]
    Scan(String),
}

impl CheckError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CheckError::Io {
            path: path.into(),
            source,
        }
    }
}
