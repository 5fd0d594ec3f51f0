use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// A single successfully parsed `export` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    /// Fully resolved value: every `$NAME` reference has already been expanded.
    pub value: String,
    /// Trailing text after an unquoted `#`, trimmed. Empty when absent.
    pub comment: String,
}

impl Declaration {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            comment: comment.into(),
        }
    }
}

/// A declaration together with the 1-based line it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedDeclaration {
    pub line: usize,
    #[serde(flatten)]
    pub declaration: Declaration,
}

/// Name to resolved value mapping accumulated while parsing one file.
///
/// Keys keep the position of their first declaration; redefining a name
/// replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvTable {
    entries: IndexMap<String, String>,
}

impl EnvTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Insert or overwrite `name`. Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Owned, sorted key set for reconciliation.
    pub fn key_set(&self) -> BTreeSet<String> {
        self.entries.keys().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = EnvTable::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

/// Why a single line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("line doesn't start with export: {0}")]
    NotExport(String),

    #[error("missing '=' in declaration: {0}")]
    MissingAssignment(String),

    #[error("invalid variable name \"{0}\"")]
    InvalidName(String),

    #[error("unquoted space")]
    UnquotedSpace,

    #[error("unknown variable ${0}")]
    UnknownVariable(String),

    #[error("variable value contains space but reference is unquoted: ${name} = \"{value}\"")]
    UnquotedSpaceInVariable { name: String, value: String },
}

impl Serialize for ExportError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse errors keyed by 1-based line number.
pub type LineErrors = BTreeMap<usize, ExportError>;

/// Result of parsing a whole declaration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedFile {
    pub env: EnvTable,
    /// Every successful declaration in file order, duplicates included.
    pub declarations: Vec<LocatedDeclaration>,
    pub errors: LineErrors,
}

impl ParsedFile {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_parts(self) -> (EnvTable, LineErrors) {
        (self.env, self.errors)
    }
}
