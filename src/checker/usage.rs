//! Detection of environment variable reads in source text.
//!
//! Matching is purely textual: each access pattern is a regex whose capture
//! group holds the literal variable name. Dynamically built names are missed
//! and lookalike calls are over-matched; both are accepted limitations.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use enum_dispatch::enum_dispatch;
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use super::error::CheckError;

/// Built-in call shapes as `(regex, capture group)` pairs.
///
/// `\s` also matches newlines, so calls split across lines are found.
pub const DEFAULT_ACCESS_PATTERNS: &[(&str, usize)] = &[
    (r#"env\(\s*"(\w+)"\s*\)"#, 1),
    (r#"var\(\s*"(\w+)"\s*\)"#, 1),
    (r#"envconfig\(\s*from\s*=\s*"(\w+)""#, 1),
];

/// Directories never scanned by the built-in scanner.
pub const SKIPPED_DIRS: &[&str] = &["target", "node_modules"];

/// A user-configurable access pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPattern {
    pub regex: String,
    #[serde(default = "default_group")]
    pub group: usize,
}

fn default_group() -> usize {
    1
}

impl AccessPattern {
    pub fn new(regex: impl Into<String>, group: usize) -> Self {
        Self {
            regex: regex.into(),
            group,
        }
    }

    pub fn defaults() -> Vec<AccessPattern> {
        DEFAULT_ACCESS_PATTERNS
            .iter()
            .map(|(regex, group)| AccessPattern::new(*regex, *group))
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid access pattern \"{pattern}\": {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("access pattern \"{pattern}\" has no capture group {group}")]
    MissingGroup { pattern: String, group: usize },
}

/// A compiled access pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub group: usize,
}

impl CompiledPattern {
    pub fn compile(pattern: &AccessPattern) -> Result<Self, PatternError> {
        let regex = Regex::new(&pattern.regex).map_err(|source| PatternError::Invalid {
            pattern: pattern.regex.clone(),
            source,
        })?;
        // captures_len counts the implicit whole-match group 0.
        if pattern.group == 0 || pattern.group >= regex.captures_len() {
            return Err(PatternError::MissingGroup {
                pattern: pattern.regex.clone(),
                group: pattern.group,
            });
        }
        Ok(Self {
            regex,
            group: pattern.group,
        })
    }

    /// Every name captured by this pattern in `text`.
    pub fn captures<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        let group = self.group;
        self.regex
            .captures_iter(text)
            .filter_map(move |caps| caps.get(group).map(|m| m.as_str()))
    }
}

/// The ordered list of access patterns a check uses.
#[derive(Debug, Clone)]
pub struct UsageMatcher {
    patterns: Vec<CompiledPattern>,
}

impl UsageMatcher {
    pub fn new(patterns: &[AccessPattern]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(CompiledPattern::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Built-in patterns followed by `extra`.
    pub fn with_extra(extra: &[AccessPattern]) -> Result<Self, PatternError> {
        let mut all = AccessPattern::defaults();
        all.extend(extra.iter().cloned());
        Self::new(&all)
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Add every name read in `text` to `names`.
    pub fn collect_from(&self, text: &str, names: &mut BTreeSet<String>) {
        for pattern in &self.patterns {
            names.extend(pattern.captures(text).map(str::to_string));
        }
    }

    /// All patterns joined into one alternation, plus a replacement that
    /// expands to whichever pattern's name group matched.
    ///
    /// Group indices are shifted by the groups of the patterns before them.
    pub fn combined(&self) -> (String, String) {
        let mut alternatives = Vec::with_capacity(self.patterns.len());
        let mut replacement = String::new();
        let mut offset = 0;

        for pattern in &self.patterns {
            alternatives.push(pattern.regex.as_str().to_string());
            replacement.push_str(&format!("${{{}}}", offset + pattern.group));
            offset += pattern.regex.captures_len() - 1;
        }

        (alternatives.join("|"), replacement)
    }
}

impl Default for UsageMatcher {
    fn default() -> Self {
        let patterns = DEFAULT_ACCESS_PATTERNS
            .iter()
            .filter_map(|(regex, group)| {
                CompiledPattern::compile(&AccessPattern::new(*regex, *group)).ok()
            })
            .collect();
        Self { patterns }
    }
}

// ============================================================
// Source corpora
// ============================================================

/// Text collaborator searched for environment variable reads.
#[enum_dispatch]
pub trait SourceCorpus {
    /// Names captured by `matcher` anywhere in the corpus, one per match.
    fn find_names(&self, matcher: &UsageMatcher) -> Result<Vec<String>, CheckError>;

    /// Distinct names read by the corpus.
    fn used_names(&self, matcher: &UsageMatcher) -> Result<BTreeSet<String>, CheckError> {
        Ok(self
            .find_names(matcher)?
            .into_iter()
            .filter(|name| !name.is_empty())
            .collect())
    }
}

#[enum_dispatch(SourceCorpus)]
#[derive(Debug, Clone)]
pub enum Corpus {
    FileTree(FileTreeCorpus),
    Ripgrep(RipgrepCorpus),
    Memory(MemoryCorpus),
}

/// Walks a directory tree and matches every text file in-process.
#[derive(Debug, Clone)]
pub struct FileTreeCorpus {
    root: PathBuf,
    ignores: Vec<Pattern>,
}

impl FileTreeCorpus {
    pub fn new(root: impl Into<PathBuf>, ignores: Vec<Pattern>) -> Self {
        Self {
            root: root.into(),
            ignores,
        }
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            return true;
        }
        if entry.file_type().is_dir() && SKIPPED_DIRS.iter().any(|dir| *dir == name) {
            return true;
        }
        let relative = entry
            .path()
            .strip_prefix(&self.root)
            .unwrap_or(entry.path());
        self.ignores.iter().any(|p| p.matches_path(relative))
    }

    /// Reads a file as text; `None` for binary or non-UTF-8 content.
    fn read_text(path: &Path) -> Option<String> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("skipping unreadable file {}: {}", path.display(), e);
                return None;
            }
        };
        if bytes.contains(&0) {
            log::debug!("skipping binary file {}", path.display());
            return None;
        }
        match String::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(_) => {
                log::warn!("skipping non-UTF-8 file {}", path.display());
                None
            }
        }
    }
}

impl SourceCorpus for FileTreeCorpus {
    fn find_names(&self, matcher: &UsageMatcher) -> Result<Vec<String>, CheckError> {
        let mut names = Vec::new();
        let mut scanned = 0;

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("cannot access path: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(text) = Self::read_text(entry.path()) else {
                continue;
            };
            scanned += 1;
            for pattern in matcher.patterns() {
                names.extend(pattern.captures(&text).map(str::to_string));
            }
        }

        log::debug!("scanned {} source file(s) under {}", scanned, self.root.display());
        Ok(names)
    }
}

const RIPGREP_FLAGS: &[&str] = &["-o", "--multiline", "-L", "-N", "--no-heading", "--no-filename"];

/// Delegates the search to a single `rg` invocation in the repository root.
#[derive(Debug, Clone)]
pub struct RipgrepCorpus {
    root: PathBuf,
    program: String,
    ignores: Vec<String>,
}

impl RipgrepCorpus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            program: "rg".to_string(),
            ignores: Vec::new(),
        }
    }

    /// Exclude paths matching these globs, relative to the root.
    pub fn with_ignores(mut self, ignores: Vec<String>) -> Self {
        self.ignores = ignores;
        self
    }

    /// Arguments for one `rg` run over the whole root.
    pub fn args(&self, matcher: &UsageMatcher) -> Vec<String> {
        let (regex, replacement) = matcher.combined();
        let mut args: Vec<String> = RIPGREP_FLAGS.iter().map(|arg| arg.to_string()).collect();
        for pattern in &self.ignores {
            args.push("--glob".to_string());
            args.push(format!("!{}", pattern));
        }
        args.extend([regex, "-r".to_string(), replacement]);
        args
    }

    /// Use a different ripgrep executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl SourceCorpus for RipgrepCorpus {
    fn find_names(&self, matcher: &UsageMatcher) -> Result<Vec<String>, CheckError> {
        let output = Command::new(&self.program)
            .args(self.args(matcher))
            .current_dir(&self.root)
            .output()
            .map_err(|e| CheckError::Scan(format!("failed to run {}: {}", self.program, e)))?;

        // rg exits with 1 when nothing matched.
        match output.status.code() {
            Some(0) | Some(1) => {}
            _ => {
                return Err(CheckError::Scan(format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                )));
            }
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.trim().to_string())
            .collect())
    }
}

/// In-memory source texts, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    texts: Vec<String>,
}

impl MemoryCorpus {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }
}

impl SourceCorpus for MemoryCorpus {
    fn find_names(&self, matcher: &UsageMatcher) -> Result<Vec<String>, CheckError> {
        let mut names = BTreeSet::new();
        for text in &self.texts {
            matcher.collect_from(text, &mut names);
        }
        Ok(names.into_iter().collect())
    }
}
