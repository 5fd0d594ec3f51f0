use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::{
    export::parse_export,
    types::{LocatedDeclaration, ParsedFile},
};

/// Parse an ordered sequence of lines into a table plus per-line errors.
///
/// Blank lines and `#` comment lines are skipped. Every other line goes
/// through [`parse_export`] against the table built so far; failures are
/// recorded under their 1-based line number and parsing continues.
pub fn parse_file<I, S>(lines: I) -> ParsedFile
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedFile::default();

    for (i, line) in lines.into_iter().enumerate() {
        let line_no = i + 1;
        let line = line.as_ref().trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_export(line, &parsed.env) {
            Ok(declaration) => {
                parsed
                    .env
                    .insert(declaration.name.clone(), declaration.value.clone());
                parsed.declarations.push(LocatedDeclaration {
                    line: line_no,
                    declaration,
                });
            }
            Err(err) => {
                parsed.errors.insert(line_no, err);
            }
        }
    }

    parsed
}

/// Parse declaration file contents.
pub fn parse_str(content: &str) -> ParsedFile {
    parse_file(content.lines())
}

/// Read and parse a declaration file from disk.
pub fn parse_path(path: &Path) -> Result<ParsedFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read declaration file: {}", path.display()))?;
    Ok(parse_str(&content))
}
