//! Single-line `export NAME=VALUE` scanner.
//!
//! The value is scanned left to right. A `"` toggles quoting and is dropped,
//! `$` opens a variable reference that runs over alphanumerics and `_`, and an
//! unquoted `#` starts the trailing comment. An unquoted space sets a sticky
//! flag: after it, any literal character or the end of input fails the line,
//! unless a comment ends the value first.

use super::types::{Declaration, EnvTable, ExportError};

const EXPORT_PREFIX: &str = "export ";

/// Parse one `export` line, resolving `$NAME` references against `env`.
///
/// `env` holds the declarations from earlier lines of the same file, so a
/// value can only reference names declared above it.
///
/// # Example
///
/// ```
/// use envcheck::parser::{EnvTable, parse_export};
///
/// let env: EnvTable = [("X", "123")].into_iter().collect();
/// let decl = parse_export(r#"export FOO="$X""$X" # note"#, &env).unwrap();
/// assert_eq!(decl.name, "FOO");
/// assert_eq!(decl.value, "123123");
/// assert_eq!(decl.comment, "note");
/// ```
pub fn parse_export(line: &str, env: &EnvTable) -> Result<Declaration, ExportError> {
    let Some(rest) = line.strip_prefix(EXPORT_PREFIX) else {
        return Err(ExportError::NotExport(line.to_string()));
    };
    let rest = rest.trim();

    let Some((name, raw_value)) = rest.split_once('=') else {
        return Err(ExportError::MissingAssignment(rest.to_string()));
    };
    if !is_valid_name(name) {
        return Err(ExportError::InvalidName(name.to_string()));
    }

    let (value, comment) = ValueScanner::new(env).scan(raw_value)?;
    Ok(Declaration::new(name, value, comment))
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

struct ValueScanner<'a> {
    env: &'a EnvTable,
    value: String,
    in_quote: bool,
    /// Name of the open `$` reference, if any.
    variable: Option<String>,
    /// Set once a space is seen outside quotes; never cleared.
    has_unquoted_space: bool,
}

impl<'a> ValueScanner<'a> {
    fn new(env: &'a EnvTable) -> Self {
        Self {
            env,
            value: String::new(),
            in_quote: false,
            variable: None,
            has_unquoted_space: false,
        }
    }

    /// Returns the resolved value and the trimmed comment.
    fn scan(mut self, raw: &str) -> Result<(String, String), ExportError> {
        let mut chars = raw.char_indices().peekable();

        loop {
            let current = chars.peek().copied();

            if let Some(name) = self.variable.as_mut() {
                match current {
                    Some((_, c)) if is_name_char(c) => {
                        name.push(c);
                        chars.next();
                    }
                    // The terminating character is not consumed; it is
                    // scanned again in literal mode on the next iteration.
                    _ => self.close_variable()?,
                }
                continue;
            }

            let Some((idx, c)) = current else {
                if self.has_unquoted_space {
                    return Err(ExportError::UnquotedSpace);
                }
                return Ok((self.value, String::new()));
            };

            match c {
                ' ' if !self.in_quote => self.has_unquoted_space = true,
                '$' => self.variable = Some(String::new()),
                '"' => self.in_quote = !self.in_quote,
                '#' if !self.in_quote => {
                    let comment = raw[idx + c.len_utf8()..].trim().to_string();
                    return Ok((self.value, comment));
                }
                _ if self.has_unquoted_space => return Err(ExportError::UnquotedSpace),
                _ => self.value.push(c),
            }
            chars.next();
        }
    }

    fn close_variable(&mut self) -> Result<(), ExportError> {
        let name = self.variable.take().unwrap_or_default();
        let Some(resolved) = self.env.get(&name) else {
            return Err(ExportError::UnknownVariable(name));
        };
        if !self.in_quote && resolved.contains(' ') {
            return Err(ExportError::UnquotedSpaceInVariable {
                name,
                value: resolved.to_string(),
            });
        }
        self.value.push_str(resolved);
        Ok(())
    }
}
