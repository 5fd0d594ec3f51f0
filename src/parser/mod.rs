//! Declaration parser for shell-style `export NAME=VALUE` files.
//!
//! ## Module Structure
//!
//! - `types`: Declaration, EnvTable, ParsedFile and the line-scoped `ExportError`
//! - `export`: single-line scanner (`parse_export`)
//! - `file`: whole-file parsing with per-line error collection

pub mod export;
pub mod file;
pub mod types;

pub use export::parse_export;
pub use file::{parse_file, parse_path, parse_str};
pub use types::*;
