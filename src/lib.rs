//! envcheck - consistency checker for shell-style `.env` declaration files
//!
//! envcheck parses `export NAME=VALUE` files (quoting, `$NAME` substitution,
//! inline comments) and cross-checks the declared keys against a template
//! file and against the environment variables the codebase reads.
//!
//! ## Module Structure
//!
//! - `parser`: Declaration parser (line scanner and whole-file parsing)
//! - `checker`: Discovery, source scanning and set reconciliation
//! - `issues`: Report data model
//! - `config`: Configuration file loading and parsing
//! - `cli`: Command-line interface layer

pub mod checker;
pub mod cli;
pub mod config;
pub mod issues;
pub mod parser;
