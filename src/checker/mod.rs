//! Consistency checker: reconciles declaration files with a template and
//! with the environment variables the codebase actually reads.
//!
//! ## Module Structure
//!
//! - `discovery`: find the template and sibling declaration files
//! - `usage`: access-pattern table and the `SourceCorpus` scanners
//! - `reconcile`: pure set algebra producing report sections
//! - `check`: orchestration and fatal error handling

pub mod check;
pub mod discovery;
mod error;
pub mod reconcile;
pub mod usage;

pub use check::{CheckOptions, check};
pub use error::CheckError;
pub use usage::{AccessPattern, Corpus, SourceCorpus, UsageMatcher};
