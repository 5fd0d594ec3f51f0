use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use clap::ValueEnum;
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::checker::{
    AccessPattern, CheckOptions, UsageMatcher,
    check::{DEFAULT_ENV_FILE_NAME, DEFAULT_TEMPLATE},
};

pub const CONFIG_FILE_NAME: &str = ".envcheckrc.json";

/// How source text is searched for variable reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScannerKind {
    /// Walk the repository and match in-process.
    #[default]
    Builtin,
    /// Shell out to `rg`.
    Ripgrep,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_env_file_name")]
    pub env_file_name: String,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub access_patterns: Vec<AccessPattern>,
    #[serde(default)]
    pub scanner: ScannerKind,
    #[serde(default)]
    pub strict: bool,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_env_file_name() -> String {
    DEFAULT_ENV_FILE_NAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: default_template(),
            env_file_name: default_env_file_name(),
            ignores: Vec::new(),
            access_patterns: Vec::new(),
            scanner: ScannerKind::default(),
            strict: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for empty file names, invalid `ignores` globs and
    /// access patterns that do not compile or lack their capture group.
    pub fn validate(&self) -> Result<()> {
        if self.template.trim().is_empty() {
            anyhow::bail!("'template' must not be empty");
        }
        if self.env_file_name.trim().is_empty() {
            anyhow::bail!("'envFileName' must not be empty");
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        self.usage_matcher()?;
        Ok(())
    }

    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            template: self.template.clone(),
            env_file_name: self.env_file_name.clone(),
        }
    }

    /// Built-in access patterns plus `accessPatterns`.
    pub fn usage_matcher(&self) -> Result<UsageMatcher> {
        UsageMatcher::with_extra(&self.access_patterns)
            .context("Invalid entry in 'accessPatterns'")
    }

    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignores
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
            })
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

/// Load the config governing `start_dir`, the repository root being checked.
///
/// The search walks up from `start_dir`, stopping at a `.git` directory.
pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            log::debug!("loaded config from {}", path.display());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
