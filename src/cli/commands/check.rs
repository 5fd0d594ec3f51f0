use std::{env, path::PathBuf};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary};
use crate::{
    checker::{
        Corpus, check,
        usage::{FileTreeCorpus, RipgrepCorpus},
    },
    cli::args::CheckCommand,
    config::{ScannerKind, load_config},
};

pub fn check_command(cmd: CheckCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let root = resolve_root(args.common.root)?;

    let mut config = load_config(&root)?.config;
    if let Some(template) = args.template {
        config.template = template;
    }
    if let Some(scanner) = args.scanner {
        config.scanner = scanner;
    }
    let strict = args.strict || config.strict;

    let matcher = config.usage_matcher()?;
    let corpus: Corpus = match config.scanner {
        ScannerKind::Builtin => FileTreeCorpus::new(&root, config.ignore_patterns()?).into(),
        ScannerKind::Ripgrep => RipgrepCorpus::new(&root)
            .with_ignores(config.ignores.clone())
            .into(),
    };

    let report = check(&root, &config.check_options(), &matcher, &corpus)?;

    Ok(CommandResult {
        summary: CommandSummary::Check(report),
        format: args.format,
        exit_on_findings: strict,
    })
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(root) => root,
        None => env::current_dir().context("Failed to determine current directory")?,
    };
    root.canonicalize()
        .with_context(|| format!("Repository root not found: {}", root.display()))
}
