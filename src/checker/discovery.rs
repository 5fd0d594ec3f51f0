use std::{
    fs,
    path::{Path, PathBuf},
};

use super::error::CheckError;

/// Declaration files found in the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationFiles {
    pub template: PathBuf,
    /// Every other declaration file, sorted by name.
    pub others: Vec<PathBuf>,
}

/// Whether `file_name` names a declaration file.
///
/// Matches the template itself, `env_file_name` exactly, and anything
/// starting with `env_file_name` followed by a dot (`.env.local`, `.env.prod`).
pub fn is_declaration_file(file_name: &str, template: &str, env_file_name: &str) -> bool {
    file_name == template
        || file_name == env_file_name
        || file_name
            .strip_prefix(env_file_name)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// List the declaration files directly under `root`.
///
/// Fails with [`CheckError::TemplateNotFound`] when the template is absent.
pub fn discover(
    root: &Path,
    template: &str,
    env_file_name: &str,
) -> Result<DeclarationFiles, CheckError> {
    let entries = fs::read_dir(root).map_err(|e| CheckError::io(root, e))?;

    let mut found_template = None;
    let mut others = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| CheckError::io(root, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_declaration_file(name, template, env_file_name) {
            continue;
        }

        if name == template {
            found_template = Some(path);
        } else {
            others.push(path);
        }
    }

    let Some(template_path) = found_template else {
        return Err(CheckError::TemplateNotFound {
            template: template.to_string(),
            root: root.to_path_buf(),
        });
    };

    others.sort();
    log::debug!(
        "discovered template {} and {} declaration file(s)",
        template_path.display(),
        others.len()
    );

    Ok(DeclarationFiles {
        template: template_path,
        others,
    })
}
