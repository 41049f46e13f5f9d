use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{BuildError, Result};

/// The subset of `package.json` needed to bootstrap core plugins.
#[derive(Debug, Deserialize)]
struct PackageJson {
    dependencies: Option<IndexMap<String, String>>,
}

/// Read `name@version` identifiers from a package descriptor's `dependencies`,
/// in the order they are declared.
pub fn read_dependencies(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
    let package: PackageJson =
        serde_json::from_str(&contents).map_err(|source| BuildError::DescriptorParse {
            path: path.to_path_buf(),
            source,
        })?;
    let dependencies = package
        .dependencies
        .ok_or_else(|| BuildError::MissingDependencies {
            path: path.to_path_buf(),
        })?;
    Ok(dependencies
        .into_iter()
        .map(|(name, version)| format!("{name}@{version}"))
        .collect())
}

/// Strip the version from a `name@version` identifier, keeping any `@scope/` prefix.
pub fn bare_name(identifier: &str) -> &str {
    match identifier.rfind('@') {
        Some(idx) if idx > 0 => &identifier[..idx],
        _ => identifier,
    }
}
