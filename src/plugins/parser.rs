use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use super::{Plugin, PluginParser};
use crate::error::{BuildError, Result};

#[derive(Debug, Deserialize)]
struct PluginPackageJson {
    name: String,
    version: String,
    #[serde(default)]
    description: Option<String>,
}

/// Reads plugin metadata from `<root>/node_modules/<name>/package.json`.
#[derive(Clone, Debug)]
pub struct NodeModulesParser {
    root: PathBuf,
}

impl NodeModulesParser {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn plugin_dir(&self, name: &str) -> PathBuf {
        // Scoped names (`@scope/pkg`) map onto nested directories.
        name.split('/')
            .fold(self.root.join("node_modules"), |dir, part| dir.join(part))
    }
}

impl PluginParser for NodeModulesParser {
    fn parse_plugin(&self, name: &str) -> Result<Plugin> {
        let failed = |reason: String| BuildError::PluginParse {
            name: name.to_owned(),
            reason,
        };
        let dir = self.plugin_dir(name);
        let manifest = dir.join("package.json");
        let contents = fs::read_to_string(&manifest)
            .map_err(|e| failed(format!("{}: {e}", manifest.display())))?;
        let package: PluginPackageJson = serde_json::from_str(&contents)
            .map_err(|e| failed(format!("{}: {e}", manifest.display())))?;
        if package.name != name {
            return Err(failed(format!(
                "{} declares name {}",
                manifest.display(),
                package.name
            )));
        }
        Ok(Plugin {
            name: package.name,
            version: package.version,
            description: package.description,
            path: dir,
        })
    }
}
