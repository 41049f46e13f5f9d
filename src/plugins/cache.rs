use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Plugin, PluginCache};
use crate::error::{BuildError, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    plugins: BTreeMap<String, Plugin>,
}

/// Plugin cache persisted as a JSON file keyed by plugin name.
#[derive(Debug)]
pub struct JsonPluginCache {
    path: PathBuf,
    contents: CacheFile,
}

impl JsonPluginCache {
    /// Load the cache at `path`, starting empty if nothing is there yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                contents: CacheFile::default(),
            });
        }
        let text = fs::read_to_string(&path).map_err(|e| BuildError::io(&path, e))?;
        let contents =
            serde_json::from_str(&text).map_err(|source| BuildError::DescriptorParse {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, contents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[allow(dead_code)]
    pub fn get(&self, name: &str) -> Option<&Plugin> {
        self.contents.plugins.get(name)
    }

    fn persist(&self) -> std::result::Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("unable to create cache dir: {e}"))?;
        }
        let json = serde_json::to_string_pretty(&self.contents)
            .map_err(|e| format!("unable to serialize cache: {e}"))?;
        fs::write(&self.path, json)
            .map_err(|e| format!("unable to write {}: {e}", self.path.display()))
    }
}

impl PluginCache for JsonPluginCache {
    fn add(&mut self, plugin: Plugin) -> Result<()> {
        let name = plugin.name.clone();
        debug!("cache: storing {name} in {}", self.path.display());
        self.contents.plugins.insert(name.clone(), plugin);
        self.persist()
            .map_err(|reason| BuildError::PluginCache { name, reason })
    }
}
