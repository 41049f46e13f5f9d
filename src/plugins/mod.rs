//! Core plugin bootstrapping.
//!
//! The core plugins directory carries a `package.json` whose dependencies are
//! the plugins bundled with the CLI. They are installed as one batch and then
//! registered in the plugin cache one by one.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod cache;
pub mod descriptor;
pub mod npm;
pub mod parser;

pub use cache::JsonPluginCache;
pub use npm::NpmInstaller;
pub use parser::NodeModulesParser;

/// A plugin as recorded in the cache.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub path: PathBuf,
}

/// Installs packages given as `name@version` identifiers.
pub trait PackageInstaller {
    fn install_packages(&self, packages: &[String]) -> Result<()>;
}

/// Turns an installed package name into a plugin descriptor.
pub trait PluginParser {
    fn parse_plugin(&self, name: &str) -> Result<Plugin>;
}

pub trait PluginCache {
    fn add(&mut self, plugin: Plugin) -> Result<()>;
}

/// Install every dependency of `<core_plugins_dir>/package.json` and cache it.
///
/// Nothing is cached unless the batch install succeeds. A parse or cache
/// failure afterwards stops the loop; plugins registered before it stay
/// registered.
pub fn install_core_plugins(
    core_plugins_dir: &Path,
    installer: &dyn PackageInstaller,
    parser: &dyn PluginParser,
    cache: &mut dyn PluginCache,
) -> Result<Vec<Plugin>> {
    let package_json = core_plugins_dir.join("package.json");
    let packages = descriptor::read_dependencies(&package_json)?;
    if packages.is_empty() {
        warn!("plugins: {} declares no dependencies", package_json.display());
        return Ok(Vec::new());
    }

    info!("plugins: installing {}", packages.join(" "));
    installer.install_packages(&packages)?;

    let mut registered = Vec::with_capacity(packages.len());
    for package in &packages {
        let plugin = parser.parse_plugin(descriptor::bare_name(package))?;
        info!("plugins: caching {}@{}", plugin.name, plugin.version);
        cache.add(plugin.clone())?;
        registered.push(plugin);
    }
    Ok(registered)
}
