use std::env;
use std::path::PathBuf;

/// Returns the root directory used by the CLI for its own data.
pub fn default_app_dir() -> PathBuf {
    let base = match env::consts::OS {
        "windows" => env::var_os("LOCALAPPDATA")
            .or_else(|| env::var_os("APPDATA"))
            .map(PathBuf::from),
        "macos" => env::var_os("HOME")
            .map(PathBuf::from)
            .map(|home| home.join("Library").join("Application Support")),
        _ => env::var_os("HOME")
            .map(PathBuf::from)
            .map(|home| home.join(".local").join("share")),
    }
    .unwrap_or_else(|| PathBuf::from("."));

    base.join("heroku")
}

pub fn cache_dir() -> PathBuf {
    default_app_dir().join("cache")
}

/// Directory holding the core plugins' `package.json` and `node_modules`.
pub fn core_plugins_dir() -> PathBuf {
    default_app_dir().join("core-plugins")
}

pub fn plugin_cache_path() -> PathBuf {
    cache_dir().join("plugins.json")
}
