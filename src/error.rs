use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(
        "{}: filename does not match <product>-v<major>.<minor>.<patch>-<label>-<os>-<arch>.tar.xz",
        path.display()
    )]
    UnrecognizedArchive { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no target archives given")]
    NoTargets,

    #[error("failed to parse {}: {source}", path.display())]
    DescriptorParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: missing `dependencies` field", path.display())]
    MissingDependencies { path: PathBuf },

    #[error("failed to install {packages}: {reason}")]
    Install { packages: String, reason: String },

    #[error("failed to parse plugin {name}: {reason}")]
    PluginParse { name: String, reason: String },

    #[error("failed to cache plugin {name}: {reason}")]
    PluginCache { name: String, reason: String },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write manifest: {0}")]
    Output(#[source] io::Error),
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = BuildError::UnrecognizedArchive {
            path: PathBuf::from("/out/readme.txt"),
        };
        assert!(err.to_string().starts_with("/out/readme.txt: filename does not match"));

        let err = BuildError::io(
            "/out/missing.tar.xz",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "/out/missing.tar.xz: not found");

        let err = BuildError::PluginParse {
            name: "heroku-apps".into(),
            reason: "no package.json".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse plugin heroku-apps: no package.json"
        );
    }
}
