use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BuildError, Result};

static ARCHIVE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<product>[A-Za-z0-9_-]+?)-v\d+\.\d+\.\d+-(?P<label>\w+)-(?P<os>\w+)-(?P<arch>\w+)\.tar\.xz$",
    )
    .expect("archive name pattern is valid")
});

/// Operating system and architecture a release archive was built for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// Manifest key, `<os>-<arch>`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Extract the platform from a path like `/out/heroku-v7.1.0-beta-darwin-amd64.tar.xz`.
pub fn parse_platform(path: &Path) -> Result<Platform> {
    let unrecognized = || BuildError::UnrecognizedArchive {
        path: path.to_path_buf(),
    };
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(unrecognized)?;
    let captures = ARCHIVE_NAME.captures(filename).ok_or_else(unrecognized)?;
    Ok(Platform {
        os: captures["os"].to_owned(),
        arch: captures["arch"].to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(os: &str, arch: &str) -> Platform {
        Platform {
            os: os.into(),
            arch: arch.into(),
        }
    }

    #[test]
    fn parses_os_and_arch_from_archive_name() {
        let cases = [
            ("/out/heroku-v7.1.0-beta-darwin-amd64.tar.xz", platform("darwin", "amd64")),
            ("heroku-v7.10.22-stable-linux-arm.tar.xz", platform("linux", "arm")),
            ("dist/heroku-v10.0.0-dev-windows-386.tar.xz", platform("windows", "386")),
            ("heroku-cli-v1.2.3-rc1-freebsd-x86_64.tar.xz", platform("freebsd", "x86_64")),
        ];
        for (path, expected) in cases {
            assert_eq!(parse_platform(Path::new(path)).unwrap(), expected, "{path}");
        }
    }

    #[test]
    fn platform_key_joins_os_and_arch() {
        let parsed = parse_platform(Path::new("heroku-v7.1.0-beta-darwin-amd64.tar.xz")).unwrap();
        assert_eq!(parsed.key(), "darwin-amd64");
        assert_eq!(parsed.to_string(), "darwin-amd64");
    }

    #[test]
    fn rejects_names_outside_the_grammar() {
        let bad = [
            "/out/heroku-v7.1.0-beta-darwin-amd64.tar.gz",
            "/out/heroku-7.1.0-beta-darwin-amd64.tar.xz",
            "/out/heroku-v7.1-beta-darwin-amd64.tar.xz",
            "/out/heroku-v7.1.0-darwin-amd64.tar.xz",
            "/out/heroku-v7.1.0-beta-darwin-amd64.tar.xz.sig",
            "/out/heroku-v7.1.0-beta-darwin-amd64-extra.tar.xz",
            "/out/",
            "",
        ];
        for path in bad {
            let err = parse_platform(Path::new(path)).unwrap_err();
            assert!(
                matches!(err, BuildError::UnrecognizedArchive { .. }),
                "{path} should be rejected, got {err}"
            );
        }
    }

    #[test]
    fn error_names_the_full_path() {
        let err = parse_platform(Path::new("/out/notes.txt")).unwrap_err();
        assert!(err.to_string().contains("/out/notes.txt"));
    }
}
