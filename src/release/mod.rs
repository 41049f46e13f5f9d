//! Release manifest assembly.
//!
//! A manifest lists one build per `<os>-<arch>` platform for a single
//! version and channel, each pointing at its public download URL together
//! with the archive's checksums.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;

use crate::error::{BuildError, Result};

pub mod checksum;
pub mod filename;

pub const DEFAULT_BASE_URL: &str = "https://cli-assets.heroku.com/branches";

const RELEASED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Build {
    pub url: String,
    pub sha1: String,
    pub sha256: String,
}

/// The `manifest.json` published for a release.
#[derive(Clone, Debug, Serialize)]
pub struct Manifest {
    released_at: String,
    version: String,
    channel: String,
    builds: BTreeMap<String, Build>,
}

impl Manifest {
    pub fn released_at(&self) -> &str {
        &self.released_at
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn builds(&self) -> &BTreeMap<String, Build> {
        &self.builds
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Clone, Debug)]
pub struct ManifestBuilder {
    base_url: String,
    version: String,
    channel: String,
}

impl ManifestBuilder {
    pub fn new(version: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            version: version.into(),
            channel: channel.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn build<P: AsRef<Path>>(&self, targets: &[P]) -> Result<Manifest> {
        self.build_at(targets, Utc::now())
    }

    /// Assemble the manifest, stamping it with `released_at`.
    ///
    /// Targets are processed in order. Two archives for the same platform
    /// keep the later one. Any unreadable or misnamed archive fails the
    /// whole build; no partial manifest is returned.
    pub fn build_at<P: AsRef<Path>>(
        &self,
        targets: &[P],
        released_at: DateTime<Utc>,
    ) -> Result<Manifest> {
        if targets.is_empty() {
            return Err(BuildError::NoTargets);
        }
        let mut builds = BTreeMap::new();
        for target in targets {
            let path = target.as_ref();
            let platform = filename::parse_platform(path)?;
            // parse_platform only accepts UTF-8 file names.
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| BuildError::UnrecognizedArchive {
                    path: path.to_path_buf(),
                })?;
            debug!("manifest: hashing {}", path.display());
            let digests = checksum::file_digests(path)?;
            let build = Build {
                url: self.artifact_url(filename),
                sha1: digests.sha1,
                sha256: digests.sha256,
            };
            let key = platform.key();
            info!("manifest: {key} -> {}", build.url);
            if let Some(previous) = builds.insert(key.clone(), build) {
                warn!(
                    "manifest: {} replaces earlier build for {key} ({})",
                    path.display(),
                    previous.url
                );
            }
        }

        Ok(Manifest {
            released_at: released_at.format(RELEASED_AT_FORMAT).to_string(),
            version: self.version.clone(),
            channel: self.channel.clone(),
            builds,
        })
    }

    fn artifact_url(&self, filename: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.channel,
            self.version,
            filename
        )
    }
}
