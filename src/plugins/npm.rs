use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::{debug, info};

use super::PackageInstaller;
use crate::error::{BuildError, Result};

/// Installs packages with `npm install` inside the core plugins directory.
#[derive(Clone, Debug)]
pub struct NpmInstaller {
    program: PathBuf,
    dir: PathBuf,
}

impl NpmInstaller {
    pub fn new(program: impl Into<PathBuf>, dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            dir: dir.into(),
        }
    }

    fn command(&self, packages: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("install")
            .arg("--no-save")
            .args(packages)
            .current_dir(&self.dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl PackageInstaller for NpmInstaller {
    fn install_packages(&self, packages: &[String]) -> Result<()> {
        let failed = |reason: String| BuildError::Install {
            packages: packages.join(" "),
            reason,
        };
        debug!(
            "npm: running {} install in {}",
            self.program.display(),
            self.dir.display()
        );
        let status = self
            .command(packages)
            .status()
            .map_err(|e| failed(format!("failed to run {}: {e}", self.program.display())))?;
        if !status.success() {
            return Err(failed(format!("npm exited with {status}")));
        }
        info!("npm: installed {} package(s)", packages.len());
        Ok(())
    }
}
