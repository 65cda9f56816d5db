//! Driver backed by the `VBoxManage` command-line tool.

use super::Driver;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use vbox_shared::constants::{envs, vboxmanage};
use vbox_shared::errors::{BuildError, BuildResult};

/// Runs `VBoxManage` as a blocking subprocess.
#[derive(Debug, Clone)]
pub struct VBoxManageDriver {
    path: PathBuf,
}

impl VBoxManageDriver {
    /// Use the binary at `path` as-is.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate VBoxManage on this host.
    ///
    /// Search order:
    /// 1. `explicit` (from config or CLI); no fallback when given
    /// 2. each entry of `$VBOX_INSTALL_PATH`
    /// 3. each entry of `$PATH`
    ///
    /// # Errors
    ///
    /// Returns `BuildError::DriverNotFound` listing every searched location.
    pub fn discover(explicit: Option<&Path>) -> BuildResult<Self> {
        discover_in(
            explicit,
            std::env::var_os(envs::VBOX_INSTALL_PATH),
            std::env::var_os("PATH"),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run VBoxManage and return its trimmed stdout.
    fn output(&self, args: &[String]) -> BuildResult<String> {
        tracing::debug!(binary = %self.path.display(), args = ?args, "Executing VBoxManage");

        let output = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                BuildError::command(
                    args,
                    format!("failed to execute {}: {}", self.path.display(), e),
                )
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::debug!(stdout = %stdout, stderr = %stderr, status = %output.status, "VBoxManage finished");

        if !output.status.success() {
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(BuildError::command(args, message));
        }

        // VBoxManage sometimes exits 0 after printing an error.
        if reports_error(&stderr) {
            return Err(BuildError::command(args, stderr));
        }

        Ok(stdout)
    }
}

impl Driver for VBoxManageDriver {
    fn vbox_manage(&self, args: &[String]) -> BuildResult<()> {
        self.output(args).map(|_| ())
    }

    fn verify(&self) -> BuildResult<String> {
        let version = self.output(&["--version".to_string()])?;
        tracing::info!(binary = %self.path.display(), version = %version, "Found VBoxManage");
        Ok(version)
    }
}

fn reports_error(stderr: &str) -> bool {
    stderr
        .lines()
        .any(|line| line.starts_with("VBoxManage") && line.contains(vboxmanage::ERROR_MARKER))
}

fn discover_in(
    explicit: Option<&Path>,
    install_path: Option<OsString>,
    search_path: Option<OsString>,
) -> BuildResult<VBoxManageDriver> {
    let candidates: Vec<PathBuf> = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => install_path
            .iter()
            .chain(search_path.iter())
            .flat_map(|paths| std::env::split_paths(paths))
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(vboxmanage::BINARY))
            .collect(),
    };

    for candidate in &candidates {
        tracing::trace!(candidate = %candidate.display(), "Looking for VBoxManage");
        if candidate.is_file() {
            tracing::debug!(binary = %candidate.display(), "Found VBoxManage binary");
            return Ok(VBoxManageDriver::new(candidate.clone()));
        }
    }

    Err(BuildError::DriverNotFound {
        searched: candidates,
    })
}
