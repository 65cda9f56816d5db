//! Shell script standing in for the VBoxManage binary.

use crate::SIMULATED_FAILURE;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vbox_shared::constants::vboxmanage;

/// Version the fake prints for `--version`.
pub const FAKE_VERSION: &str = "7.0.14r161095";

/// Executable `VBoxManage` script in a temporary directory.
///
/// Appends each invocation's arguments to `calls.log`. Prints a version for
/// `--version`. Optionally fails any call with a given argument.
pub struct FakeVBoxManage {
    dir: TempDir,
    path: PathBuf,
    log: PathBuf,
}

impl FakeVBoxManage {
    /// Fake on which every call succeeds.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Fake that exits 1 with a VBoxManage-style error whenever `arg` is one
    /// of the arguments.
    pub fn failing_on(arg: &str) -> Self {
        Self::build(Some(arg))
    }

    fn build(fail_on: Option<&str>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(vboxmanage::BINARY);
        let log = dir.path().join("calls.log");

        let failure = match fail_on {
            Some(arg) => format!(
                "case \" $* \" in\n  *\" {} \"*) echo '{}' >&2; exit 1 ;;\nesac\n",
                arg, SIMULATED_FAILURE
            ),
            None => String::new(),
        };

        let script = format!(
            "#!/bin/sh\n\
             echo \"$*\" >> '{log}'\n\
             if [ \"$1\" = \"--version\" ]; then\n  echo '{version}'\n  exit 0\nfi\n\
             {failure}\
             exit 0\n",
            log = log.display(),
            version = FAKE_VERSION,
            failure = failure,
        );

        std::fs::write(&path, script).expect("Failed to write fake VBoxManage");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake VBoxManage executable");

        Self { dir, path, log }
    }

    /// Path of the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the executable (usable as `VBOX_INSTALL_PATH`).
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Every invocation so far, one line of space-joined arguments each.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl Default for FakeVBoxManage {
    fn default() -> Self {
        Self::new()
    }
}
