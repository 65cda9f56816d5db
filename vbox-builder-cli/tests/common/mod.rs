#![allow(dead_code)]

use assert_cmd::Command;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;
use vbox_shared::constants::envs;

/// `vboxbuild` with a clean environment for the variables it reads.
pub fn vboxbuild() -> Command {
    let bin_path = env!("CARGO_BIN_EXE_vboxbuild");
    let mut cmd = Command::new(bin_path);
    // You can override this with .timeout(Duration::from_secs(N))
    cmd.timeout(Duration::from_secs(30));
    cmd.env_remove(envs::VBOXBUILD_CONFIG)
        .env_remove(envs::VBOXBUILD_VBOXMANAGE)
        .env_remove(envs::VBOX_INSTALL_PATH)
        .env_remove("RUST_LOG");
    cmd
}

/// Write `content` to a temporary config file with the given extension.
pub fn config_file(extension: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("vboxbuild-")
        .suffix(extension)
        .tempfile()
        .expect("Failed to create config file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config file");
    file
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}
