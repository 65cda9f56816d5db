//! Build configuration.

use crate::steps::vboxmanage::render_vm_name;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vbox_shared::constants::vm_defaults;
use vbox_shared::errors::{BuildError, BuildResult};

/// Desired VM settings for one build.
///
/// Loaded from a YAML or JSON file, overridden by CLI flags, then completed
/// by [`BuildConfig::prepare`]. Steps only ever read it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Name the VM is registered under.
    ///
    /// Default: `vboxbuild-<build name>`
    #[serde(default)]
    pub vm_name: String,

    /// VirtualBox guest OS type identifier (see `VBoxManage list ostypes`).
    ///
    /// Default: `Other`
    #[serde(default)]
    pub guest_os_type: String,

    /// Number of virtual CPUs.
    #[serde(default = "default_cpus")]
    pub cpus: u32,

    /// Memory size in MiB.
    #[serde(default = "default_memory_mib")]
    pub memory_mib: u32,

    /// Boot device order, up to four entries. Missing slots are `none`.
    #[serde(default = "default_boot_order")]
    pub boot_order: Vec<String>,

    /// Extra VBoxManage commands run after the VM is created.
    ///
    /// Each argument is a Go template; `{{.Name}}` expands to the VM name.
    #[serde(default)]
    pub vboxmanage: Vec<Vec<String>>,

    /// Explicit path to the VBoxManage binary. Skips discovery when set.
    #[serde(default)]
    pub vboxmanage_path: Option<PathBuf>,
}

// Default value functions for BuildConfig

fn default_cpus() -> u32 {
    vm_defaults::CPUS
}

fn default_memory_mib() -> u32 {
    vm_defaults::MEMORY_MIB
}

fn default_boot_order() -> Vec<String> {
    vm_defaults::BOOT_ORDER
        .iter()
        .map(|d| d.to_string())
        .collect()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            vm_name: String::new(),
            guest_os_type: String::new(),
            cpus: default_cpus(),
            memory_mib: default_memory_mib(),
            boot_order: default_boot_order(),
            vboxmanage: Vec::new(),
            vboxmanage_path: None,
        }
    }
}

impl BuildConfig {
    /// Load a configuration file.
    ///
    /// `.json` files are parsed as JSON, everything else as YAML.
    pub fn from_file(path: &Path) -> BuildResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| BuildError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Fill in defaults and validate.
    ///
    /// All problems are collected and returned together in one
    /// [`BuildError::Config`].
    pub fn prepare(&mut self, build_name: &str) -> BuildResult<()> {
        let build_name = match build_name.trim() {
            "" => vm_defaults::BUILD_NAME,
            name => name,
        };

        if self.vm_name.is_empty() {
            self.vm_name = format!("{}-{}", vm_defaults::VM_NAME_PREFIX, build_name);
        }
        if self.guest_os_type.is_empty() {
            self.guest_os_type = vm_defaults::GUEST_OS_TYPE.to_string();
        }

        let problems = self.validate();
        if !problems.is_empty() {
            return Err(BuildError::Config(problems));
        }

        tracing::debug!(
            vm_name = %self.vm_name,
            guest_os_type = %self.guest_os_type,
            cpus = self.cpus,
            memory_mib = self.memory_mib,
            "Prepared build configuration"
        );

        Ok(())
    }

    /// The four `--bootN` values, padded with `none`.
    pub fn boot_slots(&self) -> [&str; vm_defaults::BOOT_SLOTS] {
        let mut slots = ["none"; vm_defaults::BOOT_SLOTS];
        for (slot, device) in slots.iter_mut().zip(&self.boot_order) {
            *slot = device.as_str();
        }
        slots
    }

    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.vm_name.trim().is_empty() {
            problems.push("vm_name must not be empty".to_string());
        } else if self.vm_name.chars().any(char::is_control) {
            problems.push("vm_name must not contain control characters".to_string());
        }

        if self.guest_os_type.chars().any(char::is_whitespace) {
            problems.push(format!(
                "guest_os_type '{}' must not contain whitespace",
                self.guest_os_type
            ));
        }

        if self.cpus < 1 {
            problems.push("cpus must be at least 1".to_string());
        }

        if self.memory_mib < vm_defaults::MIN_MEMORY_MIB {
            problems.push(format!(
                "memory_mib must be at least {}",
                vm_defaults::MIN_MEMORY_MIB
            ));
        }

        if self.boot_order.len() > vm_defaults::BOOT_SLOTS {
            problems.push(format!(
                "boot_order has {} entries, at most {} are allowed",
                self.boot_order.len(),
                vm_defaults::BOOT_SLOTS
            ));
        }
        for device in &self.boot_order {
            if !vm_defaults::BOOT_DEVICES.contains(&device.as_str()) {
                problems.push(format!(
                    "boot_order device '{}' is not one of: {}",
                    device,
                    vm_defaults::BOOT_DEVICES.join(", ")
                ));
            }
        }

        for (i, command) in self.vboxmanage.iter().enumerate() {
            if command.is_empty() {
                problems.push(format!("vboxmanage[{}] is empty", i));
                continue;
            }
            for arg in command {
                if let Err(e) = render_vm_name(arg, &self.vm_name) {
                    problems.push(format!("vboxmanage[{}]: {}", i, e));
                }
            }
        }

        problems
    }
}
