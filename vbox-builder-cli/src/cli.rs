use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vbox_builder::BuildConfig;
use vbox_shared::constants::{envs, vm_defaults};

#[derive(Parser, Debug)]
#[command(
    name = "vboxbuild",
    author,
    version,
    about = "Create VirtualBox virtual machines through VBoxManage"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalFlags {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the VM, run custom commands, then unregister and delete it
    Build(crate::commands::build::BuildArgs),

    /// Check a configuration without touching VirtualBox
    Validate(crate::commands::validate::ValidateArgs),
}

/// Configuration file plus per-field overrides, shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Configuration file (YAML, or JSON with a .json extension)
    #[arg(short, long, env = envs::VBOXBUILD_CONFIG)]
    pub config: Option<PathBuf>,

    /// Build name, used to derive the default VM name
    #[arg(long, default_value = vm_defaults::BUILD_NAME)]
    pub name: String,

    /// VM name (default: vboxbuild-<build name>)
    #[arg(long)]
    pub vm_name: Option<String>,

    /// VirtualBox guest OS type (default: Other)
    #[arg(long)]
    pub guest_os_type: Option<String>,

    /// Number of CPUs
    #[arg(long)]
    pub cpus: Option<u32>,

    /// Memory in MiB
    #[arg(long)]
    pub memory: Option<u32>,

    /// Path to the VBoxManage binary
    #[arg(long, env = envs::VBOXBUILD_VBOXMANAGE)]
    pub vboxmanage_path: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load the file (if any), apply overrides, fill defaults and validate.
    pub fn load(&self) -> anyhow::Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => BuildConfig::default(),
        };

        if let Some(vm_name) = &self.vm_name {
            config.vm_name = vm_name.clone();
        }
        if let Some(guest_os_type) = &self.guest_os_type {
            config.guest_os_type = guest_os_type.clone();
        }
        if let Some(cpus) = self.cpus {
            config.cpus = cpus;
        }
        if let Some(memory) = self.memory {
            config.memory_mib = memory;
        }
        if let Some(path) = &self.vboxmanage_path {
            config.vboxmanage_path = Some(path.clone());
        }

        config.prepare(&self.name)?;
        Ok(config)
    }
}
