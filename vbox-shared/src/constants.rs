//! Constants for vboxbuild
//!
//! Centralized location for hardcoded names, environment variables and defaults.

/// External management tool.
pub mod vboxmanage {
    /// Binary name searched for on the host.
    pub const BINARY: &str = if cfg!(windows) {
        "VBoxManage.exe"
    } else {
        "VBoxManage"
    };

    /// Marker VBoxManage prints on stderr when a command fails, even with exit status 0.
    pub const ERROR_MARKER: &str = ": error:";
}

pub mod envs {
    /// Directory (or search path) holding the VirtualBox installation.
    pub const VBOX_INSTALL_PATH: &str = "VBOX_INSTALL_PATH";

    /// Explicit path to the VBoxManage binary (CLI override).
    pub const VBOXBUILD_VBOXMANAGE: &str = "VBOXBUILD_VBOXMANAGE";

    /// Build configuration file (CLI override).
    pub const VBOXBUILD_CONFIG: &str = "VBOXBUILD_CONFIG";
}

/// Virtual machine defaults
pub mod vm_defaults {
    /// Build name used when none is given
    pub const BUILD_NAME: &str = "virtualbox";

    /// Prefix of generated VM names (`<prefix>-<build name>`)
    pub const VM_NAME_PREFIX: &str = "vboxbuild";

    /// VirtualBox guest OS type when none is configured
    pub const GUEST_OS_TYPE: &str = "Other";

    /// Default number of CPUs
    pub const CPUS: u32 = 1;

    /// Default memory in MiB
    pub const MEMORY_MIB: u32 = 512;

    /// Smallest memory size VirtualBox accepts, in MiB
    pub const MIN_MEMORY_MIB: u32 = 4;

    /// Boot device order (`--boot1` .. `--boot4`)
    pub const BOOT_ORDER: [&str; 4] = ["disk", "dvd", "none", "none"];

    /// Number of boot slots VirtualBox exposes
    pub const BOOT_SLOTS: usize = 4;

    /// Values accepted by `modifyvm --bootN`
    pub const BOOT_DEVICES: &[&str] = &["none", "floppy", "dvd", "disk", "net"];
}
