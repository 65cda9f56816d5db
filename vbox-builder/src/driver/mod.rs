//! Hypervisor driver abstraction.

mod vboxmanage;

pub use vboxmanage::VBoxManageDriver;

use vbox_shared::errors::BuildResult;

/// Executes management commands against VirtualBox.
///
/// Implemented by [`VBoxManageDriver`] for real hosts and by recording
/// doubles in tests.
pub trait Driver {
    /// Run `VBoxManage <args...>`.
    ///
    /// Succeeds only if the command succeeded; the error carries the
    /// arguments and VBoxManage's own message.
    fn vbox_manage(&self, args: &[String]) -> BuildResult<()>;

    /// Check that the tool is usable and return its version.
    fn verify(&self) -> BuildResult<String>;
}
