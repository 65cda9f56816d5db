//! Build steps.
//!
//! ```text
//! CreateVm ──→ VBoxManage
//!   produces     consumes
//!   vm_name      vm_name
//! ```

pub mod create_vm;
pub mod vboxmanage;

pub use create_vm::StepCreateVm;
pub use vboxmanage::StepVBoxManage;
