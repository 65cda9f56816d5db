//! VirtualBox VM provisioning through `VBoxManage`.
//!
//! ## Architecture
//!
//! A build is a list of steps executed by [`StepRunner`]:
//!
//! ```text
//! 1. CreateVm ──→ 2. VBoxManage (custom commands)
//!
//! Run:     in order, stop at the first Halt
//! Cleanup: every step that ran, in reverse order
//! ```
//!
//! Steps share a typed [`BuildState`] holding the configuration, the
//! [`Driver`] and the [`Ui`], plus the values steps publish for each other.

pub mod builder;
pub mod config;
pub mod driver;
pub mod pipeline;
pub mod steps;
pub mod ui;

pub use builder::{BuildOutcome, Builder};
pub use config::BuildConfig;
pub use driver::{Driver, VBoxManageDriver};
pub use pipeline::{BuildState, Step, StepAction, StepRunner};
pub use ui::{ConsoleUi, Ui};
pub use vbox_shared::{BuildError, BuildResult};
