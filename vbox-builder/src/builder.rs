//! Build orchestration.
//!
//! Wires the configuration, driver and UI into a [`BuildState`] and runs the
//! step list with [`StepRunner`].

use crate::config::BuildConfig;
use crate::driver::Driver;
use crate::pipeline::{BuildState, Step, StepAction, StepRunner};
use crate::steps::{StepCreateVm, StepVBoxManage};
use crate::ui::Ui;
use vbox_shared::errors::{BuildError, BuildResult};

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Name the VM was created under.
    pub vm_name: String,
}

/// Runs one build.
///
/// # Example
///
/// ```ignore
/// let mut config = BuildConfig::from_file(path)?;
/// config.prepare("ubuntu")?;
/// let driver = VBoxManageDriver::discover(config.vboxmanage_path.as_deref())?;
/// let outcome = Builder::new(config, Box::new(driver), Box::new(ConsoleUi::stdio())).run()?;
/// ```
pub struct Builder {
    state: BuildState,
}

impl Builder {
    /// Create a builder. `config` should already be prepared.
    pub fn new(config: BuildConfig, driver: Box<dyn Driver>, ui: Box<dyn Ui>) -> Self {
        Self {
            state: BuildState::new(config, driver, ui),
        }
    }

    /// Steps executed by [`Builder::run`], in order.
    pub fn steps() -> Vec<Box<dyn Step>> {
        vec![
            Box::new(StepCreateVm::new()),
            Box::new(StepVBoxManage),
        ]
    }

    /// Run all steps, then clean up.
    ///
    /// Cleanup always runs, so a VM created here is unregistered and deleted
    /// before this returns.
    pub fn run(mut self) -> BuildResult<BuildOutcome> {
        tracing::info!(vm_name = %self.state.config().vm_name, "Starting build");

        let mut runner = StepRunner::new(Self::steps());
        match runner.run(&mut self.state) {
            StepAction::Continue => {
                let vm_name = self
                    .state
                    .vm_name()
                    .map(str::to_owned)
                    .ok_or(BuildError::State("vm_name"))?;
                tracing::info!(vm_name = %vm_name, "Build finished");
                Ok(BuildOutcome { vm_name })
            }
            StepAction::Halt => Err(self
                .state
                .take_error()
                .unwrap_or(BuildError::State("error"))),
        }
    }
}
