//! Typed run-state shared between steps.

use crate::config::BuildConfig;
use crate::driver::Driver;
use crate::ui::Ui;
use vbox_shared::errors::BuildError;

/// Run-state for one build.
///
/// Inputs (config, driver, ui) are injected at construction and read-only.
/// Outputs are `Option` fields written by the step that produces them.
pub struct BuildState {
    config: BuildConfig,
    driver: Box<dyn Driver>,
    ui: Box<dyn Ui>,

    /// Name of the created VM. Written once by `StepCreateVm`.
    vm_name: Option<String>,
    /// Error of the step that halted the build.
    error: Option<BuildError>,
}

impl BuildState {
    pub fn new(config: BuildConfig, driver: Box<dyn Driver>, ui: Box<dyn Ui>) -> Self {
        Self {
            config,
            driver,
            ui,
            vm_name: None,
            error: None,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    pub fn ui(&self) -> &dyn Ui {
        self.ui.as_ref()
    }

    /// Name of the created VM, once published.
    pub fn vm_name(&self) -> Option<&str> {
        self.vm_name.as_deref()
    }

    /// Publish the created VM's name for later steps.
    pub fn publish_vm_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        tracing::debug!(vm_name = %name, "Published VM name");
        self.vm_name = Some(name);
    }

    /// Record the error that halts the build.
    pub fn halt(&mut self, err: BuildError) {
        tracing::debug!(error = %err, "Recorded halting error");
        self.error = Some(err);
    }

    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    /// Take ownership of the halting error (for the result path).
    pub fn take_error(&mut self) -> Option<BuildError> {
        self.error.take()
    }
}

impl std::fmt::Debug for BuildState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildState")
            .field("config", &self.config)
            .field("vm_name", &self.vm_name)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
