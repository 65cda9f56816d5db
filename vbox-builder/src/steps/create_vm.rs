//! Step 1: VM creation.
//!
//! Creates and registers the VM, then sets boot order, CPU count and memory.
//! Cleanup unregisters and deletes it.

use crate::config::BuildConfig;
use crate::pipeline::{BuildState, Step, StepAction};
use vbox_shared::errors::BuildError;

/// Creates the virtual machine.
///
/// Produces: `vm_name`, the name of the created VM.
#[derive(Debug, Default)]
pub struct StepCreateVm {
    /// Set after the first successful command so cleanup can remove a
    /// half-configured VM.
    vm_name: Option<String>,
}

impl StepCreateVm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name recorded for cleanup, if any command succeeded.
    pub fn created_vm(&self) -> Option<&str> {
        self.vm_name.as_deref()
    }
}

impl Step for StepCreateVm {
    fn name(&self) -> &'static str {
        "create-vm"
    }

    fn run(&mut self, state: &mut BuildState) -> StepAction {
        let name = state.config().vm_name.clone();
        let commands = create_commands(state.config());

        state.ui().say("Creating virtual machine...");
        for command in &commands {
            if let Err(e) = state.driver().vbox_manage(command) {
                let err = BuildError::step("Error creating VM", e);
                state.ui().error(&err.to_string());
                state.halt(err);
                return StepAction::Halt;
            }

            if self.vm_name.is_none() {
                tracing::info!(vm_name = %name, "VM registered");
                self.vm_name = Some(name.clone());
            }
        }

        state.publish_vm_name(name);
        StepAction::Continue
    }

    fn cleanup(&mut self, state: &mut BuildState) {
        let Some(name) = self.vm_name.as_deref() else {
            return;
        };

        state
            .ui()
            .say("Unregistering and deleting virtual machine...");
        let command = vec![
            "unregistervm".to_string(),
            name.to_string(),
            "--delete".to_string(),
        ];
        if let Err(e) = state.driver().vbox_manage(&command) {
            state
                .ui()
                .error(&format!("Error deleting virtual machine: {}", e));
        }
    }
}

/// The four commands that create and configure the VM, in order.
pub fn create_commands(config: &BuildConfig) -> Vec<Vec<String>> {
    let name = config.vm_name.as_str();
    let [boot1, boot2, boot3, boot4] = config.boot_slots();
    let cpus = config.cpus.to_string();
    let memory = config.memory_mib.to_string();

    vec![
        owned(&[
            "createvm",
            "--name",
            name,
            "--ostype",
            config.guest_os_type.as_str(),
            "--register",
        ]),
        owned(&[
            "modifyvm", name, "--boot1", boot1, "--boot2", boot2, "--boot3", boot3, "--boot4",
            boot4,
        ]),
        owned(&["modifyvm", name, "--cpus", cpus.as_str()]),
        owned(&["modifyvm", name, "--memory", memory.as_str()]),
    ]
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}
