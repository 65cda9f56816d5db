//! Custom VBoxManage commands.
//!
//! Runs the user-configured `vboxmanage` commands against the VM created by
//! [`StepCreateVm`](super::StepCreateVm).

use crate::pipeline::{BuildState, Step, StepAction};
use gtmpl_value::Value;
use std::collections::HashMap;
use vbox_shared::errors::{BuildError, BuildResult};

const NAME_FIELD: &str = "Name";

/// Executes custom VBoxManage commands in order.
///
/// Consumes: `vm_name`. Has nothing to clean up.
#[derive(Debug, Default)]
pub struct StepVBoxManage;

impl Step for StepVBoxManage {
    fn name(&self) -> &'static str {
        "vboxmanage"
    }

    fn run(&mut self, state: &mut BuildState) -> StepAction {
        let commands = state.config().vboxmanage.clone();
        if commands.is_empty() {
            return StepAction::Continue;
        }

        let Some(vm_name) = state.vm_name().map(str::to_owned) else {
            let err = BuildError::step("Error executing command", BuildError::State("vm_name"));
            state.ui().error(&err.to_string());
            state.halt(err);
            return StepAction::Halt;
        };

        state.ui().say("Executing custom VBoxManage commands...");
        for command in &commands {
            let result = command
                .iter()
                .map(|arg| render_vm_name(arg, &vm_name))
                .collect::<BuildResult<Vec<String>>>()
                .and_then(|rendered| {
                    state
                        .ui()
                        .message(&format!("Executing: {}", rendered.join(" ")));
                    state.driver().vbox_manage(&rendered)
                });

            if let Err(e) = result {
                let err = BuildError::step("Error executing command", e);
                state.ui().error(&err.to_string());
                state.halt(err);
                return StepAction::Halt;
            }
        }

        StepAction::Continue
    }

    fn cleanup(&mut self, _state: &mut BuildState) {}
}

/// Render a command argument as a Go text/template.
///
/// The template data exposes the VM name as `.Name`.
pub fn render_vm_name(arg: &str, vm_name: &str) -> BuildResult<String> {
    gtmpl::template(arg, template_data(vm_name))
        .map_err(|e| BuildError::Template(format!("'{}': {}", arg, e)))
}

fn template_data(vm_name: &str) -> Value {
    let mut fields = HashMap::new();
    fields.insert(NAME_FIELD.to_string(), Value::String(vm_name.to_string()));
    Value::Object(fields)
}
