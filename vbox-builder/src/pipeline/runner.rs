//! Sequential step runner.

use super::{BuildState, Step, StepAction};

/// Runs steps in order and cleans them up in reverse.
///
/// Stops at the first step that returns [`StepAction::Halt`]. Every step
/// whose `run` was invoked (the halting one included) gets `cleanup`, last
/// step first.
pub struct StepRunner {
    steps: Vec<Box<dyn Step>>,
}

impl StepRunner {
    pub fn new(steps: Vec<Box<dyn Step>>) -> Self {
        Self { steps }
    }

    /// Run all steps, then clean up. Returns the last step's action.
    pub fn run(&mut self, state: &mut BuildState) -> StepAction {
        let mut ran = 0;
        let mut action = StepAction::Continue;

        for step in self.steps.iter_mut() {
            tracing::info!(step = step.name(), "Running step");
            ran += 1;
            action = step.run(state);

            if action == StepAction::Halt {
                tracing::warn!(step = step.name(), "Step halted the build");
                break;
            }
        }

        for step in self.steps[..ran].iter_mut().rev() {
            tracing::debug!(step = step.name(), "Cleaning up step");
            step.cleanup(state);
        }

        action
    }
}
