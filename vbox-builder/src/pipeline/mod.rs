//! Step pipeline.
//!
//! Each step has a forward action and a matching cleanup action.
//! Steps communicate only through [`BuildState`].

mod runner;
mod state;

pub use runner::StepRunner;
pub use state::BuildState;

/// What the runner should do after a step's `run`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepAction {
    /// Proceed to the next step.
    Continue,
    /// Stop the build. The step has stored its error in the state.
    Halt,
}

/// A single unit of work in the pipeline.
pub trait Step {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Forward action.
    ///
    /// On failure the step reports the error to the UI, stores it with
    /// [`BuildState::halt`] and returns [`StepAction::Halt`].
    fn run(&mut self, state: &mut BuildState) -> StepAction;

    /// Undo whatever `run` left behind.
    ///
    /// Called for every step whose `run` was invoked, whether the build
    /// succeeded or not. Failures are reported, never propagated.
    fn cleanup(&mut self, state: &mut BuildState);
}
