//! Integration tests for the VM creation step (run + cleanup).

use vbox_builder::steps::StepCreateVm;
use vbox_builder::{BuildConfig, BuildError, BuildState, Step, StepAction};
use vbox_test_utils::{RecordingDriver, RecordingUi, SIMULATED_FAILURE};

// ============================================================================
// TEST FIXTURES
// ============================================================================

struct TestContext {
    driver: RecordingDriver,
    ui: RecordingUi,
    state: BuildState,
    step: StepCreateVm,
}

impl TestContext {
    fn new(driver: RecordingDriver) -> Self {
        let config = BuildConfig {
            vm_name: "test-vm".into(),
            guest_os_type: "Linux_64".into(),
            ..Default::default()
        };
        let ui = RecordingUi::new();
        let state = BuildState::new(config, Box::new(driver.clone()), Box::new(ui.clone()));
        Self {
            driver,
            ui,
            state,
            step: StepCreateVm::new(),
        }
    }

    fn run(&mut self) -> StepAction {
        self.step.run(&mut self.state)
    }

    fn cleanup(&mut self) {
        self.step.cleanup(&mut self.state);
    }
}

const CREATE_COMMANDS: [&str; 4] = [
    "createvm --name test-vm --ostype Linux_64 --register",
    "modifyvm test-vm --boot1 disk --boot2 dvd --boot3 none --boot4 none",
    "modifyvm test-vm --cpus 1",
    "modifyvm test-vm --memory 512",
];

const DELETE_COMMAND: &str = "unregistervm test-vm --delete";

// ============================================================================
// RUN
// ============================================================================

#[test]
fn all_commands_succeed_publishes_vm_name() {
    let mut ctx = TestContext::new(RecordingDriver::new());

    assert_eq!(ctx.run(), StepAction::Continue);

    assert_eq!(ctx.driver.call_lines(), CREATE_COMMANDS);
    assert_eq!(ctx.state.vm_name(), Some("test-vm"));
    assert!(ctx.state.error().is_none());
    assert_eq!(ctx.ui.says(), vec!["Creating virtual machine..."]);
    assert!(ctx.ui.errors().is_empty());
}

#[test]
fn first_command_failure_writes_nothing() {
    let mut ctx = TestContext::new(RecordingDriver::failing_on_call(1));

    assert_eq!(ctx.run(), StepAction::Halt);

    assert_eq!(ctx.driver.call_lines(), &CREATE_COMMANDS[..1]);
    assert_eq!(ctx.state.vm_name(), None);
    assert!(ctx.step.created_vm().is_none());
    assert_eq!(
        ctx.ui.errors(),
        vec![format!("Error creating VM: VBoxManage error: {}", SIMULATED_FAILURE)]
    );
    assert!(matches!(ctx.state.error(), Some(BuildError::Step { .. })));
}

#[test]
fn third_command_failure_halts_without_running_the_rest() {
    let mut ctx = TestContext::new(RecordingDriver::failing_on_call(3));

    assert_eq!(ctx.run(), StepAction::Halt);

    // Two succeeded, the CPU command failed, memory was never attempted.
    assert_eq!(ctx.driver.call_lines(), &CREATE_COMMANDS[..3]);
    assert_eq!(ctx.state.vm_name(), None);
    assert_eq!(ctx.step.created_vm(), Some("test-vm"));

    let err = ctx.state.error().expect("halting error recorded");
    assert!(err.to_string().starts_with("Error creating VM: "));
    assert_eq!(
        err.failed_args().map(|a| a.join(" ")),
        Some(CREATE_COMMANDS[2].to_string())
    );
}

#[test]
fn last_command_failure_still_records_name_for_cleanup() {
    let mut ctx = TestContext::new(RecordingDriver::failing_on_arg("--memory"));

    assert_eq!(ctx.run(), StepAction::Halt);
    assert_eq!(ctx.driver.call_count(), 4);
    assert_eq!(ctx.step.created_vm(), Some("test-vm"));
    assert_eq!(ctx.state.vm_name(), None);
}

// ============================================================================
// CLEANUP
// ============================================================================

#[test]
fn cleanup_without_created_vm_is_noop() {
    let mut ctx = TestContext::new(RecordingDriver::failing_on_call(1));
    ctx.run();
    let calls_before = ctx.driver.call_count();

    ctx.cleanup();

    assert_eq!(ctx.driver.call_count(), calls_before);
    assert!(!ctx
        .ui
        .says()
        .iter()
        .any(|s| s.contains("Unregistering")));
}

#[test]
fn cleanup_before_run_is_noop() {
    let mut ctx = TestContext::new(RecordingDriver::new());
    ctx.cleanup();
    assert_eq!(ctx.driver.call_count(), 0);
    assert!(ctx.ui.events().is_empty());
}

#[test]
fn cleanup_after_success_deletes_vm_once() {
    let mut ctx = TestContext::new(RecordingDriver::new());
    ctx.run();

    ctx.cleanup();

    let calls = ctx.driver.call_lines();
    assert_eq!(calls.len(), 5);
    assert_eq!(calls[4], DELETE_COMMAND);
    assert_eq!(
        ctx.ui.says().last().map(String::as_str),
        Some("Unregistering and deleting virtual machine...")
    );
}

#[test]
fn cleanup_after_partial_failure_deletes_vm() {
    let mut ctx = TestContext::new(RecordingDriver::failing_on_call(3));
    ctx.run();

    ctx.cleanup();

    let mut expected: Vec<&str> = CREATE_COMMANDS[..3].to_vec();
    expected.push(DELETE_COMMAND);
    assert_eq!(ctx.driver.call_lines(), expected);
}

#[test]
fn cleanup_failure_is_reported_not_propagated() {
    let mut ctx = TestContext::new(RecordingDriver::failing_on_arg("unregistervm"));
    assert_eq!(ctx.run(), StepAction::Continue);

    ctx.cleanup();

    assert_eq!(ctx.driver.call_count(), 5);
    assert_eq!(
        ctx.ui.errors(),
        vec![format!(
            "Error deleting virtual machine: VBoxManage error: {}",
            SIMULATED_FAILURE
        )]
    );
    // The build's own outcome is untouched.
    assert!(ctx.state.error().is_none());
    assert_eq!(ctx.state.vm_name(), Some("test-vm"));
}
