//! Test doubles for vboxbuild.
//!
//! - [`RecordingDriver`]: records every VBoxManage call, optionally failing one
//! - [`RecordingUi`]: records every message shown to the user
//! - [`FakeVBoxManage`]: a shell script standing in for the real binary (unix)

use parking_lot::Mutex;
use std::sync::Arc;
use vbox_builder::{Driver, Ui};
use vbox_shared::{BuildError, BuildResult};

#[cfg(unix)]
mod fake_binary;
#[cfg(unix)]
pub use fake_binary::{FAKE_VERSION, FakeVBoxManage};

/// Message printed by doubles when they simulate a failure.
pub const SIMULATED_FAILURE: &str = "VBoxManage: error: simulated failure";

// ============================================================================
// Driver
// ============================================================================

#[derive(Default)]
struct DriverLog {
    calls: Vec<Vec<String>>,
    fail_on_call: Option<usize>,
    fail_on_arg: Option<String>,
}

/// Driver that records calls instead of running VBoxManage.
///
/// Clones share the same log, so a test keeps one clone and hands the other
/// to the build.
#[derive(Clone, Default)]
pub struct RecordingDriver {
    log: Arc<Mutex<DriverLog>>,
}

impl RecordingDriver {
    /// Driver on which every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`-th call (1-based). Calls are recorded either way.
    pub fn failing_on_call(n: usize) -> Self {
        let driver = Self::new();
        driver.log.lock().fail_on_call = Some(n);
        driver
    }

    /// Fail every call that contains `arg` as one of its arguments.
    pub fn failing_on_arg(arg: impl Into<String>) -> Self {
        let driver = Self::new();
        driver.log.lock().fail_on_arg = Some(arg.into());
        driver
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.log.lock().calls.clone()
    }

    /// Every call joined with spaces, for readable assertions.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.join(" ")).collect()
    }

    pub fn call_count(&self) -> usize {
        self.log.lock().calls.len()
    }
}

impl Driver for RecordingDriver {
    fn vbox_manage(&self, args: &[String]) -> BuildResult<()> {
        let mut log = self.log.lock();
        log.calls.push(args.to_vec());

        let by_index = log.fail_on_call == Some(log.calls.len());
        let by_arg = log
            .fail_on_arg
            .as_ref()
            .is_some_and(|needle| args.iter().any(|a| a == needle));

        if by_index || by_arg {
            return Err(BuildError::command(args, SIMULATED_FAILURE));
        }
        Ok(())
    }

    fn verify(&self) -> BuildResult<String> {
        Ok("7.0.14r161095".to_string())
    }
}

// ============================================================================
// UI
// ============================================================================

/// One message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Say(String),
    Message(String),
    Error(String),
}

/// UI that records messages instead of printing them.
#[derive(Clone, Default)]
pub struct RecordingUi {
    events: Arc<Mutex<Vec<UiEvent>>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().clone()
    }

    pub fn says(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Say(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn messages(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Message(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Error(m) => Some(m.clone()),
            _ => None,
        })
    }

    fn collect(&self, pick: impl Fn(&UiEvent) -> Option<String>) -> Vec<String> {
        self.events.lock().iter().filter_map(pick).collect()
    }
}

impl Ui for RecordingUi {
    fn say(&self, message: &str) {
        self.events.lock().push(UiEvent::Say(message.to_string()));
    }

    fn message(&self, message: &str) {
        self.events.lock().push(UiEvent::Message(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.events.lock().push(UiEvent::Error(message.to_string()));
    }
}

/// Build an argument list from string literals.
pub fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
