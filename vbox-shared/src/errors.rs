//! Error types for the build pipeline.
//!
//! Errors are categorized by where they surface:
//! - [`BuildError::Command`]: an external `VBoxManage` invocation failed
//! - [`BuildError::Step`]: a step failed and wrapped the cause with context
//! - [`BuildError::Config`]: configuration is invalid (user-fixable)

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the workspace.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that can occur while preparing or running a build.
///
/// ```ignore
/// match builder.run() {
///     Err(BuildError::Step { .. }) => { /* a step halted the build */ }
///     Err(BuildError::Config(_)) => { /* user should fix config */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Error)]
pub enum BuildError {
    /// External management command failed (non-zero exit, reported error, or spawn failure).
    #[error("VBoxManage error: {message}")]
    Command { args: Vec<String>, message: String },

    /// The `VBoxManage` binary could not be located.
    #[error("VBoxManage not found.\nSearched locations:\n{}", format_locations(.searched))]
    DriverNotFound { searched: Vec<PathBuf> },

    /// One or more configuration problems.
    #[error("invalid configuration:\n{}", format_problems(.0))]
    Config(Vec<String>),

    /// A step failed; `context` is the human-readable prefix shown to the user.
    ///
    /// The cause is rendered in the message and is not exposed as `source()`.
    #[error("{context}: {cause}")]
    Step {
        context: String,
        cause: Box<BuildError>,
    },

    /// A step needed a run-state value that an earlier step never produced.
    #[error("missing run-state value: {0}")]
    State(&'static str),

    /// An argument template could not be rendered.
    #[error("template: {0}")]
    Template(String),

    /// Failed to parse a configuration file.
    #[error("parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Generic IO error (catch-all).
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl BuildError {
    /// Create a command failure for the given argument list.
    pub fn command(args: &[String], message: impl Into<String>) -> Self {
        Self::Command {
            args: args.to_vec(),
            message: message.into(),
        }
    }

    /// Wrap an error with step context.
    pub fn step(context: impl Into<String>, cause: BuildError) -> Self {
        Self::Step {
            context: context.into(),
            cause: Box::new(cause),
        }
    }

    /// Arguments of the failing command, if this error (or its cause) is a command failure.
    pub fn failed_args(&self) -> Option<&[String]> {
        match self {
            Self::Command { args, .. } => Some(args),
            Self::Step { cause, .. } => cause.failed_args(),
            _ => None,
        }
    }
}

fn format_locations(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "  (none: set vboxmanage_path or VBOX_INSTALL_PATH)".to_string();
    }
    searched
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_problems(problems: &[String]) -> String {
    problems
        .iter()
        .map(|p| format!("  * {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_step_error_display() {
        let cause = BuildError::command(&args(&["modifyvm", "vm", "--cpus", "1"]), "boom");
        let err = BuildError::step("Error creating VM", cause);
        assert_eq!(err.to_string(), "Error creating VM: VBoxManage error: boom");
    }

    #[test]
    fn test_failed_args_through_step() {
        let cause = BuildError::command(&args(&["createvm", "--name", "vm"]), "boom");
        let err = BuildError::step("Error creating VM", cause);
        assert_eq!(
            err.failed_args(),
            Some(&args(&["createvm", "--name", "vm"])[..])
        );
        assert!(BuildError::State("vm_name").failed_args().is_none());
    }

    #[test]
    fn test_config_error_lists_every_problem() {
        let err = BuildError::Config(vec!["cpus must be at least 1".into(), "bad".into()]);
        let text = err.to_string();
        assert!(text.contains("  * cpus must be at least 1"));
        assert!(text.contains("  * bad"));
    }

    #[test]
    fn test_driver_not_found_lists_locations() {
        let err = BuildError::DriverNotFound {
            searched: vec![PathBuf::from("/usr/bin/VBoxManage")],
        };
        assert!(err.to_string().contains("  - /usr/bin/VBoxManage"));

        let err = BuildError::DriverNotFound { searched: vec![] };
        assert!(err.to_string().contains("VBOX_INSTALL_PATH"));
    }
}
