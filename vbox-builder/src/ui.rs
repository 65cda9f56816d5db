//! User-facing output.

use parking_lot::Mutex;
use std::io::{self, Write};

/// Sink for messages shown to the person running the build.
pub trait Ui {
    /// Announce what is happening (`==> ...`).
    fn say(&self, message: &str);

    /// Detail under the last announcement.
    fn message(&self, message: &str);

    /// Report a failure.
    fn error(&self, message: &str);
}

/// Writes to the terminal and mirrors every line to `tracing` at debug level.
pub struct ConsoleUi {
    out: Mutex<Box<dyn Write + Send>>,
    err: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleUi {
    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    /// Stdout for progress, stderr for errors.
    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    fn write_line(sink: &Mutex<Box<dyn Write + Send>>, line: &str) {
        let mut sink = sink.lock();
        let _ = writeln!(sink, "{}", line);
        let _ = sink.flush();
    }
}

impl Ui for ConsoleUi {
    fn say(&self, message: &str) {
        tracing::debug!(kind = "say", "{}", message);
        Self::write_line(&self.out, &format!("==> {}", message));
    }

    fn message(&self, message: &str) {
        tracing::debug!(kind = "message", "{}", message);
        Self::write_line(&self.out, &format!("    {}", message));
    }

    fn error(&self, message: &str) {
        tracing::debug!(kind = "error", "{}", message);
        Self::write_line(&self.err, &format!("==> {}", message));
    }
}
