//! Reporter trait for dependency injection
//!
//! This trait allows core logic to report progress and status without
//! being coupled to a specific terminal implementation. Two channels exist:
//! `debug` carries verbose trace lines, everything else is user-facing.

pub trait Reporter: Send + Sync {
    /// Verbose trace line (shown only when the user asks for it).
    fn debug(&self, msg: &str);

    /// Log an informational progress message.
    fn info(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn debug(&self, msg: &str) {
        (**self).debug(msg);
    }
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn success(&self, msg: &str) {
        (**self).success(msg);
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }
    fn error(&self, msg: &str) {
        (**self).error(msg);
    }
}

impl<T: Reporter + ?Sized> Reporter for &T {
    fn debug(&self, msg: &str) {
        (**self).debug(msg);
    }
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn success(&self, msg: &str) {
        (**self).success(msg);
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }
    fn error(&self, msg: &str) {
        (**self).error(msg);
    }
}

/// A no-op reporter for silent operations (e.g., scripting, testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn debug(&self, _: &str) {}
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
}

/// Reporter that records every message, for asserting on output in tests.
#[derive(Debug, Default)]
pub struct CaptureReporter {
    lines: std::sync::Mutex<Vec<(Level, String)>>,
}

/// Channel a captured message was sent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

impl CaptureReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded on `level`, in order.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| {
                lines
                    .iter()
                    .filter(|(l, _)| *l == level)
                    .map(|(_, m)| m.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn push(&self, level: Level, msg: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, msg.to_string()));
        }
    }
}

impl Reporter for CaptureReporter {
    fn debug(&self, msg: &str) {
        self.push(Level::Debug, msg);
    }
    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }
    fn success(&self, msg: &str) {
        self.push(Level::Success, msg);
    }
    fn warning(&self, msg: &str) {
        self.push(Level::Warning, msg);
    }
    fn error(&self, msg: &str) {
        self.push(Level::Error, msg);
    }
}
