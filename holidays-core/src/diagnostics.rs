//! Diagnostics sink threaded through extraction and merging.
//!
//! Recoverable oddities (skipped rows, identifier drift) are reported through
//! an explicitly passed sink rather than a global logger, so the caller
//! decides where the messages go. The binary installs [`TracingSink`];
//! tests inspect a [`BufferSink`].

use std::sync::Mutex;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Receives diagnostic messages from the extractor and merge engine.
pub trait Diagnostics {
    fn emit(&self, severity: Severity, message: &str);

    fn debug(&self, message: &str) {
        self.emit(Severity::Debug, message);
    }

    fn info(&self, message: &str) {
        self.emit(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.emit(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(Severity::Error, message);
    }
}

/// Forwards diagnostics to the `tracing` dispatcher.
pub struct TracingSink;

impl Diagnostics for TracingSink {
    fn emit(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!("{message}"),
            Severity::Info => tracing::info!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Error => tracing::error!("{message}"),
        }
    }
}

/// Collects diagnostics in memory for later inspection.
#[derive(Debug, Default)]
pub struct BufferSink {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().unwrap().clone()
    }

    /// True when any collected message at `severity` contains `needle`.
    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|(s, message)| *s == severity && message.contains(needle))
    }
}

impl Diagnostics for BufferSink {
    fn emit(&self, severity: Severity, message: &str) {
        self.entries.lock().unwrap().push((severity, message.to_string()));
    }
}
