//! Side channel for warnings raised while building a Gemfile.
//!
//! Warnings never end up in rendered text. A [`Gemfile`](crate::Gemfile)
//! receives its sink at construction and hands the same sink to every child
//! builder it opens for a block.

use std::io::Write;
use std::sync::Mutex;

/// Receiver of builder warnings (deprecated entrypoints).
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// Default sink: emits warnings as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "gemfile_dsl::diagnostics", "{}", message);
    }
}

/// Writes each warning as one line on standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn warn(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        if let Err(e) = writeln!(stderr, "{message}") {
            tracing::debug!("Failed to write warning to stderr: {}", e);
        }
    }
}

/// Keeps warnings in memory.
#[derive(Debug, Default)]
pub struct CaptureSink {
    messages: Mutex<Vec<String>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for CaptureSink {
    fn warn(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
