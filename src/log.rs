//! Where evaluation reports the problems it recovers from.
//!
//! Warnings are a side effect only. Nothing written here changes the value being computed.

use core::cell::RefCell;
use std::error::Error;

pub trait Logger {
    fn warn(&self, message: &str);
}

/// The default logger, forwarding warnings to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "rulecalc", "{}", message);
    }
}

/// Keeps every warning in memory, in the order it was emitted.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    messages: RefCell<Vec<String>>,
}

impl RecordingLogger {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl Logger for RecordingLogger {
    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// Emits `message` to `logger`, followed by the error which caused it.
pub fn warning(logger: &dyn Logger, message: &str, cause: &dyn Error) {
    logger.warn(&format!("{}\n  caused by: {}", message, cause));
}
