// SPDX-License-Identifier: MPL-2.0
//! UI thread affinity.
//!
//! Every public operation of a presenter and its alerts asserts that it runs
//! on the thread the presenter was created on. Violations abort through a
//! panic: continuing on the wrong thread would corrupt the host toolkit.

use std::thread::{self, ThreadId};

/// Identity of the thread a presenter is confined to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiThread {
    id: ThreadId,
}

impl UiThread {
    /// Binds to the calling thread.
    #[must_use]
    pub fn current() -> Self {
        Self {
            id: thread::current().id(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ThreadId {
        self.id
    }

    #[must_use]
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.id
    }

    /// Panics unless called on the bound thread.
    #[track_caller]
    pub fn assert_current(&self, operation: &str) {
        if !self.is_current() {
            let current = thread::current();
            tracing::error!(
                operation,
                thread = current.name().unwrap_or("<unnamed>"),
                "status alert used off the UI thread"
            );
            panic!("`StatusAlert::{operation}` must only be used from the UI thread");
        }
    }
}
