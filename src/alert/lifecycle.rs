// SPDX-License-Identifier: MPL-2.0
//! Lifecycle states of an alert and the dismiss guard.
//!
//! Both types are plain values with no access to collaborators, so the
//! transition rules can be exercised without a host or a run loop.

use std::fmt;

/// Lifecycle of a single alert.
///
/// States only move forward, one step at a time. An alert that is rejected at
/// show time simply stays in `Created`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LifecycleState {
    #[default]
    Created,
    /// Visual content has been built.
    Prepared,
    /// Anchor against the host has been resolved.
    Positioned,
    /// Attached to the host with the auto-dismiss callback pending.
    Presenting,
    /// Exit transition running.
    Dismissing,
    /// Detached from the host. Terminal.
    Removed,
}

impl LifecycleState {
    /// Returns the only state this one may advance to.
    #[must_use]
    pub fn successor(self) -> Option<Self> {
        match self {
            LifecycleState::Created => Some(LifecycleState::Prepared),
            LifecycleState::Prepared => Some(LifecycleState::Positioned),
            LifecycleState::Positioned => Some(LifecycleState::Presenting),
            LifecycleState::Presenting => Some(LifecycleState::Dismissing),
            LifecycleState::Dismissing => Some(LifecycleState::Removed),
            LifecycleState::Removed => None,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == LifecycleState::Removed
    }

    /// Moves to `next` if it is the immediate successor.
    ///
    /// Returns `false` and leaves the state untouched otherwise.
    pub fn advance(&mut self, next: LifecycleState) -> bool {
        if self.successor() == Some(next) {
            *self = next;
            true
        } else {
            false
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Created => "created",
            LifecycleState::Prepared => "prepared",
            LifecycleState::Positioned => "positioned",
            LifecycleState::Presenting => "presenting",
            LifecycleState::Dismissing => "dismissing",
            LifecycleState::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// Phase reported by the host's press recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GesturePhase {
    /// Returns whether the finger is still down.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, GesturePhase::Began | GesturePhase::Changed)
    }
}

/// What is asking a presenting alert to go away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissTrigger {
    /// The auto-dismiss callback fired.
    Timer,
    /// The pick gesture moved to a new phase.
    Gesture(GesturePhase),
    /// A caller invoked `dismiss`.
    Manual,
    /// The presentation policy replaced this alert with a newer one.
    Replaced,
}

impl fmt::Display for DismissTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DismissTrigger::Timer => f.write_str("timer"),
            DismissTrigger::Gesture(phase) => write!(f, "gesture {phase:?}"),
            DismissTrigger::Manual => f.write_str("manual"),
            DismissTrigger::Replaced => f.write_str("replaced"),
        }
    }
}

/// Timer/gesture race state of a presenting alert.
///
/// Every trigger goes through [`DismissGuard::evaluate`], which records the
/// trigger and answers whether the alert must start dismissing now. A timer
/// that fires while the finger is down is remembered but does not dismiss;
/// the gesture's end does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DismissGuard {
    timer_fired: bool,
    gesture_active: bool,
}

impl DismissGuard {
    pub fn evaluate(&mut self, trigger: DismissTrigger) -> bool {
        match trigger {
            DismissTrigger::Timer => {
                self.timer_fired = true;
                !self.gesture_active
            }
            DismissTrigger::Gesture(phase) => {
                self.gesture_active = phase.is_active();
                !self.gesture_active
            }
            DismissTrigger::Manual | DismissTrigger::Replaced => true,
        }
    }

    #[must_use]
    pub fn timer_fired(&self) -> bool {
        self.timer_fired
    }

    #[must_use]
    pub fn gesture_active(&self) -> bool {
        self.gesture_active
    }
}
