// SPDX-License-Identifier: MPL-2.0
//! Pick gesture: press anywhere on the alert, release anywhere to dismiss.

use super::lifecycle::GesturePhase;
use super::{AlertCell, AlertId, StatusAlert};
use std::fmt;
use std::rc::Weak;
use std::time::Duration;

/// How the host must configure its press recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickGestureConfig {
    /// Zero, so a plain tap counts as a press.
    pub minimum_press_duration: Duration,
    /// Unbounded, so releasing anywhere still ends the gesture.
    pub allowable_movement: f32,
    pub cancels_touches_in_view: bool,
}

impl Default for PickGestureConfig {
    fn default() -> Self {
        Self {
            minimum_press_duration: Duration::ZERO,
            allowable_movement: f32::INFINITY,
            cancels_touches_in_view: true,
        }
    }
}

/// Handed to the host for pickable alerts; forwards recognizer phases.
///
/// Holds the alert weakly, so a host that keeps the gesture around after
/// detaching does not keep the alert alive.
#[derive(Clone)]
pub struct PickGesture {
    alert: Weak<AlertCell>,
    id: AlertId,
    config: PickGestureConfig,
}

impl PickGesture {
    pub(crate) fn new(alert: Weak<AlertCell>, id: AlertId) -> Self {
        Self {
            alert,
            id,
            config: PickGestureConfig::default(),
        }
    }

    #[must_use]
    pub fn alert_id(&self) -> AlertId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> PickGestureConfig {
        self.config
    }

    /// Reports a recognizer phase.
    ///
    /// `Began`/`Changed` hold back the auto-dismiss timer; `Ended`,
    /// `Cancelled` and `Failed` dismiss the alert immediately. Phases
    /// arriving after the alert stopped presenting are ignored.
    pub fn update(&self, phase: GesturePhase) {
        if let Some(alert) = self.alert.upgrade() {
            StatusAlert::from_cell(alert).handle_gesture(phase);
        } else {
            tracing::trace!(alert = %self.id, ?phase, "pick gesture on released alert");
        }
    }
}

impl fmt::Debug for PickGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickGesture")
            .field("alert", &self.id)
            .field("config", &self.config)
            .finish()
    }
}
