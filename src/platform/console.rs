// SPDX-License-Identifier: MPL-2.0
//! Headless collaborators that report through `tracing`.
//!
//! Used by the command-line demo and handy when embedding the core in a
//! toolkit that is not wired up yet.

use super::{Announcer, AttachedView, Host};
use crate::alert::gesture::PickGesture;
use crate::alert::AlertId;
use crate::render::{Backdrop, StackItem, Visual};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Host that renders alerts as log lines.
#[derive(Debug, Default)]
pub struct LoggingHost {
    name: String,
    attached: RefCell<BTreeMap<AlertId, Option<PickGesture>>>,
}

impl LoggingHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attached: RefCell::new(BTreeMap::new()),
        }
    }

    /// Ids of the alerts currently attached, oldest first.
    #[must_use]
    pub fn attached(&self) -> Vec<AlertId> {
        self.attached.borrow().keys().copied().collect()
    }

    /// Pick gesture of an attached alert, for driving it from a terminal.
    #[must_use]
    pub fn pick_gesture(&self, alert: AlertId) -> Option<PickGesture> {
        self.attached.borrow().get(&alert).cloned().flatten()
    }
}

impl Host for LoggingHost {
    fn attach(&self, view: AttachedView) {
        let text: Vec<&str> = view
            .tree
            .items
            .iter()
            .filter_map(|item| match item {
                StackItem::Label(label) => Some(label.text.as_str()),
                StackItem::Image { handle, .. } => Some(handle.name()),
                StackItem::Spacer(_) => None,
            })
            .collect();
        tracing::info!(
            host = %self.name,
            alert = %view.alert,
            position = %view.anchor.position,
            offset = view.anchor.constant,
            pickable = view.pick.is_some(),
            content = ?text,
            "alert attached"
        );
        self.attached.borrow_mut().insert(view.alert, view.pick);
    }

    fn set_visual(&self, alert: AlertId, visual: Visual) {
        tracing::trace!(
            host = %self.name,
            %alert,
            scale = visual.scale,
            opacity = visual.opacity,
            "alert visual"
        );
    }

    fn set_backdrop(&self, alert: AlertId, backdrop: Backdrop) {
        tracing::info!(host = %self.name, %alert, ?backdrop, "alert backdrop changed");
    }

    fn set_interaction_enabled(&self, alert: AlertId, enabled: bool) {
        tracing::debug!(host = %self.name, %alert, enabled, "alert interaction");
    }

    fn detach(&self, alert: AlertId) {
        self.attached.borrow_mut().remove(&alert);
        tracing::info!(host = %self.name, %alert, "alert detached");
    }
}

/// Announcer that logs instead of speaking.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnnouncer;

impl Announcer for TracingAnnouncer {
    fn announce(&self, text: &str) {
        tracing::info!(announcement = text, "accessibility announcement");
    }
}
