// SPDX-License-Identifier: MPL-2.0
//! Multiple-presentation policy.
//!
//! Decides what happens when an alert asks to be shown while others are
//! on screen. [`decide`] is a pure function of the mode, the active set and
//! the candidate; [`PresentationPolicy`] only adds bookkeeping around it.

use crate::alert::AlertId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How concurrent show requests interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresentationMode {
    /// Drop new requests while an alert is presenting.
    #[default]
    SuppressIfBusy,
    /// Dismiss whatever is presenting, then show the new alert.
    ReplaceCurrent,
    /// Show every alert, each with its own timer.
    AllowMultiple,
}

impl PresentationMode {
    pub const ALL: [PresentationMode; 3] = [
        PresentationMode::SuppressIfBusy,
        PresentationMode::ReplaceCurrent,
        PresentationMode::AllowMultiple,
    ];

    /// Short human-readable name.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            PresentationMode::SuppressIfBusy => "Only one",
            PresentationMode::ReplaceCurrent => "Dismiss current",
            PresentationMode::AllowMultiple => "Display all",
        }
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PresentationMode::SuppressIfBusy => "suppress-if-busy",
            PresentationMode::ReplaceCurrent => "replace-current",
            PresentationMode::AllowMultiple => "allow-multiple",
        };
        f.write_str(name)
    }
}

impl FromStr for PresentationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "suppress-if-busy" | "only-one" => Ok(PresentationMode::SuppressIfBusy),
            "replace-current" | "dismiss-current" => Ok(PresentationMode::ReplaceCurrent),
            "allow-multiple" | "display-all" => Ok(PresentationMode::AllowMultiple),
            other => Err(format!("unknown presentation mode: {other}")),
        }
    }
}

/// Outcome of a show request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Admit,
    /// The request has no effect; the candidate stays `Created`.
    Reject,
    /// Force-dismiss these alerts, then admit the candidate.
    Replace(Vec<AlertId>),
}

/// Decides whether `candidate` may present given the current `active` set.
#[must_use]
pub fn decide(mode: PresentationMode, active: &[AlertId], candidate: AlertId) -> Admission {
    if active.contains(&candidate) {
        return Admission::Reject;
    }
    match mode {
        PresentationMode::SuppressIfBusy if active.is_empty() => Admission::Admit,
        PresentationMode::SuppressIfBusy => Admission::Reject,
        PresentationMode::ReplaceCurrent if active.is_empty() => Admission::Admit,
        PresentationMode::ReplaceCurrent => Admission::Replace(active.to_vec()),
        PresentationMode::AllowMultiple => Admission::Admit,
    }
}

/// Mode plus the ids of presenting alerts, in admission order.
#[derive(Debug, Clone, Default)]
pub struct PresentationPolicy {
    mode: PresentationMode,
    active: Vec<AlertId>,
}

impl PresentationPolicy {
    #[must_use]
    pub fn new(mode: PresentationMode) -> Self {
        Self {
            mode,
            active: Vec::new(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// Changes the mode for future requests. Alerts already presenting are
    /// left alone.
    pub fn set_mode(&mut self, mode: PresentationMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn decide(&self, candidate: AlertId) -> Admission {
        decide(self.mode, &self.active, candidate)
    }

    /// Adds `id` to the active set. Returns `false` if it was already there.
    pub fn admit(&mut self, id: AlertId) -> bool {
        if self.active.contains(&id) {
            false
        } else {
            self.active.push(id);
            true
        }
    }

    /// Removes `id` from the active set. Returns `false` if it was absent.
    pub fn release(&mut self, id: AlertId) -> bool {
        if let Some(pos) = self.active.iter().position(|active| *active == id) {
            self.active.remove(pos);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn active(&self) -> &[AlertId] {
        &self.active
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.active.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: AlertId) -> bool {
        self.active.contains(&id)
    }
}
