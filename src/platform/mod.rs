// SPDX-License-Identifier: MPL-2.0
//! Collaborators the presentation core depends on.
//!
//! The core owns no views, timers or animations itself. The host toolkit
//! plugs in through the traits below, bundled into an [`Environment`]:
//!
//! - [`BlurCapability`] - whether visual blur may be used right now
//! - [`ContentBuilder`] - builds the visual tree, once per alert
//! - [`Scheduler`] - cancellable delayed callbacks on the UI thread
//! - [`Animator`] - animated transitions with a completion callback
//! - [`Host`] - the view alerts attach to
//! - [`Announcer`] - accessibility announcements
//!
//! All callbacks are invoked on the UI thread. They may also be invoked
//! synchronously from inside the call that registered them.

pub mod console;
pub mod thread;

pub use console::{LoggingHost, TracingAnnouncer};
pub use thread::UiThread;

use crate::alert::gesture::PickGesture;
use crate::alert::position::Anchor;
use crate::alert::AlertId;
use crate::render::{Backdrop, ContentBuilder, StackContentBuilder, Transition, Visual, VisualTree};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Callback run once by a scheduler or animator.
pub type Callback = Box<dyn FnOnce()>;

/// Answers whether visual blur may be used right now.
pub trait BlurCapability {
    fn can_use_blur(&self) -> bool;
}

impl BlurCapability for bool {
    fn can_use_blur(&self) -> bool {
        *self
    }
}

/// Capability that can be flipped at runtime, e.g. by an accessibility
/// setting.
impl BlurCapability for Cell<bool> {
    fn can_use_blur(&self) -> bool {
        self.get()
    }
}

/// Handle to a pending delayed callback.
pub trait Cancellable {
    /// Prevents the callback from running. Idempotent, and a no-op once the
    /// callback has fired.
    fn cancel(&self);
}

/// Delayed callbacks on the UI run loop.
pub trait Scheduler {
    fn schedule_delayed(&self, delay: Duration, on_fire: Callback) -> Box<dyn Cancellable>;
}

/// Alert being animated and the host that renders it.
#[derive(Clone)]
pub struct AnimationTarget {
    pub host: Rc<dyn Host>,
    pub alert: AlertId,
}

/// Runs transitions on attached alerts.
///
/// The animator pushes intermediate states through [`Host::set_visual`]
/// and must leave the alert at `transition.to` before calling
/// `on_complete`. There is no timeout: an animator that never completes
/// leaves the alert in its current state forever.
///
/// A transition started for an alert that already has one running replaces
/// it: the new one starts from the current visual and the replaced
/// completion is never called.
pub trait Animator {
    fn run_transition(&self, target: AnimationTarget, transition: Transition, on_complete: Callback);
}

/// Everything a host needs to display an alert.
#[derive(Debug)]
pub struct AttachedView {
    pub alert: AlertId,
    pub tree: VisualTree,
    pub anchor: Anchor,
    /// Initial animated state, before the entrance transition.
    pub visual: Visual,
    /// Present when the alert can be picked; the host installs a press
    /// recognizer configured by [`PickGesture::config`] and forwards its
    /// phases to [`PickGesture::update`].
    pub pick: Option<PickGesture>,
}

/// View that alerts attach to and position themselves against.
pub trait Host {
    fn attach(&self, view: AttachedView);
    fn set_visual(&self, alert: AlertId, visual: Visual);
    fn set_backdrop(&self, alert: AlertId, backdrop: Backdrop);
    fn set_interaction_enabled(&self, alert: AlertId, enabled: bool);
    fn detach(&self, alert: AlertId);
}

/// Posts accessibility announcements.
pub trait Announcer {
    fn announce(&self, text: &str);
}

/// Collaborators shared by all alerts of a presenter.
#[derive(Clone)]
pub struct Environment {
    pub blur: Rc<dyn BlurCapability>,
    pub builder: Rc<dyn ContentBuilder>,
    pub scheduler: Rc<dyn Scheduler>,
    pub animator: Rc<dyn Animator>,
    /// Host used when a show request names none.
    pub primary_host: Rc<dyn Host>,
    pub announcer: Rc<dyn Announcer>,
}

impl Environment {
    /// Creates an environment with the stack content builder, no blur and
    /// announcements sent to the log.
    pub fn new(
        primary_host: Rc<dyn Host>,
        scheduler: Rc<dyn Scheduler>,
        animator: Rc<dyn Animator>,
    ) -> Self {
        Self {
            blur: Rc::new(false),
            builder: Rc::new(StackContentBuilder),
            scheduler,
            animator,
            primary_host,
            announcer: Rc::new(TracingAnnouncer),
        }
    }

    /// Uses one run loop as both scheduler and animator.
    pub fn on_run_loop<L>(primary_host: Rc<dyn Host>, run_loop: Rc<L>) -> Self
    where
        L: Scheduler + Animator + 'static,
    {
        Self::new(primary_host, run_loop.clone(), run_loop)
    }

    #[must_use]
    pub fn with_blur(mut self, blur: Rc<dyn BlurCapability>) -> Self {
        self.blur = blur;
        self
    }

    #[must_use]
    pub fn with_builder(mut self, builder: Rc<dyn ContentBuilder>) -> Self {
        self.builder = builder;
        self
    }

    #[must_use]
    pub fn with_announcer(mut self, announcer: Rc<dyn Announcer>) -> Self {
        self.announcer = announcer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_capabilities_answer_their_value() {
        assert!(true.can_use_blur());
        assert!(!false.can_use_blur());
    }

    #[test]
    fn cell_capability_follows_updates() {
        let capability = Cell::new(true);
        assert!(capability.can_use_blur());
        capability.set(false);
        assert!(!capability.can_use_blur());
    }
}
