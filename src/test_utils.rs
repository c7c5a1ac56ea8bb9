// SPDX-License-Identifier: MPL-2.0
//! Recording collaborators for tests, benches and doc examples.
//!
//! [`Fixture`] wires a presenter to a [`SimulatedRunLoop`], a
//! [`RecordingHost`] and a [`RecordingAnnouncer`], so tests drive time by
//! hand and assert on what the host saw.
//!
//! Not part of the supported API.

use crate::alert::gesture::PickGesture;
use crate::alert::position::Anchor;
use crate::alert::{AlertId, Content, Style};
use crate::platform::{Announcer, AttachedView, Environment, Host};
use crate::presentation::Presenter;
use crate::render::{Backdrop, ContentBuilder, StackContentBuilder, Visual, VisualTree};
use crate::runloop::SimulatedRunLoop;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[cfg(test)]
pub use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq, assert_relative_ne};

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-6;

/// Structural calls a host received, in order. Visual updates are kept
/// apart, see [`RecordingHost::visuals`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Attached(AlertId),
    Backdrop(AlertId, Backdrop),
    InteractionEnabled(AlertId, bool),
    Detached(AlertId),
}

/// Host that records every call.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: RefCell<Vec<HostEvent>>,
    views: RefCell<HashMap<AlertId, AttachedView>>,
    visuals: RefCell<HashMap<AlertId, Vec<Visual>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn events_for(&self, alert: AlertId) -> Vec<HostEvent> {
        self.events
            .borrow()
            .iter()
            .copied()
            .filter(|event| event.alert() == alert)
            .collect()
    }

    #[must_use]
    pub fn count(&self, wanted: impl Fn(&HostEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|event| wanted(event)).count()
    }

    /// Alerts attached and not yet detached.
    #[must_use]
    pub fn attached(&self) -> Vec<AlertId> {
        let mut ids: Vec<AlertId> = self.views.borrow().keys().copied().collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn is_attached(&self, alert: AlertId) -> bool {
        self.views.borrow().contains_key(&alert)
    }

    #[must_use]
    pub fn tree(&self, alert: AlertId) -> Option<VisualTree> {
        self.views.borrow().get(&alert).map(|view| view.tree.clone())
    }

    #[must_use]
    pub fn anchor(&self, alert: AlertId) -> Option<Anchor> {
        self.views.borrow().get(&alert).map(|view| view.anchor)
    }

    /// Visual the alert was attached with.
    #[must_use]
    pub fn initial_visual(&self, alert: AlertId) -> Option<Visual> {
        self.views.borrow().get(&alert).map(|view| view.visual)
    }

    #[must_use]
    pub fn pick_gesture(&self, alert: AlertId) -> Option<PickGesture> {
        self.views
            .borrow()
            .get(&alert)
            .and_then(|view| view.pick.clone())
    }

    #[must_use]
    pub fn visuals(&self, alert: AlertId) -> Vec<Visual> {
        self.visuals
            .borrow()
            .get(&alert)
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn visual_count(&self, alert: AlertId) -> usize {
        self.visuals.borrow().get(&alert).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn last_visual(&self, alert: AlertId) -> Option<Visual> {
        self.visuals
            .borrow()
            .get(&alert)
            .and_then(|visuals| visuals.last().copied())
    }
}

impl HostEvent {
    #[must_use]
    pub fn alert(&self) -> AlertId {
        match *self {
            HostEvent::Attached(alert)
            | HostEvent::Backdrop(alert, _)
            | HostEvent::InteractionEnabled(alert, _)
            | HostEvent::Detached(alert) => alert,
        }
    }
}

impl Host for RecordingHost {
    fn attach(&self, view: AttachedView) {
        self.events.borrow_mut().push(HostEvent::Attached(view.alert));
        self.views.borrow_mut().insert(view.alert, view);
    }

    fn set_visual(&self, alert: AlertId, visual: Visual) {
        self.visuals
            .borrow_mut()
            .entry(alert)
            .or_default()
            .push(visual);
    }

    fn set_backdrop(&self, alert: AlertId, backdrop: Backdrop) {
        self.events
            .borrow_mut()
            .push(HostEvent::Backdrop(alert, backdrop));
    }

    fn set_interaction_enabled(&self, alert: AlertId, enabled: bool) {
        self.events
            .borrow_mut()
            .push(HostEvent::InteractionEnabled(alert, enabled));
    }

    fn detach(&self, alert: AlertId) {
        self.events.borrow_mut().push(HostEvent::Detached(alert));
        self.views.borrow_mut().remove(&alert);
    }
}

/// Announcer that keeps what it was asked to say.
#[derive(Debug, Default)]
pub struct RecordingAnnouncer {
    spoken: RefCell<Vec<String>>,
}

impl RecordingAnnouncer {
    #[must_use]
    pub fn announcements(&self) -> Vec<String> {
        self.spoken.borrow().clone()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&self, text: &str) {
        self.spoken.borrow_mut().push(text.to_owned());
    }
}

/// Stack builder that counts its invocations.
#[derive(Debug, Default)]
pub struct CountingBuilder {
    builds: Cell<usize>,
}

impl CountingBuilder {
    #[must_use]
    pub fn builds(&self) -> usize {
        self.builds.get()
    }
}

impl ContentBuilder for CountingBuilder {
    fn build(&self, content: &Content, style: &Style, backdrop: Backdrop) -> VisualTree {
        self.builds.set(self.builds.get() + 1);
        StackContentBuilder.build(content, style, backdrop)
    }
}

/// A presenter with every collaborator recorded.
pub struct Fixture {
    pub presenter: Presenter,
    pub run_loop: Rc<SimulatedRunLoop>,
    pub host: Rc<RecordingHost>,
    pub announcer: Rc<RecordingAnnouncer>,
    pub builder: Rc<CountingBuilder>,
    /// Flip and call `accessibility_settings_changed` to simulate the
    /// transparency setting changing.
    pub blur: Rc<Cell<bool>>,
}

impl Fixture {
    pub fn new() -> Self {
        let run_loop = Rc::new(SimulatedRunLoop::new());
        let host = Rc::new(RecordingHost::new());
        let announcer = Rc::new(RecordingAnnouncer::default());
        let builder = Rc::new(CountingBuilder::default());
        let blur = Rc::new(Cell::new(true));

        let env = Environment::on_run_loop(host.clone(), Rc::clone(&run_loop))
            .with_blur(blur.clone())
            .with_builder(builder.clone())
            .with_announcer(announcer.clone());

        Self {
            presenter: Presenter::new(env),
            run_loop,
            host,
            announcer,
            builder,
            blur,
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for [`Fixture::new`] when only the presenter, run loop and
/// host matter.
pub fn recording_presenter() -> (Presenter, Rc<SimulatedRunLoop>, Rc<RecordingHost>) {
    let fixture = Fixture::new();
    (fixture.presenter, fixture.run_loop, fixture.host)
}
