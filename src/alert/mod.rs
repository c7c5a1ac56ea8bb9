// SPDX-License-Identifier: MPL-2.0
//! Status alerts and their presentation lifecycle.
//!
//! A [`StatusAlert`] walks through
//! `Created → Prepared → Positioned → Presenting → Dismissing → Removed`
//! exactly once. `show` drives it to `Presenting` synchronously; the
//! auto-dismiss callback, the pick gesture, a manual `dismiss` or a newer
//! alert replacing it move it to `Dismissing`; the exit transition's
//! completion moves it to `Removed`.
//!
//! # Components
//!
//! - [`content`] - image, title and message
//! - [`style`] - appearance snapshot and overrides
//! - [`position`] - vertical placement and anchor resolution
//! - [`lifecycle`] - lifecycle states and the timer/gesture dismiss guard
//! - [`gesture`] - pick gesture handed to hosts
//! - [`announcement`] - accessibility announcement
//!
//! # Reentrancy
//!
//! Collaborators may call back synchronously. No `RefCell` borrow of the
//! alert is held while a collaborator runs.

pub mod announcement;
pub mod content;
pub mod gesture;
pub mod lifecycle;
pub mod position;
pub mod style;

pub use announcement::Announcement;
pub use content::{Content, ImageHandle};
pub use gesture::{PickGesture, PickGestureConfig};
pub use lifecycle::{DismissGuard, DismissTrigger, GesturePhase, LifecycleState};
pub use position::{Anchor, VerticalPosition};
pub use style::{Color, Font, FontWeight, Style, StyleOverrides};

use crate::platform::{AnimationTarget, AttachedView, Cancellable, Host};
use crate::presentation::PresenterInner;
use crate::render::{Backdrop, Transition, Visual, VisualTree};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Unique identifier for an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlertId(u64);

impl AlertId {
    /// Creates a new unique alert ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert#{}", self.0)
    }
}

/// Where and how to show an alert.
///
/// `pickable` and `style` only apply when [`Presenter::show`] builds the
/// alert; an alert that already exists keeps what it was built with.
///
/// [`Presenter::show`]: crate::presentation::Presenter::show
#[derive(Clone)]
pub struct ShowOptions {
    /// Host to attach to; the environment's primary host when `None`.
    pub host: Option<Rc<dyn Host>>,
    pub position: VerticalPosition,
    /// Overrides the style's default offset for `position`.
    pub offset: Option<f32>,
    /// Whether a press dismisses the alert. Off by default.
    pub pickable: bool,
    /// Replaces the presenter's default style.
    pub style: Option<Style>,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            host: None,
            position: VerticalPosition::default(),
            offset: None,
            pickable: false,
            style: None,
        }
    }
}

impl ShowOptions {
    #[must_use]
    pub fn at(position: VerticalPosition) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn top() -> Self {
        Self::at(VerticalPosition::Top)
    }

    #[must_use]
    pub fn center() -> Self {
        Self::at(VerticalPosition::Center)
    }

    #[must_use]
    pub fn bottom() -> Self {
        Self::at(VerticalPosition::Bottom)
    }

    #[must_use]
    pub fn in_host(mut self, host: Rc<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

impl fmt::Debug for ShowOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowOptions")
            .field("host", &self.host.as_ref().map(|_| "custom"))
            .field("position", &self.position)
            .field("offset", &self.offset)
            .field("pickable", &self.pickable)
            .field("style", &self.style)
            .finish()
    }
}

/// Mutable state of one alert.
struct AlertCore {
    content: Content,
    style: Style,
    pickable: bool,
    announcement: Option<Announcement>,
    state: LifecycleState,
    guard: DismissGuard,
    anchor: Option<Anchor>,
    backdrop: Option<Backdrop>,
    host: Option<Rc<dyn Host>>,
    /// Pending auto-dismiss callback; only set while presenting.
    timer: Option<Box<dyn Cancellable>>,
    interaction_enabled: bool,
}

pub(crate) struct AlertCell {
    id: AlertId,
    presenter: Rc<PresenterInner>,
    core: RefCell<AlertCore>,
}

/// Handle to one alert.
///
/// Cloning yields another handle to the same alert. An alert that was
/// rejected at show time stays `Created`; its handle is inert.
#[derive(Clone)]
pub struct StatusAlert {
    cell: Rc<AlertCell>,
}

impl StatusAlert {
    pub(crate) fn new(
        presenter: Rc<PresenterInner>,
        content: Content,
        style: Style,
        pickable: bool,
        announcement: Option<Announcement>,
    ) -> Self {
        let core = AlertCore {
            content,
            style,
            pickable,
            announcement,
            state: LifecycleState::Created,
            guard: DismissGuard::default(),
            anchor: None,
            backdrop: None,
            host: None,
            timer: None,
            interaction_enabled: false,
        };
        Self {
            cell: Rc::new(AlertCell {
                id: AlertId::new(),
                presenter,
                core: RefCell::new(core),
            }),
        }
    }

    pub(crate) fn from_cell(cell: Rc<AlertCell>) -> Self {
        Self { cell }
    }

    pub(crate) fn downgrade(&self) -> std::rc::Weak<AlertCell> {
        Rc::downgrade(&self.cell)
    }

    #[must_use]
    pub fn id(&self) -> AlertId {
        self.cell.id
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.cell.core.borrow().state
    }

    #[must_use]
    pub fn is_presenting(&self) -> bool {
        self.state() == LifecycleState::Presenting
    }

    #[must_use]
    pub fn is_pickable(&self) -> bool {
        self.cell.core.borrow().pickable
    }

    /// Whether the pick gesture is currently honoured.
    #[must_use]
    pub fn is_interaction_enabled(&self) -> bool {
        self.cell.core.borrow().interaction_enabled
    }

    #[must_use]
    pub fn content(&self) -> Content {
        self.cell.core.borrow().content.clone()
    }

    /// The style captured when this alert was constructed.
    #[must_use]
    pub fn style(&self) -> Style {
        self.cell.core.borrow().style.clone()
    }

    /// Anchor resolved while positioning, if the alert got that far.
    #[must_use]
    pub fn anchor(&self) -> Option<Anchor> {
        self.cell.core.borrow().anchor
    }

    #[must_use]
    pub fn backdrop(&self) -> Option<Backdrop> {
        self.cell.core.borrow().backdrop
    }

    /// Shows the alert.
    ///
    /// Returns `false` without side effects when the alert was already
    /// shown, has empty content, or the presentation policy rejects it.
    ///
    /// # Panics
    ///
    /// Panics when called off the presenter's UI thread.
    pub fn show(&self, options: ShowOptions) -> bool {
        let presenter = Rc::clone(&self.cell.presenter);
        presenter.ui_thread.assert_current("show");
        let id = self.id();

        {
            let core = self.cell.core.borrow();
            if core.state != LifecycleState::Created {
                tracing::debug!(alert = %id, state = %core.state, "show ignored: already shown");
                return false;
            }
            if core.content.is_empty() {
                tracing::debug!(alert = %id, "show rejected: empty content");
                return false;
            }
        }

        if !presenter.admit(self) {
            return false;
        }

        let tree = self.prepare();
        let anchor = self.position(options.position, options.offset);
        let host = options
            .host
            .unwrap_or_else(|| Rc::clone(&presenter.env.primary_host));
        self.present(host, tree, anchor);
        true
    }

    /// Dismisses the alert early.
    ///
    /// Returns `false` if it was not presenting; calling it again after a
    /// successful dismiss is a no-op.
    ///
    /// # Panics
    ///
    /// Panics when called off the presenter's UI thread.
    pub fn dismiss(&self) -> bool {
        self.cell.presenter.ui_thread.assert_current("dismiss");
        self.request_dismiss(DismissTrigger::Manual)
    }

    /// Dismisses on behalf of the presentation policy, ignoring any pick
    /// gesture in progress.
    pub(crate) fn force_dismiss(&self) -> bool {
        self.request_dismiss(DismissTrigger::Replaced)
    }

    pub(crate) fn handle_gesture(&self, phase: GesturePhase) {
        self.cell.presenter.ui_thread.assert_current("pick");
        {
            let core = self.cell.core.borrow();
            if !core.pickable || !core.interaction_enabled {
                tracing::trace!(alert = %self.id(), ?phase, "pick ignored: interaction disabled");
                return;
            }
        }
        self.request_dismiss(DismissTrigger::Gesture(phase));
    }

    /// Re-evaluates blur availability for an attached alert.
    pub(crate) fn refresh_backdrop(&self) {
        let can_use_blur = self.cell.presenter.env.blur.can_use_blur();
        let (host, backdrop) = {
            let mut core = self.cell.core.borrow_mut();
            if !matches!(
                core.state,
                LifecycleState::Presenting | LifecycleState::Dismissing
            ) {
                return;
            }
            let backdrop = Backdrop::select(can_use_blur, &core.style);
            if core.backdrop == Some(backdrop) {
                return;
            }
            core.backdrop = Some(backdrop);
            (core.host.clone(), backdrop)
        };
        if let Some(host) = host {
            host.set_backdrop(self.id(), backdrop);
        }
    }

    /// `Created → Prepared`: builds the visual tree, once.
    fn prepare(&self) -> VisualTree {
        let env = &self.cell.presenter.env;
        let (content, style) = {
            let core = self.cell.core.borrow();
            (core.content.clone(), core.style.clone())
        };

        let backdrop = Backdrop::select(env.blur.can_use_blur(), &style);
        let tree = env.builder.build(&content, &style, backdrop);

        let mut core = self.cell.core.borrow_mut();
        core.state.advance(LifecycleState::Prepared);
        core.backdrop = Some(backdrop);
        tracing::debug!(alert = %self.id(), ?backdrop, "alert prepared");
        tree
    }

    /// `Prepared → Positioned`: resolves the anchor against the host.
    fn position(&self, position: VerticalPosition, offset: Option<f32>) -> Anchor {
        let mut core = self.cell.core.borrow_mut();
        let anchor = Anchor::resolve(position, offset, &core.style);
        core.anchor = Some(anchor);
        core.state.advance(LifecycleState::Positioned);
        anchor
    }

    /// `Positioned → Presenting`: attaches, arms the auto-dismiss callback
    /// and starts the entrance transition.
    fn present(&self, host: Rc<dyn Host>, tree: VisualTree, anchor: Anchor) {
        let id = self.id();
        let env = &self.cell.presenter.env;

        let (view, delay, entrance, announcement) = {
            let mut core = self.cell.core.borrow_mut();
            core.state.advance(LifecycleState::Presenting);
            core.host = Some(Rc::clone(&host));
            core.interaction_enabled = core.pickable;

            let announcement = core
                .announcement
                .as_ref()
                .and_then(|announcement| announcement.resolve(&core.content));
            let view = AttachedView {
                alert: id,
                tree,
                anchor,
                visual: Visual::hidden(core.style.initial_scale),
                pick: core
                    .pickable
                    .then(|| PickGesture::new(self.downgrade(), id)),
            };
            (
                view,
                core.style.dismiss_delay(),
                Transition::entrance(&core.style),
                announcement,
            )
        };

        host.attach(view);
        tracing::debug!(alert = %id, ?delay, "alert presenting");

        let alert = self.clone();
        let timer = env
            .scheduler
            .schedule_delayed(delay, Box::new(move || alert.on_timer_fired()));
        {
            let mut core = self.cell.core.borrow_mut();
            if core.state == LifecycleState::Presenting {
                core.timer = Some(timer);
            } else {
                drop(core);
                timer.cancel();
            }
        }

        let alert = self.clone();
        env.animator.run_transition(
            AnimationTarget { host, alert: id },
            entrance,
            Box::new(move || alert.on_entrance_finished(announcement)),
        );
    }

    fn on_entrance_finished(&self, announcement: Option<String>) {
        if self.state().is_terminal() {
            return;
        }
        tracing::trace!(alert = %self.id(), "entrance finished");
        if let Some(text) = announcement {
            self.cell.presenter.env.announcer.announce(&text);
        }
    }

    fn on_timer_fired(&self) {
        self.cell.presenter.ui_thread.assert_current("auto-dismiss");
        self.cell.core.borrow_mut().timer = None;
        self.request_dismiss(DismissTrigger::Timer);
    }

    /// `Presenting → Dismissing`, guarded by the dismiss guard.
    ///
    /// Cancels the auto-dismiss callback, disables interaction, leaves the
    /// policy's active set and starts the exit transition.
    fn request_dismiss(&self, trigger: DismissTrigger) -> bool {
        let id = self.id();
        let (timer, host, exit) = {
            let mut core = self.cell.core.borrow_mut();
            if core.state != LifecycleState::Presenting {
                tracing::trace!(alert = %id, state = %core.state, %trigger, "dismiss ignored");
                return false;
            }
            if !core.guard.evaluate(trigger) {
                if trigger == DismissTrigger::Timer {
                    tracing::debug!(alert = %id, "auto-dismiss deferred until pick ends");
                }
                return false;
            }
            core.state.advance(LifecycleState::Dismissing);
            core.interaction_enabled = false;
            (
                core.timer.take(),
                core.host.clone(),
                Transition::exit(&core.style),
            )
        };

        if let Some(timer) = timer {
            timer.cancel();
        }
        self.cell.presenter.release(id);
        tracing::debug!(alert = %id, %trigger, "alert dismissing");

        match host {
            Some(host) => {
                host.set_interaction_enabled(id, false);
                let alert = self.clone();
                self.cell.presenter.env.animator.run_transition(
                    AnimationTarget { host, alert: id },
                    exit,
                    Box::new(move || alert.finish_removal()),
                );
            }
            None => self.finish_removal(),
        }
        true
    }

    /// `Dismissing → Removed`: detaches from the host.
    fn finish_removal(&self) {
        let host = {
            let mut core = self.cell.core.borrow_mut();
            if !core.state.advance(LifecycleState::Removed) {
                return;
            }
            core.host.take()
        };
        if let Some(host) = host {
            host.detach(self.id());
        }
        self.cell.presenter.forget(self.id());
        tracing::debug!(alert = %self.id(), "alert removed");
    }
}

impl fmt::Debug for StatusAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusAlert")
            .field("id", &self.id())
            .field("state", &self.state())
            .finish()
    }
}

impl PartialEq for StatusAlert {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl Eq for StatusAlert {}
