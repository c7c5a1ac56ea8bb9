// SPDX-License-Identifier: MPL-2.0
//! Presenter: the entry point that creates alerts and arbitrates between
//! concurrent show requests.
//!
//! A [`Presenter`] belongs to the thread that created it. It owns the
//! presentation policy, the default style captured by new alerts and the
//! collaborators every alert uses.
//!
//! # Example
//!
//! ```
//! use status_alert::runloop::SimulatedRunLoop;
//! use status_alert::{Content, Environment, LoggingHost, Presenter, ShowOptions};
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let run_loop = Rc::new(SimulatedRunLoop::new());
//! let host = Rc::new(LoggingHost::new("main"));
//! let presenter = Presenter::new(Environment::on_run_loop(host, run_loop.clone()));
//! let alert = presenter.show(Content::title("Saved"), ShowOptions::top());
//! assert!(alert.is_presenting());
//!
//! run_loop.advance(Duration::from_secs(3));
//! assert!(alert.state().is_terminal());
//! ```

pub mod policy;

pub use policy::{decide, Admission, PresentationMode, PresentationPolicy};

use crate::alert::{
    AlertCell, AlertId, Announcement, Content, ShowOptions, StatusAlert, Style, StyleOverrides,
};
use crate::config::Config;
use crate::platform::{Environment, UiThread};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

pub(crate) struct PresenterInner {
    pub(crate) ui_thread: UiThread,
    pub(crate) env: Environment,
    policy: RefCell<PresentationPolicy>,
    default_style: RefCell<Style>,
    /// Alerts shown and not yet removed.
    members: RefCell<HashMap<AlertId, Weak<AlertCell>>>,
}

impl PresenterInner {
    fn member(&self, id: AlertId) -> Option<StatusAlert> {
        self.members
            .borrow()
            .get(&id)
            .and_then(Weak::upgrade)
            .map(StatusAlert::from_cell)
    }

    /// Consults the policy for `alert`, force-dismissing alerts it replaces.
    /// Returns `false` when the request is rejected.
    ///
    /// Dismissing a replaced alert calls into the host, which may show
    /// another alert; the decision is taken again until nothing is left to
    /// replace.
    pub(crate) fn admit(&self, alert: &StatusAlert) -> bool {
        let id = alert.id();
        loop {
            let (mode, admission) = {
                let policy = self.policy.borrow();
                (policy.mode(), policy.decide(id))
            };

            match admission {
                Admission::Reject => {
                    tracing::debug!(alert = %id, %mode, "show rejected: presenter busy");
                    return false;
                }
                Admission::Admit => break,
                Admission::Replace(victims) => {
                    for victim in victims {
                        tracing::debug!(alert = %id, replaced = %victim, "replacing current alert");
                        let dismissed = self
                            .member(victim)
                            .is_some_and(|current| current.force_dismiss());
                        if !dismissed {
                            self.policy.borrow_mut().release(victim);
                        }
                    }
                }
            }
        }

        self.policy.borrow_mut().admit(id);
        self.members.borrow_mut().insert(id, alert.downgrade());
        true
    }

    /// Leaves the active set; the alert is dismissing.
    pub(crate) fn release(&self, id: AlertId) {
        self.policy.borrow_mut().release(id);
    }

    /// Drops bookkeeping for a removed alert.
    pub(crate) fn forget(&self, id: AlertId) {
        self.policy.borrow_mut().release(id);
        self.members.borrow_mut().remove(&id);
    }

    fn attached(&self) -> Vec<StatusAlert> {
        let mut alerts: Vec<StatusAlert> = self
            .members
            .borrow()
            .values()
            .filter_map(Weak::upgrade)
            .map(StatusAlert::from_cell)
            .collect();
        alerts.sort_by_key(StatusAlert::id);
        alerts
    }
}

/// Creates and shows status alerts.
///
/// Cheap to clone; clones share policy, default style and collaborators.
#[derive(Clone)]
pub struct Presenter {
    inner: Rc<PresenterInner>,
}

impl Presenter {
    /// Creates a presenter bound to the calling thread.
    pub fn new(env: Environment) -> Self {
        Self::with_parts(env, PresentationMode::default(), Style::default())
    }

    /// Creates a presenter using the mode and style overrides of `config`.
    pub fn with_config(env: Environment, config: &Config) -> Self {
        Self::with_parts(env, config.mode, config.resolved_style())
    }

    fn with_parts(env: Environment, mode: PresentationMode, style: Style) -> Self {
        Self {
            inner: Rc::new(PresenterInner {
                ui_thread: UiThread::current(),
                env,
                policy: RefCell::new(PresentationPolicy::new(mode)),
                default_style: RefCell::new(style),
                members: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// Starts building an alert. The current default style is captured now;
    /// later changes to it do not affect this alert.
    pub fn alert(&self, content: Content) -> AlertBuilder {
        AlertBuilder {
            presenter: Rc::clone(&self.inner),
            content,
            style: self.default_style(),
            pickable: false,
            announcement: Some(Announcement::from_content()),
        }
    }

    /// Builds an alert from `content` and the options' `pickable` and
    /// `style`, then shows it.
    ///
    /// The returned handle is inert when the request was rejected.
    pub fn show(&self, content: Content, options: ShowOptions) -> StatusAlert {
        let mut builder = self.alert(content).pickable(options.pickable);
        if let Some(style) = options.style.clone() {
            builder = builder.style(style);
        }
        builder.show(options)
    }

    #[must_use]
    pub fn presentation_mode(&self) -> PresentationMode {
        self.inner.policy.borrow().mode()
    }

    /// Applies to future show requests only.
    pub fn set_presentation_mode(&self, mode: PresentationMode) {
        self.inner.ui_thread.assert_current("set_presentation_mode");
        self.inner.policy.borrow_mut().set_mode(mode);
        tracing::debug!(%mode, "presentation mode changed");
    }

    #[must_use]
    pub fn default_style(&self) -> Style {
        self.inner.default_style.borrow().clone()
    }

    /// Applies to alerts built afterwards only.
    pub fn set_default_style(&self, style: Style) {
        self.inner.ui_thread.assert_current("set_default_style");
        *self.inner.default_style.borrow_mut() = style;
    }

    /// Number of alerts currently presenting.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.inner.policy.borrow().active().len()
    }

    /// Ids of presenting alerts, oldest first.
    #[must_use]
    pub fn active_alerts(&self) -> Vec<AlertId> {
        self.inner.policy.borrow().active().to_vec()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.policy.borrow().is_busy()
    }

    /// Re-queries blur availability and updates the backdrop of every
    /// attached alert. Call when the platform's transparency setting changes.
    pub fn accessibility_settings_changed(&self) {
        self.inner
            .ui_thread
            .assert_current("accessibility_settings_changed");
        for alert in self.inner.attached() {
            alert.refresh_backdrop();
        }
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.inner.env
    }
}

impl fmt::Debug for Presenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter")
            .field("mode", &self.presentation_mode())
            .field("active", &self.active_alerts())
            .finish_non_exhaustive()
    }
}

/// Configures one alert before it is built.
#[must_use]
pub struct AlertBuilder {
    presenter: Rc<PresenterInner>,
    content: Content,
    style: Style,
    pickable: bool,
    announcement: Option<Announcement>,
}

impl AlertBuilder {
    /// Whether a press on the alert dismisses it. Off by default.
    pub fn pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn style_overrides(mut self, overrides: &StyleOverrides) -> Self {
        self.style = self.style.with_overrides(overrides);
        self
    }

    /// Replaces the default "title, message" announcement.
    pub fn announcement(mut self, announcement: Announcement) -> Self {
        self.announcement = Some(announcement);
        self
    }

    /// Posts no announcement at all.
    pub fn silent(mut self) -> Self {
        self.announcement = None;
        self
    }

    pub fn build(self) -> StatusAlert {
        StatusAlert::new(
            self.presenter,
            self.content,
            self.style,
            self.pickable,
            self.announcement,
        )
    }

    /// Builds the alert and shows it.
    pub fn show(self, options: ShowOptions) -> StatusAlert {
        let alert = self.build();
        alert.show(options);
        alert
    }
}

impl fmt::Debug for AlertBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertBuilder")
            .field("content", &self.content)
            .field("style", &self.style)
            .field("pickable", &self.pickable)
            .finish_non_exhaustive()
    }
}
