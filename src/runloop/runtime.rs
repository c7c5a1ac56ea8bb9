// SPDX-License-Identifier: MPL-2.0
//! Run loop backed by a single-threaded tokio runtime.
//!
//! Callbacks are spawned with [`tokio::task::spawn_local`], so every method
//! must be called from inside a [`tokio::task::LocalSet`] on the UI thread.

use crate::alert::AlertId;
use crate::config::defaults::DEFAULT_FRAME_INTERVAL;
use crate::platform::{AnimationTarget, Animator, Callback, Cancellable, Scheduler};
use crate::render::{Transition, Visual};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::AbortHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// A transition task still stepping an alert's visual.
#[derive(Debug)]
struct Running {
    task: AbortHandle,
    /// Last visual sent to the host.
    visual: Rc<Cell<Visual>>,
}

type RunningTransitions = Rc<RefCell<HashMap<AlertId, Running>>>;

/// Scheduler and animator for alerts driven by tokio timers.
///
/// At most one transition runs per alert: starting another aborts the one in
/// flight and continues from the last visual it sent.
#[derive(Debug, Clone)]
pub struct TokioRunLoop {
    frame_interval: Duration,
    running: RunningTransitions,
}

impl TokioRunLoop {
    /// `frame_interval` paces intermediate visuals during transitions.
    #[must_use]
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            running: Rc::default(),
        }
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Transitions whose task has not finished yet.
    #[must_use]
    pub fn running_transitions(&self) -> usize {
        self.running.borrow().len()
    }
}

impl Default for TokioRunLoop {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

/// Aborts the sleeping task on cancel.
#[derive(Debug)]
pub struct TokioTimer(AbortHandle);

impl Cancellable for TokioTimer {
    fn cancel(&self) {
        self.0.abort();
    }
}

impl Scheduler for TokioRunLoop {
    fn schedule_delayed(&self, delay: Duration, on_fire: Callback) -> Box<dyn Cancellable> {
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        });
        Box::new(TokioTimer(handle.abort_handle()))
    }
}

impl Animator for TokioRunLoop {
    fn run_transition(&self, target: AnimationTarget, transition: Transition, on_complete: Callback) {
        let alert = target.alert;
        let mut transition = transition;
        if let Some(previous) = self.running.borrow_mut().remove(&alert) {
            previous.task.abort();
            transition.from = previous.visual.get();
            tracing::trace!(%alert, "transition superseded");
        }

        let visual = Rc::new(Cell::new(transition.from));
        let sent = Rc::clone(&visual);
        let running = Rc::clone(&self.running);
        let frame_interval = self.frame_interval;
        let task = tokio::task::spawn_local(async move {
            let start = Instant::now();
            let mut frames = tokio::time::interval(frame_interval);
            frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                frames.tick().await;
                let elapsed = start.elapsed();
                if transition.is_finished_at(elapsed) {
                    break;
                }
                let frame = transition.sample(elapsed);
                sent.set(frame);
                target.host.set_visual(alert, frame);
            }
            sent.set(transition.to);
            target.host.set_visual(alert, transition.to);

            {
                let mut running = running.borrow_mut();
                if running
                    .get(&alert)
                    .is_some_and(|entry| Rc::ptr_eq(&entry.visual, &sent))
                {
                    running.remove(&alert);
                }
            }
            on_complete();
        });

        self.running.borrow_mut().insert(
            alert,
            Running {
                task: task.abort_handle(),
                visual,
            },
        );
    }
}
