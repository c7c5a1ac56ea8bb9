// SPDX-License-Identifier: MPL-2.0
//! Deterministic run loop driven by a virtual clock.
//!
//! Nothing happens until [`SimulatedRunLoop::advance`] is called. Events due
//! at the same instant run in the order they were registered. Transitions
//! complete at `start + duration`; the alert's visual is sampled at the end
//! of every `advance` so hosts see intermediate states. A new transition
//! for an alert replaces the one in flight and starts from its current
//! visual; the replaced completion never runs.

use crate::platform::{AnimationTarget, Animator, Callback, Cancellable, Scheduler};
use crate::render::Transition;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

struct PendingTimer {
    due: Duration,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    on_fire: Callback,
}

struct PendingAnimation {
    start: Duration,
    due: Duration,
    seq: u64,
    target: AnimationTarget,
    transition: Transition,
    on_complete: Callback,
}

enum Due {
    Timer(usize),
    Animation(usize),
}

/// Cancellation handle for a simulated timer.
#[derive(Debug, Clone)]
pub struct SimulatedTimer {
    cancelled: Rc<Cell<bool>>,
}

impl Cancellable for SimulatedTimer {
    fn cancel(&self) {
        self.cancelled.set(true);
    }
}

#[derive(Default)]
pub struct SimulatedRunLoop {
    now: Cell<Duration>,
    seq: Cell<u64>,
    timers: RefCell<Vec<PendingTimer>>,
    animations: RefCell<Vec<PendingAnimation>>,
    hold_animations: Cell<bool>,
}

impl SimulatedRunLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Timers that are neither fired nor cancelled.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers
            .borrow()
            .iter()
            .filter(|timer| !timer.cancelled.get())
            .count()
    }

    #[must_use]
    pub fn pending_animations(&self) -> usize {
        self.animations.borrow().len()
    }

    /// While held, transitions never complete, like an animator that
    /// stalls. Releasing lets overdue transitions complete on the next
    /// `advance`.
    pub fn hold_animations(&self, hold: bool) {
        self.hold_animations.set(hold);
    }

    fn next_seq(&self) -> u64 {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        seq
    }

    /// Moves the clock forward by `delta`, running every event due on the
    /// way.
    pub fn advance(&self, delta: Duration) {
        let deadline = self.now.get() + delta;
        while let Some(at) = self.run_next(Some(deadline)) {
            tracing::trace!(?at, "simulated event ran");
        }
        self.now.set(deadline);
        self.sample_animations();
    }

    /// Runs events until none are left, jumping the clock to each one.
    /// Held transitions are not waited for.
    pub fn run_until_idle(&self) {
        while self.run_next(None).is_some() {}
        self.sample_animations();
    }

    /// Runs the earliest event due no later than `deadline`. Returns its due
    /// time, or `None` when there is nothing to run.
    fn run_next(&self, deadline: Option<Duration>) -> Option<Duration> {
        self.timers
            .borrow_mut()
            .retain(|timer| !timer.cancelled.get());

        let (due, next) = self.earliest()?;
        if deadline.is_some_and(|deadline| due > deadline) {
            return None;
        }
        self.now.set(due.max(self.now.get()));

        match next {
            Due::Timer(index) => {
                let timer = self.timers.borrow_mut().remove(index);
                timer.cancelled.set(true);
                (timer.on_fire)();
            }
            Due::Animation(index) => {
                let animation = self.animations.borrow_mut().remove(index);
                animation
                    .target
                    .host
                    .set_visual(animation.target.alert, animation.transition.to);
                (animation.on_complete)();
            }
        }
        Some(due)
    }

    fn earliest(&self) -> Option<(Duration, Due)> {
        let timers = self.timers.borrow();
        let timer = timers
            .iter()
            .enumerate()
            .min_by_key(|(_, timer)| (timer.due, timer.seq))
            .map(|(index, timer)| ((timer.due, timer.seq), Due::Timer(index)));

        let animations = self.animations.borrow();
        let animation = if self.hold_animations.get() {
            None
        } else {
            animations
                .iter()
                .enumerate()
                .min_by_key(|(_, animation)| (animation.due, animation.seq))
                .map(|(index, animation)| {
                    ((animation.due, animation.seq), Due::Animation(index))
                })
        };

        let ((due, _), next) = match (timer, animation) {
            (Some(timer), Some(animation)) => {
                if timer.0 <= animation.0 {
                    timer
                } else {
                    animation
                }
            }
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => return None,
        };
        Some((due, next))
    }

    /// Pushes the current visual of every in-flight transition.
    fn sample_animations(&self) {
        let now = self.now.get();
        let frames: Vec<_> = self
            .animations
            .borrow()
            .iter()
            .map(|animation| {
                let elapsed = now.saturating_sub(animation.start);
                (
                    animation.target.clone(),
                    animation.transition.sample(elapsed),
                )
            })
            .collect();
        for (target, visual) in frames {
            target.host.set_visual(target.alert, visual);
        }
    }
}

impl Scheduler for SimulatedRunLoop {
    fn schedule_delayed(&self, delay: Duration, on_fire: Callback) -> Box<dyn Cancellable> {
        let cancelled = Rc::new(Cell::new(false));
        let timer = PendingTimer {
            due: self.now.get() + delay,
            seq: self.next_seq(),
            cancelled: Rc::clone(&cancelled),
            on_fire,
        };
        self.timers.borrow_mut().push(timer);
        Box::new(SimulatedTimer { cancelled })
    }
}

impl Animator for SimulatedRunLoop {
    fn run_transition(&self, target: AnimationTarget, transition: Transition, on_complete: Callback) {
        let start = self.now.get();
        let mut transition = transition;
        let superseded = {
            let mut animations = self.animations.borrow_mut();
            animations
                .iter()
                .position(|animation| animation.target.alert == target.alert)
                .map(|index| animations.remove(index))
        };
        if let Some(previous) = superseded {
            transition.from = previous
                .transition
                .sample(start.saturating_sub(previous.start));
            tracing::trace!(alert = %target.alert, "transition superseded");
        }
        let animation = PendingAnimation {
            start,
            due: start + transition.duration,
            seq: self.next_seq(),
            target,
            transition,
            on_complete,
        };
        self.animations.borrow_mut().push(animation);
    }
}

impl std::fmt::Debug for SimulatedRunLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedRunLoop")
            .field("now", &self.now.get())
            .field("pending_timers", &self.pending_timers())
            .field("pending_animations", &self.pending_animations())
            .field("hold_animations", &self.hold_animations.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::style::Style;
    use crate::alert::AlertId;
    use crate::render::Visual;
    use crate::test_utils::RecordingHost;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Callback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |label: &'static str| -> Callback {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn timers_fire_in_due_then_registration_order() {
        let run_loop = SimulatedRunLoop::new();
        let (log, make) = recorder();

        let _late = run_loop.schedule_delayed(Duration::from_millis(30), make("late"));
        let _first = run_loop.schedule_delayed(Duration::from_millis(10), make("first"));
        let _second = run_loop.schedule_delayed(Duration::from_millis(10), make("second"));

        run_loop.advance(Duration::from_millis(20));
        assert_eq!(*log.borrow(), vec!["first", "second"]);

        run_loop.advance(Duration::from_millis(10));
        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
        assert_eq!(run_loop.now(), Duration::from_millis(30));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let run_loop = SimulatedRunLoop::new();
        let (log, make) = recorder();

        let handle = run_loop.schedule_delayed(Duration::from_millis(5), make("cancelled"));
        handle.cancel();
        handle.cancel();
        assert_eq!(run_loop.pending_timers(), 0);

        run_loop.run_until_idle();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn transition_completes_after_its_duration() {
        let run_loop = SimulatedRunLoop::new();
        let host = Rc::new(RecordingHost::new());
        let alert = AlertId::new();
        let (log, make) = recorder();
        let transition = Transition::entrance(&Style::default());

        run_loop.run_transition(
            AnimationTarget {
                host: host.clone(),
                alert,
            },
            transition,
            make("done"),
        );

        run_loop.advance(Duration::from_millis(100));
        assert!(log.borrow().is_empty());
        assert_eq!(
            host.last_visual(alert),
            Some(transition.sample(Duration::from_millis(100)))
        );

        run_loop.advance(Duration::from_millis(100));
        assert_eq!(*log.borrow(), vec!["done"]);
        assert_eq!(host.last_visual(alert), Some(Visual::SHOWN));
    }

    #[test]
    fn held_transitions_stay_pending() {
        let run_loop = SimulatedRunLoop::new();
        let host = Rc::new(RecordingHost::new());
        let (log, make) = recorder();
        run_loop.hold_animations(true);

        run_loop.run_transition(
            AnimationTarget {
                host: host.clone(),
                alert: AlertId::new(),
            },
            Transition::exit(&Style::default()),
            make("done"),
        );
        run_loop.advance(Duration::from_secs(60));
        assert!(log.borrow().is_empty());
        assert_eq!(run_loop.pending_animations(), 1);

        run_loop.hold_animations(false);
        run_loop.advance(Duration::ZERO);
        assert_eq!(*log.borrow(), vec!["done"]);
    }

    #[test]
    fn new_transition_takes_over_from_current_visual() {
        let run_loop = SimulatedRunLoop::new();
        let host = Rc::new(RecordingHost::new());
        let alert = AlertId::new();
        let (log, make) = recorder();
        let style = Style::default();
        let entrance = Transition::entrance(&style);
        let target = AnimationTarget {
            host: host.clone(),
            alert,
        };

        run_loop.run_transition(target.clone(), entrance, make("entrance"));
        run_loop.advance(Duration::from_millis(50));
        let reached = entrance.sample(Duration::from_millis(50));

        run_loop.run_transition(target, Transition::exit(&style), make("exit"));
        assert_eq!(run_loop.pending_animations(), 1);

        let before = host.visual_count(alert);
        run_loop.advance(Duration::from_millis(100));
        run_loop.run_until_idle();
        let fade = &host.visuals(alert)[before..];
        assert!(fade[0].opacity <= reached.opacity);
        assert!(fade.windows(2).all(|pair| pair[1].opacity <= pair[0].opacity));
        assert_eq!(*log.borrow(), vec!["exit"]);
    }

    #[test]
    fn callbacks_may_schedule_more_work() {
        let run_loop = Rc::new(SimulatedRunLoop::new());
        let fired = Rc::new(Cell::new(0));

        let inner_loop = Rc::clone(&run_loop);
        let inner_fired = Rc::clone(&fired);
        let _outer = run_loop.schedule_delayed(
            Duration::from_millis(10),
            Box::new(move || {
                inner_fired.set(inner_fired.get() + 1);
                let again = Rc::clone(&inner_fired);
                let _inner = inner_loop.schedule_delayed(
                    Duration::from_millis(10),
                    Box::new(move || again.set(again.get() + 1)),
                );
            }),
        );

        run_loop.advance(Duration::from_millis(25));
        assert_eq!(fired.get(), 2);
    }
}
