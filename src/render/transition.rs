// SPDX-License-Identifier: MPL-2.0
//! Animated properties of an alert and the transitions between them.

use crate::alert::style::Style;
use std::time::Duration;

/// Animated properties of an attached alert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub scale: f32,
    pub opacity: f32,
}

impl Visual {
    /// Fully visible at natural size.
    pub const SHOWN: Visual = Visual {
        scale: 1.0,
        opacity: 1.0,
    };

    /// Transparent and shrunk to `scale`.
    #[must_use]
    pub const fn hidden(scale: f32) -> Self {
        Self {
            scale,
            opacity: 0.0,
        }
    }

    /// Interpolates between `self` and `to`, `t` in `0.0..=1.0`.
    #[must_use]
    pub fn lerp(self, to: Visual, t: f32) -> Visual {
        Visual {
            scale: lerp(self.scale, to.scale, t),
            opacity: lerp(self.opacity, to.opacity, t),
        }
    }
}

/// Timing curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    Linear,
    /// Fast start, decelerates.
    #[default]
    EaseOut,
}

impl Curve {
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::EaseOut => ease_out(t),
        }
    }
}

#[inline]
fn lerp(start: f32, end: f32, t: f32) -> f32 {
    (end - start).mul_add(t, start)
}

#[inline]
fn ease_out(t: f32) -> f32 {
    let t1 = t - 1.0;
    (t1 * t1).mul_add(t1, 1.0)
}

/// Animation request handed to the animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: Visual,
    pub to: Visual,
    pub duration: Duration,
    pub curve: Curve,
}

impl Transition {
    /// Grow from the initial scale and fade in.
    #[must_use]
    pub fn entrance(style: &Style) -> Self {
        Self {
            from: Visual::hidden(style.initial_scale),
            to: Visual::SHOWN,
            duration: style.fade_duration,
            curve: Curve::EaseOut,
        }
    }

    /// Shrink back to the initial scale and fade out.
    #[must_use]
    pub fn exit(style: &Style) -> Self {
        Self {
            from: Visual::SHOWN,
            to: Visual::hidden(style.initial_scale),
            duration: style.fade_duration,
            curve: Curve::EaseOut,
        }
    }

    /// Returns the visual state after `elapsed` time.
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> Visual {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        self.from.lerp(self.to, self.curve.apply(progress))
    }

    #[must_use]
    pub fn is_finished_at(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}
