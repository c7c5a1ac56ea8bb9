// SPDX-License-Identifier: MPL-2.0
//! Run loops implementing [`Scheduler`](crate::platform::Scheduler) and
//! [`Animator`](crate::platform::Animator).
//!
//! - [`SimulatedRunLoop`] - virtual clock, advanced by hand
//! - [`TokioRunLoop`] - tokio timers on a `LocalSet`

pub mod runtime;
pub mod simulated;

pub use runtime::{TokioRunLoop, TokioTimer};
pub use simulated::{SimulatedRunLoop, SimulatedTimer};
