// SPDX-License-Identifier: MPL-2.0
//! `status_alert` shows transient, auto-dismissing status alerts over a host
//! view, in the manner of system volume or "Copied" indicators.
//!
//! The crate is toolkit-neutral. It owns the presentation lifecycle and the
//! policy for concurrent alerts; the host toolkit supplies views, timers and
//! animations through the traits in [`platform`].
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
//!
//! let alert = presenter.show(
//!     Content::new().with_title("Copied").with_message("Link copied to clipboard"),
//!     ShowOptions::bottom(),
//! );
//! assert!(alert.is_presenting());
//!
//! run_loop.advance(Duration::from_secs(2));
//! assert!(alert.state().is_terminal());
//! ```

pub mod alert;
pub mod config;
pub mod error;
pub mod platform;
pub mod presentation;
pub mod render;
pub mod runloop;
#[doc(hidden)]
pub mod test_utils;

pub use alert::{
    AlertId, Announcement, Content, GesturePhase, ImageHandle, LifecycleState, ShowOptions,
    StatusAlert, Style, StyleOverrides, VerticalPosition,
};
pub use config::Config;
pub use error::{Error, Result};
pub use platform::{Environment, Host, LoggingHost};
pub use presentation::{AlertBuilder, PresentationMode, Presenter};
