// SPDX-License-Identifier: MPL-2.0
//! Toolkit-neutral rendering model.
//!
//! # Components
//!
//! - [`tree`] - `VisualTree` describing the alert's content and container
//! - [`builder`] - `ContentBuilder` seam and the default stack layout
//! - [`transition`] - animated `Visual` state and entrance/exit transitions

pub mod builder;
pub mod transition;
pub mod tree;

pub use builder::{ContentBuilder, StackContentBuilder};
pub use transition::{Curve, Transition, Visual};
pub use tree::{Backdrop, Container, Insets, Label, LabelRole, StackItem, VisualTree};
