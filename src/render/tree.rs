// SPDX-License-Identifier: MPL-2.0
//! Renderable description of an alert's content.
//!
//! The tree is toolkit-neutral: hosts translate it into their own views.

use crate::alert::content::ImageHandle;
use crate::alert::style::{Color, Font, Style};

/// Background behind the alert's content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backdrop {
    /// Light system blur of whatever lies behind the alert.
    Blur,
    /// Opaque fill, used when blur is unavailable.
    Solid(Color),
}

impl Backdrop {
    /// Picks blur when the platform allows it, else the style's background.
    #[must_use]
    pub fn select(can_use_blur: bool, style: &Style) -> Self {
        if can_use_blur {
            Backdrop::Blur
        } else {
            Backdrop::Solid(style.background_color)
        }
    }
}

/// Space between the rounded container and the vertical stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insets {
    /// Minimum space above the stack.
    pub top: f32,
    /// Minimum space below the stack.
    pub bottom: f32,
    /// Leading and trailing space.
    pub side: f32,
}

/// Rounded container holding the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// Fixed width, or `None` to hug the content.
    pub width: Option<f32>,
    pub min_height: Option<f32>,
    pub corner_radius: f32,
    pub backdrop: Backdrop,
    pub insets: Insets,
    /// Offset of the stack's vertical center from the container's.
    pub vertical_bias: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    Title,
    Message,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub role: LabelRole,
    pub text: String,
    pub font: Font,
    pub color: Color,
    pub kerning: f32,
    pub line_spacing: f32,
}

/// One arranged child of the vertical, centre-aligned stack.
#[derive(Debug, Clone, PartialEq)]
pub enum StackItem {
    /// Square, aspect-fit image tinted with the style's tint color.
    Image {
        handle: ImageHandle,
        edge: f32,
        tint: Color,
    },
    Label(Label),
    Spacer(f32),
}

/// Output of a [`ContentBuilder`](super::ContentBuilder).
#[derive(Debug, Clone, PartialEq)]
pub struct VisualTree {
    pub container: Container,
    pub items: Vec<StackItem>,
}

impl VisualTree {
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.items.iter().filter_map(|item| match item {
            StackItem::Label(label) => Some(label),
            _ => None,
        })
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, StackItem::Image { .. }))
    }
}
