// SPDX-License-Identifier: MPL-2.0
//! Default content builder: a vertical stack inside a rounded container.

use super::tree::{Backdrop, Container, Insets, Label, LabelRole, StackItem, VisualTree};
use crate::alert::content::Content;
use crate::alert::style::Style;
use crate::config::defaults::{
    DEFAULT_IMAGE_BOTTOM_SPACE, DEFAULT_TITLE_BOTTOM_SPACE, LABEL_KERNING, MESSAGE_LINE_SPACING,
    MINIMUM_STACK_BOTTOM_SPACE, MINIMUM_STACK_TOP_SPACE, STACK_SIDE_SPACE,
};

/// Turns alert content into a renderable tree.
///
/// Called exactly once per alert, while it is being prepared. Implementations
/// must be pure functions of their inputs.
pub trait ContentBuilder {
    fn build(&self, content: &Content, style: &Style, backdrop: Backdrop) -> VisualTree;
}

impl<F> ContentBuilder for F
where
    F: Fn(&Content, &Style, Backdrop) -> VisualTree,
{
    fn build(&self, content: &Content, style: &Style, backdrop: Backdrop) -> VisualTree {
        self(content, style, backdrop)
    }
}

/// Lays content out the way system status alerts look.
///
/// - image and text: fixed width, minimum height, stack biased downwards
/// - text only: fixed width
/// - image only: hugs the image
#[derive(Debug, Clone, Copy, Default)]
pub struct StackContentBuilder;

impl ContentBuilder for StackContentBuilder {
    fn build(&self, content: &Content, style: &Style, backdrop: Backdrop) -> VisualTree {
        VisualTree {
            container: container(content, style, backdrop),
            items: items(content, style),
        }
    }
}

fn container(content: &Content, style: &Style, backdrop: Backdrop) -> Container {
    let has_image = content.image().is_some();
    let has_text = content.has_text();

    let (width, min_height, top, vertical_bias) = if has_image && has_text {
        (
            Some(style.alert_width),
            Some(style.minimum_height),
            MINIMUM_STACK_TOP_SPACE,
            (MINIMUM_STACK_TOP_SPACE - MINIMUM_STACK_BOTTOM_SPACE) / 2.0,
        )
    } else {
        let width = (!has_image).then_some(style.alert_width);
        (width, None, MINIMUM_STACK_BOTTOM_SPACE, 0.0)
    };

    Container {
        width,
        min_height,
        corner_radius: style.corner_radius,
        backdrop,
        insets: Insets {
            top,
            bottom: MINIMUM_STACK_BOTTOM_SPACE,
            side: STACK_SIDE_SPACE,
        },
        vertical_bias,
    }
}

fn items(content: &Content, style: &Style) -> Vec<StackItem> {
    let title = content.title_text();
    let message = content.message_text();
    let mut items = Vec::with_capacity(5);

    if let Some(handle) = content.image() {
        items.push(StackItem::Image {
            handle: handle.clone(),
            edge: style.image_width,
            tint: style.tint_color,
        });
        if content.has_text() {
            let space = if title.is_some() && message.is_some() {
                DEFAULT_IMAGE_BOTTOM_SPACE
            } else {
                DEFAULT_TITLE_BOTTOM_SPACE
            };
            items.push(StackItem::Spacer(space));
        }
    }

    if let Some(title) = title {
        items.push(StackItem::Label(Label {
            role: LabelRole::Title,
            text: title.to_string(),
            font: style.title_font,
            color: style.tint_color,
            kerning: LABEL_KERNING,
            line_spacing: 0.0,
        }));
        if message.is_some() {
            items.push(StackItem::Spacer(DEFAULT_TITLE_BOTTOM_SPACE));
        }
    }

    if let Some(message) = message {
        items.push(StackItem::Label(Label {
            role: LabelRole::Message,
            text: message.to_string(),
            font: style.message_font,
            color: style.tint_color,
            kerning: LABEL_KERNING,
            line_spacing: MESSAGE_LINE_SPACING,
        }));
    }

    items
}
