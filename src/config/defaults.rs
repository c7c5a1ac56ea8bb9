// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Timing**: Display and fade durations
//! - **Transform**: Entrance/exit scale
//! - **Placement**: Default offsets for top/bottom anchoring
//! - **Layout**: Sizes and spacings used by the stack content builder
//! - **Typography & Colors**: System-look fonts and colors

use std::time::Duration;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Total time an alert stays on screen, including its exit fade.
pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_secs(2);

/// Duration of the entrance and exit transitions.
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(200);

/// Frame interval used by animators that step transitions themselves.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

// ==========================================================================
// Transform Defaults
// ==========================================================================

/// Scale an alert enters from and exits to.
pub const DEFAULT_INITIAL_SCALE: f32 = 0.9;

// ==========================================================================
// Placement Defaults
// ==========================================================================

/// Distance from the host's top edge when no offset is given.
pub const DEFAULT_TOP_OFFSET: f32 = 32.0;

/// Distance from the host's bottom edge when no offset is given.
pub const DEFAULT_BOTTOM_OFFSET: f32 = 32.0;

/// Offset from the host's vertical center when no offset is given.
pub const DEFAULT_CENTER_OFFSET: f32 = 0.0;

// ==========================================================================
// Layout Defaults
// ==========================================================================

pub const DEFAULT_CORNER_RADIUS: f32 = 10.0;

/// Image edge length at @1x.
pub const DEFAULT_IMAGE_WIDTH: f32 = 90.0;

pub const DEFAULT_ALERT_WIDTH: f32 = 258.0;

/// Minimum height of alerts showing both an image and text.
pub const MINIMUM_ALERT_HEIGHT: f32 = 240.0;

pub const MINIMUM_STACK_TOP_SPACE: f32 = 44.0;
pub const MINIMUM_STACK_BOTTOM_SPACE: f32 = 24.0;
pub const STACK_SIDE_SPACE: f32 = 24.0;

/// Space below the image when both a title and a message follow it.
pub const DEFAULT_IMAGE_BOTTOM_SPACE: f32 = 30.0;

/// Space below the title, and below the image when only one label follows.
pub const DEFAULT_TITLE_BOTTOM_SPACE: f32 = 5.0;

/// Letter spacing applied to both labels.
pub const LABEL_KERNING: f32 = 0.01;

/// Line spacing of the message label.
pub const MESSAGE_LINE_SPACING: f32 = 3.0;

// ==========================================================================
// Typography & Colors
// ==========================================================================

pub const DEFAULT_TITLE_FONT_SIZE: f32 = 23.0;
pub const DEFAULT_MESSAGE_FONT_SIZE: f32 = 16.0;

/// Tint of the image and labels (dark gray).
pub const DEFAULT_TINT_RGBA: [f32; 4] = [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 1.0];

/// Solid background used when blur is unavailable.
pub const DEFAULT_BACKGROUND_RGBA: [f32; 4] = [0.937, 0.937, 0.957, 1.0];
