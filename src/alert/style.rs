// SPDX-License-Identifier: MPL-2.0
//! Alert appearance.
//!
//! A [`Style`] is a plain value. Every alert copies the presenter's default
//! style when it is constructed, so changing the default afterwards never
//! reaches an alert that already exists. Partial changes are expressed as
//! [`StyleOverrides`] and merged with [`StyleOverrides::apply`].

use crate::config::defaults::{
    DEFAULT_ALERT_WIDTH, DEFAULT_BACKGROUND_RGBA, DEFAULT_BOTTOM_OFFSET, DEFAULT_CORNER_RADIUS,
    DEFAULT_DISPLAY_DURATION, DEFAULT_FADE_DURATION, DEFAULT_IMAGE_WIDTH, DEFAULT_INITIAL_SCALE,
    DEFAULT_MESSAGE_FONT_SIZE, DEFAULT_TINT_RGBA, DEFAULT_TITLE_FONT_SIZE, DEFAULT_TOP_OFFSET,
    MINIMUM_ALERT_HEIGHT,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_rgba([0.0, 0.0, 0.0, 0.0]);

    #[must_use]
    pub const fn from_rgba(rgba: [f32; 4]) -> Self {
        Self {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

/// System font description; the host maps it to a concrete face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f32,
    #[serde(default)]
    pub weight: FontWeight,
}

impl Font {
    #[must_use]
    pub const fn new(size: f32, weight: FontWeight) -> Self {
        Self { size, weight }
    }
}

/// Complete appearance snapshot of one alert.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub title_font: Font,
    pub message_font: Font,
    /// Color of the image tint and both labels.
    pub tint_color: Color,
    /// Used when blur is unavailable.
    pub background_color: Color,
    pub corner_radius: f32,
    /// Scale the alert enters from and exits to.
    pub initial_scale: f32,
    pub top_offset: f32,
    pub bottom_offset: f32,
    pub image_width: f32,
    pub alert_width: f32,
    pub minimum_height: f32,
    /// Total on-screen time, exit fade included.
    pub display_duration: Duration,
    pub fade_duration: Duration,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            title_font: Font::new(DEFAULT_TITLE_FONT_SIZE, FontWeight::Semibold),
            message_font: Font::new(DEFAULT_MESSAGE_FONT_SIZE, FontWeight::Regular),
            tint_color: Color::from_rgba(DEFAULT_TINT_RGBA),
            background_color: Color::from_rgba(DEFAULT_BACKGROUND_RGBA),
            corner_radius: DEFAULT_CORNER_RADIUS,
            initial_scale: DEFAULT_INITIAL_SCALE,
            top_offset: DEFAULT_TOP_OFFSET,
            bottom_offset: DEFAULT_BOTTOM_OFFSET,
            image_width: DEFAULT_IMAGE_WIDTH,
            alert_width: DEFAULT_ALERT_WIDTH,
            minimum_height: MINIMUM_ALERT_HEIGHT,
            display_duration: DEFAULT_DISPLAY_DURATION,
            fade_duration: DEFAULT_FADE_DURATION,
        }
    }
}

impl Style {
    /// Delay from attaching until the auto-dismiss callback fires.
    ///
    /// The exit fade runs inside `display_duration`, so the auto-dismiss
    /// callback fires `fade_duration` early. Saturates at zero.
    #[must_use]
    pub fn dismiss_delay(&self) -> Duration {
        self.display_duration.saturating_sub(self.fade_duration)
    }

    /// Returns a copy with `overrides` merged on top.
    #[must_use]
    pub fn with_overrides(&self, overrides: &StyleOverrides) -> Self {
        overrides.apply(self)
    }
}

/// Partial style, as found in configuration files.
///
/// Durations are expressed in milliseconds to keep the TOML readable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_font: Option<Font>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_font: Option<Font>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_offset: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_offset: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_duration_ms: Option<u64>,
}

impl StyleOverrides {
    /// Merges these overrides over `base`, leaving unset fields untouched.
    #[must_use]
    pub fn apply(&self, base: &Style) -> Style {
        Style {
            title_font: self.title_font.unwrap_or(base.title_font),
            message_font: self.message_font.unwrap_or(base.message_font),
            tint_color: self.tint_color.unwrap_or(base.tint_color),
            background_color: self.background_color.unwrap_or(base.background_color),
            corner_radius: self.corner_radius.unwrap_or(base.corner_radius),
            initial_scale: self.initial_scale.unwrap_or(base.initial_scale),
            top_offset: self.top_offset.unwrap_or(base.top_offset),
            bottom_offset: self.bottom_offset.unwrap_or(base.bottom_offset),
            image_width: self.image_width.unwrap_or(base.image_width),
            alert_width: self.alert_width.unwrap_or(base.alert_width),
            minimum_height: self.minimum_height.unwrap_or(base.minimum_height),
            display_duration: self
                .display_duration_ms
                .map_or(base.display_duration, Duration::from_millis),
            fade_duration: self
                .fade_duration_ms
                .map_or(base.fade_duration, Duration::from_millis),
        }
    }

    /// Returns whether no field is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dismiss_delay_leaves_room_for_fade() {
        let style = Style::default();
        assert_eq!(style.dismiss_delay(), Duration::from_millis(1800));
    }

    #[test]
    fn dismiss_delay_saturates_when_fade_exceeds_display() {
        let style = Style {
            display_duration: Duration::from_millis(100),
            fade_duration: Duration::from_millis(300),
            ..Style::default()
        };
        assert_eq!(style.dismiss_delay(), Duration::ZERO);
    }

    #[test]
    fn empty_overrides_keep_base() {
        let base = Style::default();
        let overrides = StyleOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(overrides.apply(&base), base);
    }

    #[test]
    fn overrides_replace_only_set_fields() {
        let base = Style::default();
        let overrides = StyleOverrides {
            corner_radius: Some(4.0),
            fade_duration_ms: Some(350),
            ..StyleOverrides::default()
        };

        let merged = base.with_overrides(&overrides);
        assert_eq!(merged.corner_radius, 4.0);
        assert_eq!(merged.fade_duration, Duration::from_millis(350));
        assert_eq!(merged.title_font, base.title_font);
        assert_eq!(merged.display_duration, base.display_duration);
    }

    #[test]
    fn title_font_is_semibold_by_default() {
        let style = Style::default();
        assert_eq!(style.title_font.weight, FontWeight::Semibold);
        assert!(style.title_font.size > style.message_font.size);
    }
}
