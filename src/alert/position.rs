// SPDX-License-Identifier: MPL-2.0
//! Vertical placement of an alert inside its host.

use super::style::Style;
use crate::config::defaults::DEFAULT_CENTER_OFFSET;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalPosition {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VerticalPosition {
    pub const ALL: [VerticalPosition; 3] = [
        VerticalPosition::Top,
        VerticalPosition::Center,
        VerticalPosition::Bottom,
    ];
}

impl fmt::Display for VerticalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VerticalPosition::Top => "top",
            VerticalPosition::Center => "center",
            VerticalPosition::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

impl FromStr for VerticalPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(VerticalPosition::Top),
            "center" | "centre" => Ok(VerticalPosition::Center),
            "bottom" => Ok(VerticalPosition::Bottom),
            other => Err(format!("unknown vertical position: {other}")),
        }
    }
}

/// Resolved layout constraint against the host.
///
/// The alert is always centred horizontally. Vertically, `Top` pins the
/// alert's top edge to the host's safe-area top plus `constant`, `Bottom`
/// pins its bottom edge to the safe-area bottom plus `constant` (negative
/// moves it up), and `Center` offsets its vertical center by `constant`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: VerticalPosition,
    pub constant: f32,
}

impl Anchor {
    /// Resolves the constant for `position`.
    ///
    /// An explicit offset is used as-is, zero included; only a missing
    /// offset falls back to the style's default for that edge.
    #[must_use]
    pub fn resolve(position: VerticalPosition, offset: Option<f32>, style: &Style) -> Self {
        let constant = offset.unwrap_or(match position {
            VerticalPosition::Top => style.top_offset,
            VerticalPosition::Center => DEFAULT_CENTER_OFFSET,
            VerticalPosition::Bottom => -style.bottom_offset,
        });
        Self { position, constant }
    }
}
