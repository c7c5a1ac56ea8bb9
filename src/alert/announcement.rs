// SPDX-License-Identifier: MPL-2.0
//! Accessibility announcement posted once an alert has appeared.

use super::content::Content;
use std::fmt;
use std::rc::Rc;

type Formatter = Rc<dyn Fn(&Content) -> Option<String>>;

/// Text announced to assistive technologies.
///
/// Evaluated exactly once, when the alert starts presenting; the result is
/// posted when the entrance transition completes.
#[derive(Clone)]
pub enum Announcement {
    Text(String),
    Formatted(Formatter),
}

impl Announcement {
    pub fn text(text: impl Into<String>) -> Self {
        Announcement::Text(text.into())
    }

    pub fn formatted(formatter: impl Fn(&Content) -> Option<String> + 'static) -> Self {
        Announcement::Formatted(Rc::new(formatter))
    }

    /// Announces the title and message, joined by a comma.
    #[must_use]
    pub fn from_content() -> Self {
        Self::formatted(describe)
    }

    pub(crate) fn resolve(&self, content: &Content) -> Option<String> {
        match self {
            Announcement::Text(text) if text.is_empty() => None,
            Announcement::Text(text) => Some(text.clone()),
            Announcement::Formatted(format) => format(content),
        }
    }
}

impl fmt::Debug for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Announcement::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Announcement::Formatted(_) => f.write_str("Formatted(..)"),
        }
    }
}

/// Default wording: `"title, message"`, or whichever of the two exists.
#[must_use]
pub fn describe(content: &Content) -> Option<String> {
    match (content.title_text(), content.message_text()) {
        (Some(title), Some(message)) => Some(format!("{title}, {message}")),
        (Some(title), None) => Some(title.to_string()),
        (None, Some(message)) => Some(message.to_string()),
        (None, None) => None,
    }
}
