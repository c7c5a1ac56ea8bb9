// SPDX-License-Identifier: MPL-2.0
//! What an alert displays: an optional image, title and message.

use std::fmt;
use std::rc::Rc;

/// Opaque reference to an image owned by the host toolkit.
///
/// The core never decodes images; it only forwards the handle to the
/// content builder. Cloning is cheap.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(Rc<str>);

impl ImageHandle {
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ImageHandle").field(&&*self.0).finish()
    }
}

/// Image, title and message of an alert. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    image: Option<ImageHandle>,
    title: Option<String>,
    message: Option<String>,
}

impl Content {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_image(mut self, image: ImageHandle) -> Self {
        self.image = Some(image);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = non_empty(message.into());
        self
    }

    /// Creates content with only a title.
    pub fn title(title: impl Into<String>) -> Self {
        Self::new().with_title(title)
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn has_text(&self) -> bool {
        self.title.is_some() || self.message.is_some()
    }

    /// Returns whether there is nothing to show. Such content is never
    /// admitted for presentation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && !self.has_text()
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
