//! Notification data
//!
//! A notification lives on the surface as `div.alert.alert--{category}`; the
//! manager keeps a [`Notification`] record for each one it is timing.

use std::fmt;
use std::time::Duration;

use crate::scheduler::TimerToken;
use crate::surface::{ElementId, RenderSurface};

/// Class carried by every banner element
pub const ALERT_CLASS: &str = "alert";

/// Class of the close button inside a banner
pub const CLOSE_BUTTON_CLASS: &str = "close-alert";

/// Prefix of the class naming a banner's category
const CATEGORY_CLASS_PREFIX: &str = "alert--";

/// Notification category - determines style and whether it expires
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    /// Neutral message, expires
    #[default]
    Info,
    /// Confirmation such as "Pedido guardado", expires
    Success,
    /// Something the user should look at, expires
    Warning,
    /// Stays until the user closes it
    Error,
    /// Any other tag used by templates, expires
    Other(String),
}

impl Category {
    /// Map a category tag to a category. Blank tags mean `Info`; whitespace
    /// inside custom tags becomes `-` so the tag stays a single class.
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "" | "info" => Category::Info,
            "success" => Category::Success,
            "warning" => Category::Warning,
            "error" => Category::Error,
            other => Category::Other(other.split_whitespace().collect::<Vec<_>>().join("-")),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Info => "info",
            Category::Success => "success",
            Category::Warning => "warning",
            Category::Error => "error",
            Category::Other(tag) => tag,
        }
    }

    /// Persistent notifications are never removed by timeout
    pub fn is_persistent(&self) -> bool {
        matches!(self, Category::Error)
    }

    /// CSS class naming this category, e.g. `alert--error`
    pub fn class_name(&self) -> String {
        format!("{}{}", CATEGORY_CLASS_PREFIX, self.as_str())
    }

    /// Auto-dismiss delay for this category, `None` for persistent ones
    pub fn auto_dismiss_after(&self, timeout: Duration) -> Option<Duration> {
        if self.is_persistent() {
            None
        } else {
            Some(timeout)
        }
    }

    /// Read the category of an existing banner from its `alert--*` classes.
    ///
    /// `alert--error` wins wherever it appears, so extra modifiers such as
    /// `alert--dismissible` never make an error banner expire. Otherwise the
    /// first `alert--*` class decides.
    pub fn of_element<S: RenderSurface + ?Sized>(surface: &S, el: ElementId) -> Self {
        let Some(classes) = surface.attribute(el, "class") else {
            return Category::default();
        };

        let mut tags = classes
            .split_whitespace()
            .filter_map(|c| c.strip_prefix(CATEGORY_CLASS_PREFIX));
        if tags.clone().any(|tag| Category::parse(tag).is_persistent()) {
            return Category::Error;
        }
        tags.next().map(Category::parse).unwrap_or_default()
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Category::parse(tag)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A banner the manager is tracking
#[derive(Debug, Clone)]
pub struct Notification {
    pub element: ElementId,
    pub message: String,
    pub category: Category,
    /// Scheduler time at which the banner was shown or adopted
    pub created_at: Duration,
    /// Pending removal timer, `None` for persistent banners
    pub(super) expiry: Option<TimerToken>,
}

impl Notification {
    pub fn is_persistent(&self) -> bool {
        self.category.is_persistent()
    }

    /// Whether a removal timer is still pending for this banner
    pub fn has_scheduled_removal(&self) -> bool {
        self.expiry.is_some()
    }
}

#[cfg(test)]
#[path = "notification_state_tests.rs"]
mod notification_state_tests;
