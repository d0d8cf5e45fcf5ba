//! flashkit library - flash banners and navigation for server-rendered pages
//!
//! This library exposes the page components used by the CLI and by tests.

pub mod config;
pub mod error;
pub mod fetch;
pub mod nav;
pub mod notification;
pub mod page;
pub mod scheduler;
pub mod script;
pub mod spinner;
pub mod surface;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::FlashError;
pub use notification::{Category, NotificationManager};
pub use page::{Page, UiEvent};
