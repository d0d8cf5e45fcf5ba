//! Navigation toggles
//!
//! The hamburger menu and the dropdown menus keep no state of their own: each
//! one is open exactly when it carries [`OPEN_CLASS`], and its toggle button
//! mirrors that in `aria-expanded`.

mod nav_events;

pub use nav_events::{NavAction, close_all, handle_click, init};

/// Class marking an open menu or dropdown
pub const OPEN_CLASS: &str = "is-open";

/// Hamburger button
pub const MENU_TOGGLE_CLASS: &str = "nav-toggle";

/// Collapsible navigation list, used when the toggle has no `aria-controls`
pub const MENU_CLASS: &str = "nav-menu";

pub const DROPDOWN_CLASS: &str = "dropdown";

pub const DROPDOWN_TOGGLE_CLASS: &str = "dropdown-toggle";
