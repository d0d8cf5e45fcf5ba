//! One rendered page: its flash banners and navigation, driven by UI events

mod page_events;
mod page_state;

pub use page_events::{EventOutcome, UiEvent};
pub use page_state::Page;
