//! Loading indicator shown while a request is in flight

use crate::surface::{ElementId, RenderSurface};

pub const SPINNER_CLASS: &str = "spinner";

const SPINNER_TEXT: &str = "Cargando...";

/// Create a spinner and append it to `parent` when one is given.
///
/// The spinner is returned even without a parent so the caller can attach it
/// elsewhere or pass it to [`hide_spinner`] unconditionally.
pub fn show_spinner<S: RenderSurface>(surface: &mut S, parent: Option<ElementId>) -> ElementId {
    let spinner = surface.create_element("div");
    surface.set_attribute(spinner, "class", SPINNER_CLASS);
    surface.set_text(spinner, SPINNER_TEXT);
    if let Some(parent) = parent {
        surface.append_child(parent, spinner);
    }
    spinner
}

/// Remove a spinner; no-op if it is not attached
pub fn hide_spinner<S: RenderSurface>(surface: &mut S, spinner: ElementId) -> bool {
    surface.detach(spinner)
}
