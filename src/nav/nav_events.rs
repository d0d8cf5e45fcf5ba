use super::{DROPDOWN_CLASS, DROPDOWN_TOGGLE_CLASS, MENU_CLASS, MENU_TOGGLE_CLASS, OPEN_CLASS};
use crate::surface::{ElementId, RenderSurface, Selector};

/// What a click did to the navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    MenuToggled { open: bool },
    DropdownToggled { dropdown: ElementId, open: bool },
    /// Click landed outside every dropdown; this many were closed
    DropdownsClosed(usize),
    None,
}

/// Sync every toggle's `aria-expanded` with the open state of what it controls
pub fn init<S: RenderSurface>(surface: &mut S) {
    for toggle in surface.query_selector_all(&Selector::class(MENU_TOGGLE_CLASS)) {
        let open = menu_for(surface, toggle).is_some_and(|m| surface.has_class(m, OPEN_CLASS));
        set_expanded(surface, toggle, open);
    }
    for toggle in surface.query_selector_all(&Selector::class(DROPDOWN_TOGGLE_CLASS)) {
        let open = surface
            .closest(toggle, &Selector::class(DROPDOWN_CLASS))
            .is_some_and(|d| surface.has_class(d, OPEN_CLASS));
        set_expanded(surface, toggle, open);
    }
}

/// Route a click to the menu or dropdown it concerns
pub fn handle_click<S: RenderSurface>(surface: &mut S, target: ElementId) -> NavAction {
    if let Some(toggle) = surface.closest(target, &Selector::class(MENU_TOGGLE_CLASS)) {
        return toggle_menu(surface, toggle);
    }

    if let Some(toggle) = surface.closest(target, &Selector::class(DROPDOWN_TOGGLE_CLASS))
        && let Some(dropdown) = surface.closest(toggle, &Selector::class(DROPDOWN_CLASS))
    {
        return toggle_dropdown(surface, dropdown);
    }

    if surface
        .closest(target, &Selector::class(DROPDOWN_CLASS))
        .is_some()
    {
        return NavAction::None;
    }

    match close_dropdowns_except(surface, None) {
        0 => NavAction::None,
        closed => NavAction::DropdownsClosed(closed),
    }
}

/// Close the menu and every dropdown (Escape key)
pub fn close_all<S: RenderSurface>(surface: &mut S) {
    for toggle in surface.query_selector_all(&Selector::class(MENU_TOGGLE_CLASS)) {
        if let Some(menu) = menu_for(surface, toggle) {
            surface.remove_class(menu, OPEN_CLASS);
        }
        set_expanded(surface, toggle, false);
    }
    close_dropdowns_except(surface, None);
}

fn toggle_menu<S: RenderSurface>(surface: &mut S, toggle: ElementId) -> NavAction {
    let Some(menu) = menu_for(surface, toggle) else {
        return NavAction::None;
    };
    let open = surface.toggle_class(menu, OPEN_CLASS);
    set_expanded(surface, toggle, open);

    #[cfg(debug_assertions)]
    log::debug!("Navigation menu {}", if open { "opened" } else { "closed" });

    NavAction::MenuToggled { open }
}

fn toggle_dropdown<S: RenderSurface>(surface: &mut S, dropdown: ElementId) -> NavAction {
    let open = surface.toggle_class(dropdown, OPEN_CLASS);
    sync_dropdown_toggle(surface, dropdown, open);

    if open {
        close_dropdowns_except(surface, Some(dropdown));
    }
    NavAction::DropdownToggled { dropdown, open }
}

/// Close open dropdowns, keeping `keep` and the dropdowns it is nested in.
/// Returns how many were closed.
fn close_dropdowns_except<S: RenderSurface>(surface: &mut S, keep: Option<ElementId>) -> usize {
    let open_selector = Selector::class(DROPDOWN_CLASS);
    let mut closed = 0;
    for dropdown in surface.query_selector_all(&open_selector) {
        if !surface.has_class(dropdown, OPEN_CLASS) {
            continue;
        }
        if let Some(keep) = keep
            && is_inclusive_ancestor(surface, dropdown, keep)
        {
            continue;
        }
        surface.remove_class(dropdown, OPEN_CLASS);
        sync_dropdown_toggle(surface, dropdown, false);
        closed += 1;
    }
    closed
}

/// The menu a hamburger controls: its `aria-controls` target, or the first
/// `.nav-menu` on the page
fn menu_for<S: RenderSurface>(surface: &S, toggle: ElementId) -> Option<ElementId> {
    if let Some(id) = surface.attribute(toggle, "aria-controls")
        && let Some(menu) = surface.get_element_by_id(id)
    {
        return Some(menu);
    }
    surface.query_selector(&Selector::class(MENU_CLASS))
}

/// Update the toggle button that belongs directly to `dropdown`
fn sync_dropdown_toggle<S: RenderSurface>(surface: &mut S, dropdown: ElementId, open: bool) {
    let toggle_selector = Selector::class(DROPDOWN_TOGGLE_CLASS);
    let dropdown_selector = Selector::class(DROPDOWN_CLASS);
    let own_toggle = surface.descendants(dropdown).into_iter().find(|&el| {
        toggle_selector.matches(surface, el)
            && surface.closest(el, &dropdown_selector) == Some(dropdown)
    });
    if let Some(toggle) = own_toggle {
        set_expanded(surface, toggle, open);
    }
}

fn set_expanded<S: RenderSurface>(surface: &mut S, toggle: ElementId, open: bool) {
    surface.set_attribute(toggle, "aria-expanded", if open { "true" } else { "false" });
}

fn is_inclusive_ancestor<S: RenderSurface>(
    surface: &S,
    ancestor: ElementId,
    el: ElementId,
) -> bool {
    let mut current = Some(el);
    while let Some(node) = current {
        if node == ancestor {
            return true;
        }
        current = surface.parent(node);
    }
    false
}

#[cfg(test)]
#[path = "nav_events_tests.rs"]
mod nav_events_tests;
