use super::page_state::Page;
use crate::nav::{self, NavAction};
use crate::notification::FlashTask;
use crate::scheduler::Scheduler;
use crate::surface::{ElementId, RenderSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Click(ElementId),
    /// Escape key pressed anywhere on the page
    Escape,
    /// Event-loop turn; applies timers that have come due
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// A close button removed its banner
    Dismissed,
    Nav(NavAction),
    /// Menus and dropdowns were closed
    NavClosed,
    /// This many banners expired
    Expired(usize),
    Ignored,
}

impl<S, C> Page<S, C>
where
    S: RenderSurface,
    C: Scheduler<FlashTask>,
{
    pub fn handle_event(&mut self, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::Click(target) => self.handle_click(target),
            UiEvent::Escape => {
                nav::close_all(self.flash.surface_mut());
                EventOutcome::NavClosed
            }
            UiEvent::Tick => match self.flash.tick() {
                0 => EventOutcome::Ignored,
                expired => EventOutcome::Expired(expired),
            },
        }
    }

    /// Both listeners see every click, so a close button outside a dropdown
    /// also closes the open dropdowns
    fn handle_click(&mut self, target: ElementId) -> EventOutcome {
        let dismissed = self.flash.handle_click(target);
        let action = nav::handle_click(self.flash.surface_mut(), target);

        match (dismissed, action) {
            (true, _) => EventOutcome::Dismissed,
            (false, NavAction::None) => EventOutcome::Ignored,
            (false, action) => EventOutcome::Nav(action),
        }
    }
}

#[cfg(test)]
#[path = "page_events_tests.rs"]
mod page_events_tests;
