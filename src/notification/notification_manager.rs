//! Flash banner lifecycle
//!
//! Timer-driven and click-driven removal race freely: both go through
//! [`NotificationManager::dismiss`], which only acts on banners that are still
//! attached, so whichever runs second is a no-op.

use std::collections::HashMap;

use super::notification_state::{ALERT_CLASS, CLOSE_BUTTON_CLASS, Category, Notification};
use crate::config::FlashConfig;
use crate::scheduler::Scheduler;
use crate::surface::{ElementId, RenderSurface, Selector};

/// Glyph shown on the close button
const CLOSE_GLYPH: &str = "×";

/// Deferred work the manager hands to its scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashTask {
    /// Remove a non-persistent banner once its timeout elapses
    Expire(ElementId),
}

/// Owns the banners of one page
#[derive(Debug)]
pub struct NotificationManager<S, C> {
    surface: S,
    scheduler: C,
    config: FlashConfig,
    tracked: HashMap<ElementId, Notification>,
}

impl<S, C> NotificationManager<S, C>
where
    S: RenderSurface,
    C: Scheduler<FlashTask>,
{
    pub fn new(surface: S, scheduler: C, config: FlashConfig) -> Self {
        Self {
            surface,
            scheduler,
            config,
            tracked: HashMap::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut C {
        &mut self.scheduler
    }

    pub fn config(&self) -> &FlashConfig {
        &self.config
    }

    /// Take over banners that were rendered with the page.
    ///
    /// Every `.alert` on the surface gets a close button unless it already has
    /// one, and non-error banners are scheduled for removal. Banners adopted
    /// by an earlier call are not scheduled twice. Returns how many banners
    /// were newly adopted.
    pub fn adopt_existing(&mut self) -> usize {
        self.prune_detached();

        let alerts = self
            .surface
            .query_selector_all(&Selector::class(ALERT_CLASS));

        let mut adopted = 0;
        for alert in alerts {
            self.ensure_close_button(alert);

            if self.tracked.contains_key(&alert) {
                continue;
            }
            let category = Category::of_element(&self.surface, alert);
            let message = self.surface.text(alert).trim().to_string();
            self.track(alert, message, category);
            adopted += 1;
        }

        #[cfg(debug_assertions)]
        log::debug!("Adopted {} existing flash banner(s)", adopted);

        adopted
    }

    /// Show a new banner at the top of its container.
    ///
    /// `target` names the container id; `None` means the configured default.
    /// Falls back to the configured main-content selector when no container
    /// with that id exists. Returns `None` and leaves the surface untouched
    /// when neither is present.
    pub fn show(
        &mut self,
        message: &str,
        category: impl Into<Category>,
        target: Option<&str>,
    ) -> Option<ElementId> {
        let category = category.into();
        log::info!("FLASH [{}]: {}", category, message);

        let Some(container) = self.resolve_container(target) else {
            log::warn!(
                "No flash container found (requested {:?}); message not shown",
                target.unwrap_or(&self.config.container_id)
            );
            return None;
        };

        let alert = self.surface.create_element("div");
        self.surface.set_attribute(
            alert,
            "class",
            &format!("{} {}", ALERT_CLASS, category.class_name()),
        );
        self.surface.set_attribute(alert, "role", "alert");
        self.surface.set_text(alert, message);
        self.ensure_close_button(alert);
        self.surface.prepend_child(container, alert);

        self.track(alert, message.to_string(), category);
        Some(alert)
    }

    /// Show an info banner in the default container
    pub fn show_info(&mut self, message: &str) -> Option<ElementId> {
        self.show(message, Category::Info, None)
    }

    /// Show a success banner in the default container
    pub fn show_success(&mut self, message: &str) -> Option<ElementId> {
        self.show(message, Category::Success, None)
    }

    /// Show a warning banner in the default container
    pub fn show_warning(&mut self, message: &str) -> Option<ElementId> {
        self.show(message, Category::Warning, None)
    }

    /// Show an error banner (stays until closed) in the default container
    pub fn show_error(&mut self, message: &str) -> Option<ElementId> {
        self.show(message, Category::Error, None)
    }

    /// Remove a banner from the surface.
    ///
    /// Idempotent: returns false when the banner was already removed, and
    /// ignores elements that are not banners.
    pub fn dismiss(&mut self, alert: ElementId) -> bool {
        let record = self.tracked.remove(&alert);
        if record.is_none() && !self.surface.has_class(alert, ALERT_CLASS) {
            return false;
        }

        if let Some(token) = record.and_then(|r| r.expiry) {
            self.scheduler.cancel(token);
        }

        let removed = self.surface.detach(alert);
        #[cfg(debug_assertions)]
        {
            if removed {
                log::debug!("Dismissed flash banner {:?}", alert);
            }
        }
        removed
    }

    /// Route a click. Clicks on (or inside) a close button dismiss the banner
    /// holding it. Returns whether a banner was removed.
    pub fn handle_click(&mut self, target: ElementId) -> bool {
        let Some(button) = self
            .surface
            .closest(target, &Selector::class(CLOSE_BUTTON_CLASS))
        else {
            return false;
        };
        let Some(alert) = self
            .surface
            .closest(button, &Selector::class(ALERT_CLASS))
        else {
            return false;
        };

        self.dismiss(alert)
    }

    /// Apply every removal that has come due, then forget banners that were
    /// detached by other code. Returns how many banners expired.
    pub fn tick(&mut self) -> usize {
        let mut removed = 0;
        for task in self.scheduler.take_due() {
            match task {
                FlashTask::Expire(alert) => {
                    // The timer has fired; nothing left to cancel
                    if let Some(record) = self.tracked.get_mut(&alert) {
                        record.expiry = None;
                    }
                    if self.dismiss(alert) {
                        removed += 1;
                    }
                }
            }
        }
        self.prune_detached();
        removed
    }

    /// Drop records of banners no longer on the surface, e.g. because their
    /// container was removed, and cancel their pending expiry
    fn prune_detached(&mut self) -> usize {
        let detached: Vec<ElementId> = self
            .tracked
            .keys()
            .copied()
            .filter(|&alert| !self.surface.is_connected(alert))
            .collect();

        for alert in &detached {
            if let Some(token) = self.tracked.remove(alert).and_then(|r| r.expiry) {
                self.scheduler.cancel(token);
            }
        }

        #[cfg(debug_assertions)]
        {
            if !detached.is_empty() {
                log::debug!("Forgot {} detached flash banner(s)", detached.len());
            }
        }

        detached.len()
    }

    /// Record for a banner that is still being tracked
    pub fn notification(&self, alert: ElementId) -> Option<&Notification> {
        self.tracked.get(&alert)
    }

    /// Whether the banner is currently on the surface
    pub fn is_visible(&self, alert: ElementId) -> bool {
        self.surface.is_connected(alert)
    }

    /// Banners on the surface, in document order
    pub fn visible(&self) -> Vec<ElementId> {
        self.surface
            .query_selector_all(&Selector::class(ALERT_CLASS))
    }

    /// Find the container `show` would insert into
    pub fn resolve_container(&self, target: Option<&str>) -> Option<ElementId> {
        let requested = target.unwrap_or(&self.config.container_id);
        if let Some(container) = self.surface.get_element_by_id(requested) {
            return Some(container);
        }

        if requested == self.config.container_id {
            for alias in &self.config.legacy_container_ids {
                if let Some(container) = self.surface.get_element_by_id(alias) {
                    log::warn!(
                        "Using deprecated flash container id #{}; rename it to #{}",
                        alias,
                        self.config.container_id
                    );
                    return Some(container);
                }
            }
        }

        match Selector::parse(&self.config.fallback_selector) {
            Ok(selector) => self.surface.query_selector(&selector),
            Err(e) => {
                log::warn!("Ignoring fallback flash container: {}", e);
                None
            }
        }
    }

    /// Attach a close button unless the banner already has one. Returns
    /// whether a button was added.
    fn ensure_close_button(&mut self, alert: ElementId) -> bool {
        let close = Selector::class(CLOSE_BUTTON_CLASS);
        if self.surface.query_within(alert, &close).is_some() {
            return false;
        }

        let button = self.surface.create_element("button");
        self.surface.set_attribute(button, "type", "button");
        self.surface.set_attribute(button, "class", CLOSE_BUTTON_CLASS);
        self.surface.set_attribute(button, "aria-label", "Cerrar");
        self.surface.set_text(button, CLOSE_GLYPH);
        self.surface.append_child(alert, button);
        true
    }

    fn track(&mut self, alert: ElementId, message: String, category: Category) {
        let expiry = category
            .auto_dismiss_after(self.config.timeout())
            .map(|delay| self.scheduler.schedule(delay, FlashTask::Expire(alert)));

        self.tracked.insert(
            alert,
            Notification {
                element: alert,
                message,
                category,
                created_at: self.scheduler.now(),
                expiry,
            },
        );
    }
}

#[cfg(test)]
#[path = "notification_manager_tests.rs"]
mod notification_manager_tests;
