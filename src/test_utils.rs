//! Shared test utilities for flashkit
//!
//! This module provides common test fixtures and helper functions
//! used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::time::Duration;

    use crate::config::FlashConfig;
    use crate::notification::{FlashTask, NotificationManager};
    use crate::scheduler::ManualScheduler;
    use crate::surface::{ElementId, MemorySurface, NodeSpec, RenderSurface};

    pub type TestManager = NotificationManager<MemorySurface, ManualScheduler<FlashTask>>;

    /// Default auto-dismiss timeout
    pub const TIMEOUT: Duration = Duration::from_secs(7);

    /// `<main class="container"><div id="flash-container"></div></main>`
    pub fn flash_page() -> MemorySurface {
        MemorySurface::from_nodes(&[NodeSpec::new("main")
            .with_class("container")
            .with_child(NodeSpec::new("div").with_id("flash-container"))])
    }

    /// A page with neither a flash container nor a main-content container
    pub fn bare_page() -> MemorySurface {
        MemorySurface::from_nodes(&[NodeSpec::new("section").with_id("contenido")])
    }

    /// A server-rendered banner as it appears in the page template
    pub fn server_alert(category: &str, text: &str) -> NodeSpec {
        NodeSpec::new("div")
            .with_class(&format!("alert alert--{}", category))
            .with_attr("role", "alert")
            .with_text(text)
    }

    /// Flash page with the given server-rendered banners in the container
    pub fn page_with_alerts(alerts: Vec<NodeSpec>) -> MemorySurface {
        let container = alerts
            .into_iter()
            .fold(NodeSpec::new("div").with_id("flash-container"), |c, a| {
                c.with_child(a)
            });
        MemorySurface::from_nodes(&[NodeSpec::new("main")
            .with_class("container")
            .with_child(container)])
    }

    pub fn manager(surface: MemorySurface) -> TestManager {
        NotificationManager::new(surface, ManualScheduler::new(), FlashConfig::default())
    }

    /// Advance virtual time and apply due removals
    pub fn advance(manager: &mut TestManager, by: Duration) -> usize {
        manager.scheduler_mut().advance(by);
        manager.tick()
    }

    pub fn flash_container(surface: &MemorySurface) -> ElementId {
        surface
            .get_element_by_id("flash-container")
            .expect("fixture has #flash-container")
    }

    /// Number of close buttons inside `alert`
    pub fn close_button_count(surface: &MemorySurface, alert: ElementId) -> usize {
        surface
            .descendants(alert)
            .into_iter()
            .filter(|&el| surface.has_class(el, "close-alert"))
            .count()
    }
}
