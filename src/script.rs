//! Scripted page sessions
//!
//! A script is a JSON document holding the initial page body and a list of
//! steps to replay against it in virtual time:
//!
//! ```json
//! {
//!   "body": [{ "tag": "div", "id": "flash-container" }],
//!   "steps": [
//!     { "action": "show", "message": "Pedido guardado", "category": "success" },
//!     { "action": "advance", "ms": 7000 }
//!   ]
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::config::FlashConfig;
use crate::error::FlashError;
use crate::notification::{Category, FlashTask};
use crate::page::{Page, UiEvent};
use crate::scheduler::ManualScheduler;
use crate::surface::{MemorySurface, NodeSpec, RenderSurface, Selector};

pub type ScriptedPage = Page<MemorySurface, ManualScheduler<FlashTask>>;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Show {
        message: String,
        #[serde(default)]
        category: Option<String>,
        /// Container id; the configured default when absent
        #[serde(default)]
        container: Option<String>,
    },
    /// Move virtual time forward and apply due timers
    Advance { ms: u64 },
    /// Click the first element matching `selector`
    Click { selector: String },
    /// Run banner adoption again, as a partial page reload would
    Adopt,
    Escape,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PageScript {
    pub body: Vec<NodeSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl PageScript {
    pub fn from_json(input: &str) -> Result<Self, FlashError> {
        serde_json::from_str(input).map_err(|e| FlashError::InvalidPage(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, FlashError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Build the page and run its document-ready hook
    pub fn open(&self, config: FlashConfig) -> ScriptedPage {
        let surface = MemorySurface::from_nodes(&self.body);
        let mut page = Page::new(surface, ManualScheduler::new(), config);
        page.ready();
        page
    }

    /// Open the page and replay every step
    pub fn run(&self, config: FlashConfig) -> Result<ScriptedPage, FlashError> {
        let mut page = self.open(config);
        replay(&mut page, &self.steps)?;
        Ok(page)
    }
}

/// Apply `steps` in order, stopping at the first one that cannot be applied
pub fn replay(page: &mut ScriptedPage, steps: &[Step]) -> Result<(), FlashError> {
    for (index, step) in steps.iter().enumerate() {
        #[cfg(debug_assertions)]
        log::debug!("Step {}: {:?}", index + 1, step);

        match step {
            Step::Show {
                message,
                category,
                container,
            } => {
                let category = category.as_deref().map(Category::parse).unwrap_or_default();
                page.flash.show(message, category, container.as_deref());
            }
            Step::Advance { ms } => {
                page.flash
                    .scheduler_mut()
                    .advance(Duration::from_millis(*ms));
                page.handle_event(UiEvent::Tick);
            }
            Step::Click { selector } => {
                let parsed = Selector::parse(selector)?;
                let target = page.surface().query_selector(&parsed).ok_or_else(|| {
                    FlashError::InvalidPage(format!(
                        "step {}: no element matches '{}'",
                        index + 1,
                        selector
                    ))
                })?;
                page.handle_event(UiEvent::Click(target));
            }
            Step::Adopt => {
                page.flash.adopt_existing();
            }
            Step::Escape => {
                page.handle_event(UiEvent::Escape);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod script_tests;
