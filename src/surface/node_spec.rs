//! Declarative element trees
//!
//! Page fixtures describe their initial markup as nested [`NodeSpec`]s:
//!
//! ```json
//! { "tag": "div", "class": "alert alert--info", "text": "Bienvenido",
//!   "children": [] }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{ElementId, RenderSurface};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    /// Any other attributes, applied after `id` and `class`
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            class: None,
            attrs: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Materialize this node and its subtree under `parent`
    pub fn build<S: RenderSurface + ?Sized>(&self, surface: &mut S, parent: ElementId) -> ElementId {
        let el = surface.create_element(&self.tag);
        if let Some(id) = &self.id {
            surface.set_attribute(el, "id", id);
        }
        if let Some(class) = &self.class {
            surface.set_attribute(el, "class", class);
        }
        for (name, value) in &self.attrs {
            surface.set_attribute(el, name, value);
        }
        if let Some(text) = &self.text {
            surface.set_text(el, text);
        }
        surface.append_child(parent, el);

        for child in &self.children {
            child.build(surface, el);
        }
        el
    }
}
