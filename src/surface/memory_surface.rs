//! In-memory element tree
//!
//! Arena-backed implementation of [`RenderSurface`]. Removed elements stay in
//! the arena so their handles remain valid.

use super::{ElementId, NodeSpec, RenderSurface};

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemorySurface {
    nodes: Vec<Node>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// Empty document consisting of a `<body>` root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body")],
        }
    }

    /// Build a document whose body holds `nodes`
    pub fn from_nodes(nodes: &[NodeSpec]) -> Self {
        let mut surface = Self::new();
        let root = surface.root();
        for spec in nodes {
            spec.build(&mut surface, root);
        }
        surface
    }

    /// Create an element under `parent` with the given attributes.
    pub fn element(
        &mut self,
        parent: ElementId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> ElementId {
        let el = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(el, name, value);
        }
        self.append_child(parent, el);
        el
    }

    /// Number of elements ever created, attached or not
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(el.0)
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(el.0)
    }

    /// Whether `ancestor` is `el` or one of its ancestors
    fn is_inclusive_ancestor(&self, ancestor: ElementId, el: ElementId) -> bool {
        let mut current = Some(el);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }
}

impl RenderSurface for MemorySurface {
    fn root(&self) -> ElementId {
        ElementId(0)
    }

    fn tag(&self, el: ElementId) -> Option<&str> {
        self.node(el).map(|n| n.tag.as_str())
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el).and_then(|n| n.parent)
    }

    fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.node(el).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Node::new(tag));
        ElementId(self.nodes.len() - 1)
    }

    fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: Option<ElementId>,
    ) {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        // Inserting an element into its own subtree would create a cycle
        if self.is_inclusive_ancestor(child, parent) {
            return;
        }

        self.detach(child);

        let Some(parent_node) = self.node_mut(parent) else {
            return;
        };
        let index = reference
            .and_then(|r| parent_node.children.iter().position(|&c| c == r))
            .unwrap_or(parent_node.children.len());
        parent_node.children.insert(index, child);

        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = Some(parent);
        }
    }

    fn remove_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        let Some(parent_node) = self.node_mut(parent) else {
            return false;
        };
        let Some(index) = parent_node.children.iter().position(|&c| c == child) else {
            return false;
        };
        parent_node.children.remove(index);

        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = None;
        }
        true
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        self.node(el)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn attributes(&self, el: ElementId) -> Vec<(&str, &str)> {
        self.node(el)
            .map(|n| {
                n.attributes
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        let Some(node) = self.node_mut(el) else {
            return;
        };
        match node.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => node.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&mut self, el: ElementId, name: &str) {
        if let Some(node) = self.node_mut(el) {
            node.attributes.retain(|(n, _)| n != name);
        }
    }

    fn text(&self, el: ElementId) -> &str {
        self.node(el).map(|n| n.text.as_str()).unwrap_or("")
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(node) = self.node_mut(el) {
            node.text = text.to_string();
        }
    }
}

#[cfg(test)]
#[path = "memory_surface_tests.rs"]
mod memory_surface_tests;
