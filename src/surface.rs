//! Rendering surface
//!
//! The page is an opaque element tree owned by whoever embeds the UI. Every
//! component in the crate reaches it through [`RenderSurface`], so the real
//! document and the in-memory [`MemorySurface`] are interchangeable.

mod memory_surface;
mod node_spec;
mod selector;
mod surface_render;

pub use memory_surface::MemorySurface;
pub use node_spec::NodeSpec;
pub use selector::Selector;
pub use surface_render::render_html;

/// Handle to an element of a rendering surface.
///
/// Handles stay valid after the element is detached; operations on a
/// detached element are allowed and simply have no visible effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

/// Mutable element tree with attribute and class access.
///
/// Implementors provide the primitive tree operations; querying, class
/// manipulation and detachment are derived from them.
pub trait RenderSurface {
    /// The document body. Always connected.
    fn root(&self) -> ElementId;

    /// Lowercase tag name, `None` for unknown handles
    fn tag(&self, el: ElementId) -> Option<&str>;

    fn parent(&self, el: ElementId) -> Option<ElementId>;

    /// Child elements in document order
    fn children(&self, el: ElementId) -> Vec<ElementId>;

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Insert `child` into `parent` before `reference`, or at the end when
    /// `reference` is `None` or not a child of `parent`. A child that already
    /// has a parent is moved.
    fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: Option<ElementId>,
    );

    /// Remove `child` from `parent`. Returns false if it was not a child.
    fn remove_child(&mut self, parent: ElementId, child: ElementId) -> bool;

    fn attribute(&self, el: ElementId, name: &str) -> Option<&str>;

    /// All attributes in insertion order
    fn attributes(&self, el: ElementId) -> Vec<(&str, &str)>;

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str);

    fn remove_attribute(&mut self, el: ElementId, name: &str);

    /// Own text of the element, excluding descendants
    fn text(&self, el: ElementId) -> &str;

    fn set_text(&mut self, el: ElementId, text: &str);

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.insert_before(parent, child, None);
    }

    /// Insert `child` as the first child of `parent`
    fn prepend_child(&mut self, parent: ElementId, child: ElementId) {
        let first = self.children(parent).first().copied();
        self.insert_before(parent, child, first);
    }

    /// Detach `el` from its parent if it has one
    fn detach(&mut self, el: ElementId) -> bool {
        match self.parent(el) {
            Some(parent) => self.remove_child(parent, el),
            None => false,
        }
    }

    /// Whether `el` is reachable from the root
    fn is_connected(&self, el: ElementId) -> bool {
        let root = self.root();
        let mut current = Some(el);
        while let Some(node) = current {
            if node == root {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.attribute(el, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Add or remove a class so that its presence equals `on`
    fn set_class(&mut self, el: ElementId, class: &str, on: bool) {
        let current: Vec<String> = self
            .attribute(el, "class")
            .map(|classes| classes.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        let present = current.iter().any(|c| c == class);
        if present == on {
            return;
        }

        let updated: Vec<String> = if on {
            current.into_iter().chain(std::iter::once(class.to_string())).collect()
        } else {
            current.into_iter().filter(|c| c != class).collect()
        };

        if updated.is_empty() {
            self.remove_attribute(el, "class");
        } else {
            self.set_attribute(el, "class", &updated.join(" "));
        }
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        self.set_class(el, class, true);
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        self.set_class(el, class, false);
    }

    /// Flip a class, returning whether it is now present
    fn toggle_class(&mut self, el: ElementId, class: &str) -> bool {
        let on = !self.has_class(el, class);
        self.set_class(el, class, on);
        on
    }

    /// Descendants of `el` in document (pre-)order, excluding `el`
    fn descendants(&self, el: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(el).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        out
    }

    fn matches(&self, el: ElementId, selector: &Selector) -> bool {
        selector.matches(self, el)
    }

    /// Every connected element matching `selector`, in document order
    fn query_selector_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&el| selector.matches(self, el))
            .collect()
    }

    fn query_selector(&self, selector: &Selector) -> Option<ElementId> {
        self.query_within(self.root(), selector)
    }

    /// First descendant of `scope` matching `selector`
    fn query_within(&self, scope: ElementId, selector: &Selector) -> Option<ElementId> {
        self.descendants(scope)
            .into_iter()
            .find(|&el| selector.matches(self, el))
    }

    /// `el` itself or its nearest ancestor matching `selector`
    fn closest(&self, el: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = Some(el);
        while let Some(node) = current {
            if selector.matches(self, node) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&el| self.attribute(el, "id") == Some(id))
    }
}
