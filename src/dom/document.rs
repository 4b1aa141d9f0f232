//! The document seam every controller mutates through.

use crate::types::NodeId;

/// Click behavior attached to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listener {
    /// Switch the active language to the given code.
    SwitchLanguage(String),
    /// Open or close the mobile navigation.
    ToggleNavbar,
    /// Close the mobile navigation.
    CloseNavbar,
    /// Toggle the dropdown enclosing this trigger.
    ToggleDropdown,
}

/// Description of an element to insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name, e.g. `button`.
    pub tag: String,
    /// `(name, value)` pairs; a later pair overrides an earlier one.
    pub attributes: Vec<(String, String)>,
    /// Classes in insertion order.
    pub classes: Vec<String>,
    /// Initial visible text.
    pub text: String,
}

impl Element {
    /// Element with the given tag and nothing else.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Adds a class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the initial text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// A mutable tree of nodes with attributes, classes, text and inline styles.
///
/// Queries only see nodes attached under [`body`](Self::body) and return them
/// in document order. Mutating a node that does not exist is a no-op.
pub trait Document {
    /// Root of the attached tree.
    fn body(&self) -> NodeId;

    /// Attached nodes carrying `attribute`, whatever its value.
    fn query_attribute(&self, attribute: &str) -> Vec<NodeId>;

    /// Attached nodes carrying `class`.
    fn query_class(&self, class: &str) -> Vec<NodeId>;

    /// Attached node whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Attached descendants of `node` in document order, excluding `node`.
    fn descendants(&self, node: NodeId) -> Vec<NodeId>;

    /// Parent of `node`, attached or not.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` is reachable from [`body`](Self::body).
    fn is_attached(&self, node: NodeId) -> bool;

    /// Value of attribute `name` on `node`.
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Sets attribute `name`, replacing any previous value.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Visible text of `node`; `None` if the node does not exist.
    fn text(&self, node: NodeId) -> Option<&str>;

    /// Replaces the node's visible text.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Whether `node` carries `class`.
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Adds `class` unless already present.
    fn add_class(&mut self, node: NodeId, class: &str);

    /// Removes `class` if present.
    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Inline style value of `property`.
    fn style(&self, node: NodeId, property: &str) -> Option<&str>;

    /// Sets an inline style; an empty value clears it.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Attaches a handler to `node`.
    fn add_listener(&mut self, node: NodeId, listener: Listener);

    /// Handlers attached to `node`, in attachment order.
    fn listeners(&self, node: NodeId) -> &[Listener];

    /// Inserts `element` as a child of `parent`, before `before` when given
    /// (and a child of `parent`), otherwise last.
    fn insert(&mut self, parent: NodeId, before: Option<NodeId>, element: Element) -> NodeId;

    /// Detaches `node` and its subtree from the document.
    fn remove(&mut self, node: NodeId);

    /// Toggles `class` and returns whether it is now present.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// Adds or removes `class` according to `present`.
    fn set_class(&mut self, node: NodeId, class: &str, present: bool) {
        if present {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// The nearest node, starting at `node` itself, carrying `class`.
    fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.has_class(candidate, class) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// `node` followed by its ancestors up to the root.
    fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = vec![node];
        let mut current = self.parent(node);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    /// First attached node carrying `attribute`.
    fn first_with_attribute(&self, attribute: &str) -> Option<NodeId> {
        self.query_attribute(attribute).into_iter().next()
    }
}
