//! In-memory [`Document`] implementation.

use std::collections::BTreeMap;

use super::document::{
    Document,
    Element,
    Listener,
};
use crate::types::NodeId;

/// Storage for a single node.
#[derive(Debug, Clone, Default)]
struct NodeData {
    /// Element tag name, informational only.
    tag: String,
    /// Attribute values by name.
    attributes: BTreeMap<String, String>,
    /// Class list in insertion order, without duplicates.
    classes: Vec<String>,
    /// Visible text.
    text: String,
    /// Inline style values by property.
    styles: BTreeMap<String, String>,
    /// Parent node; `None` for `body` and for detached nodes.
    parent: Option<NodeId>,
    /// Child nodes in document order.
    children: Vec<NodeId>,
    /// Handlers in attachment order.
    listeners: Vec<Listener>,
}

/// A node tree held in memory.
///
/// Node handles index into an arena; removing a node only unlinks it, so
/// stale handles never alias a different node.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    /// Every node ever created, attached or not.
    nodes: Vec<NodeData>,
    /// Root of the attached tree.
    body: NodeId,
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRegistry {
    /// Creates a document holding only an empty `body`.
    #[must_use]
    pub fn new() -> Self {
        let body = NodeData { tag: "body".to_string(), ..NodeData::default() };
        Self { nodes: vec![body], body: NodeId(0) }
    }

    /// Appends `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.insert(parent, None, element)
    }

    /// Number of nodes currently attached, `body` included.
    #[must_use]
    pub fn attached_len(&self) -> usize {
        self.subtree(self.body).len()
    }

    /// Element tag of `node`.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|data| data.tag.as_str())
    }

    /// Class list of `node` in insertion order.
    #[must_use]
    pub fn classes(&self, node: NodeId) -> &[String] {
        self.node(node).map_or(&[], |data| data.classes.as_slice())
    }

    /// Shared access to a node's data.
    fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0)
    }

    /// Mutable access to a node's data.
    fn node_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(node.0)
    }

    /// `root` and all its descendants in document order.
    fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let Some(data) = self.node(current) else {
                continue;
            };
            result.push(current);
            stack.extend(data.children.iter().rev().copied());
        }
        result
    }

    /// Attached nodes matching `predicate`, in document order.
    fn query(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.subtree(self.body)
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(&predicate))
            .collect()
    }
}

impl Document for NodeRegistry {
    fn body(&self) -> NodeId {
        self.body
    }

    fn query_attribute(&self, attribute: &str) -> Vec<NodeId> {
        self.query(|data| data.attributes.contains_key(attribute))
    }

    fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.query(|data| data.classes.iter().any(|c| c == class))
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query(|data| data.attributes.get("id").is_some_and(|value| value == id))
            .into_iter()
            .next()
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        if !self.is_attached(node) {
            return Vec::new();
        }
        self.subtree(node).into_iter().skip(1).collect()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|data| data.parent)
    }

    fn is_attached(&self, node: NodeId) -> bool {
        if self.node(node).is_none() {
            return false;
        }
        self.ancestors_inclusive(node).last() == Some(&self.body)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).and_then(|data| data.attributes.get(name)).map(String::as_str)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.node_mut(node) {
            data.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|data| data.text.as_str())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(data) = self.node_mut(node) {
            text.clone_into(&mut data.text);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|data| data.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.node_mut(node)
            && !data.classes.iter().any(|c| c == class)
        {
            data.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.node_mut(node) {
            data.classes.retain(|c| c != class);
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).and_then(|data| data.styles.get(property)).map(String::as_str)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(data) = self.node_mut(node) {
            if value.is_empty() {
                data.styles.remove(property);
            } else {
                data.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn add_listener(&mut self, node: NodeId, listener: Listener) {
        if let Some(data) = self.node_mut(node) {
            data.listeners.push(listener);
        }
    }

    fn listeners(&self, node: NodeId) -> &[Listener] {
        self.node(node).map_or(&[], |data| data.listeners.as_slice())
    }

    fn insert(&mut self, parent: NodeId, before: Option<NodeId>, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut classes: Vec<String> = Vec::with_capacity(element.classes.len());
        for class in element.classes {
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
        self.nodes.push(NodeData {
            tag: element.tag,
            attributes: element.attributes.into_iter().collect(),
            classes,
            text: element.text,
            parent: Some(parent),
            ..NodeData::default()
        });

        if let Some(parent_data) = self.node_mut(parent) {
            let position = before
                .and_then(|reference| parent_data.children.iter().position(|c| *c == reference))
                .unwrap_or(parent_data.children.len());
            parent_data.children.insert(position, id);
        } else if let Some(data) = self.node_mut(id) {
            data.parent = None;
        }

        id
    }

    fn remove(&mut self, node: NodeId) {
        if node == self.body {
            return;
        }
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(parent_data) = self.node_mut(parent) {
            parent_data.children.retain(|child| *child != node);
        }
        if let Some(data) = self.node_mut(node) {
            data.parent = None;
        }
    }
}
