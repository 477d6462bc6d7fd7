use std::collections::HashMap;
use std::sync::Arc;

use crate::element::Element;
use crate::event::{Event, EventKind, Listener};

/// Handle to a mounted element.
///
/// Handles are allocated in document order, so comparing two handles
/// compares their position in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A mounted element.
#[derive(Debug, Clone)]
pub struct Node {
    tag: String,
    id: String,
    name: Option<String>,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    value: String,
    checked: bool,
    bad_input: bool,
    text: String,
    hidden: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Space-separated class list, as it would appear in markup.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn bad_input(&self) -> bool {
        self.bad_input
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    fn is_radio(&self) -> bool {
        self.attr("type") == Some("radio")
    }

    fn is_checkbox(&self) -> bool {
        self.attr("type") == Some("checkbox")
    }
}

/// A mounted page: the element tree plus the listeners attached to it.
pub struct Document {
    nodes: Vec<Node>,
    listeners: HashMap<(NodeId, EventKind), Vec<Listener>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listener_total())
            .finish()
    }
}

impl Document {
    /// Mount an element tree. The root becomes node `#0`.
    pub fn new(root: Element) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            listeners: HashMap::new(),
        };
        doc.mount(root, None);
        doc
    }

    fn mount(&mut self, element: Element, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let Element {
            tag,
            id: element_id,
            name,
            classes,
            attributes,
            value,
            checked,
            bad_input,
            text,
            hidden,
            children,
        } = element;

        self.nodes.push(Node {
            tag,
            id: element_id,
            name,
            classes,
            attributes,
            value,
            checked,
            bad_input,
            text,
            hidden,
            parent,
            children: Vec::with_capacity(children.len()),
        });

        for child in children {
            let child_id = self.mount(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }

        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// All node handles in document order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    // Lookups

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.id == id).map(NodeId)
    }

    /// All elements whose `name` attribute equals `name`, in document order.
    pub fn get_elements_by_name(&self, name: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.name.as_deref() == Some(name))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    /// All elements carrying `class`, in document order.
    pub fn get_elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.has_class(class))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    /// All elements carrying attribute `key`, optionally with an exact value.
    pub fn get_elements_by_attr(&self, key: &str, value: Option<&str>) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| match (n.attr(key), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            })
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    /// Resolve a field key: element id first, then the first element with
    /// that `name`.
    pub fn find_field(&self, key: &str) -> Option<NodeId> {
        self.get_element_by_id(key)
            .or_else(|| self.get_elements_by_name(key).into_iter().next())
    }

    /// Depth-first search for the first element with `class`, starting at
    /// (and including) `root`.
    pub fn find_descendant_with_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        let node = self.node(root)?;
        if node.has_class(class) {
            return Some(root);
        }

        for &child in &node.children {
            if let Some(found) = self.find_descendant_with_class(child, class) {
                return Some(found);
            }
        }

        None
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Walk `levels` steps up the parent chain. `ancestor(id, 0)` is `id`.
    pub fn ancestor(&self, id: NodeId, levels: usize) -> Option<NodeId> {
        let mut current = id;
        for _ in 0..levels {
            current = self.parent(current)?;
        }
        self.node(current).map(|_| current)
    }

    /// Ancestors of `id`, nearest first. Does not include `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = self.parent(id);
        while let Some(node) = current {
            result.push(node);
            current = self.parent(node);
        }
        result
    }

    /// Check whether `node` is `ancestor` or lies beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(Node::value)
    }

    // Mutation

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.value = value.into();
            node.bad_input = false;
        }
    }

    pub fn set_bad_input(&mut self, id: NodeId, bad_input: bool) {
        if let Some(node) = self.node_mut(id) {
            node.bad_input = bad_input;
            if bad_input {
                node.value.clear();
            }
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.text = text.into();
        }
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if let Some(node) = self.node_mut(id) {
            node.hidden = hidden;
        }
    }

    pub fn set_attr(&mut self, id: NodeId, key: impl Into<String>, value: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.attributes.insert(key.into(), value.into());
        }
    }

    /// Add `class` unless already present. Returns true if the list changed.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        match self.node_mut(id) {
            Some(node) if !node.has_class(class) => {
                node.classes.push(class.to_string());
                true
            }
            _ => false,
        }
    }

    /// Remove every occurrence of `class`. Returns true if the list changed.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                let before = node.classes.len();
                node.classes.retain(|c| c != class);
                node.classes.len() != before
            }
            None => false,
        }
    }

    /// Flip `class`. Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.remove_class(id, class) {
            false
        } else {
            self.add_class(id, class)
        }
    }

    /// Set the checked state. Checking a radio button unchecks the other
    /// radios sharing its name.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        let group = match self.node(id) {
            Some(node) if checked && node.is_radio() => node.name.clone(),
            Some(_) => None,
            None => return,
        };

        if let Some(name) = group {
            for other in self.get_elements_by_name(&name) {
                if other != id && self.nodes[other.0].is_radio() {
                    self.nodes[other.0].checked = false;
                }
            }
        }

        if let Some(node) = self.node_mut(id) {
            node.checked = checked;
        }
    }

    // Events

    /// Append a listener for `kind` events on `target`. Earlier listeners
    /// keep running, and run first.
    pub fn add_listener<F>(&mut self, target: NodeId, kind: EventKind, listener: F)
    where
        F: Fn(&mut Document, &Event) + Send + Sync + 'static,
    {
        self.listeners
            .entry((target, kind))
            .or_default()
            .push(Arc::new(listener));
    }

    pub fn listener_count(&self, target: NodeId, kind: EventKind) -> usize {
        self.listeners.get(&(target, kind)).map_or(0, Vec::len)
    }

    fn listener_total(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Run every listener for `kind` on `target` in registration order.
    /// Returns the number of listeners invoked.
    pub fn dispatch(&mut self, target: NodeId, kind: EventKind) -> usize {
        // Snapshot so listeners may borrow the document mutably.
        let Some(listeners) = self.listeners.get(&(target, kind)).cloned() else {
            return 0;
        };

        log::trace!(
            "[dispatch] {:?} on {} ({} listeners)",
            kind,
            target,
            listeners.len()
        );

        let event = Event::new(kind, target);
        for listener in &listeners {
            listener(self, &event);
        }
        listeners.len()
    }

    pub fn blur(&mut self, target: NodeId) -> usize {
        self.dispatch(target, EventKind::Blur)
    }

    pub fn key_down(&mut self, target: NodeId) -> usize {
        self.dispatch(target, EventKind::KeyDown)
    }

    /// Click an element. Radios become checked and checkboxes flip before
    /// the click listeners run.
    pub fn click(&mut self, target: NodeId) -> usize {
        let state = self
            .node(target)
            .map(|n| (n.is_radio(), n.is_checkbox(), n.checked));
        match state {
            Some((true, _, _)) => self.set_checked(target, true),
            Some((false, true, checked)) => self.set_checked(target, !checked),
            _ => {}
        }
        self.dispatch(target, EventKind::Click)
    }

    /// Simulate typing: a key-down fires, then the value is replaced.
    pub fn type_text(&mut self, target: NodeId, text: impl Into<String>) {
        self.key_down(target);
        self.set_value(target, text);
    }
}
