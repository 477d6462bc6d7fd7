use std::sync::Arc;

use crate::document::{Document, NodeId};

/// The kinds of element events listeners can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Element lost focus
    Blur,
    /// Key pressed while the element had focus, before its value changes
    KeyDown,
    /// Element was clicked (radio buttons are checked before dispatch)
    Click,
}

/// An event delivered to the listeners of its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self { kind, target }
    }
}

/// A registered event callback.
///
/// Listeners get mutable access to the document so they can read other
/// controls and update error displays.
pub type Listener = Arc<dyn Fn(&mut Document, &Event) + Send + Sync>;
