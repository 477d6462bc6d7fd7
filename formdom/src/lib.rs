pub mod document;
pub mod element;
pub mod event;

pub use document::{Document, Node, NodeId};
pub use element::{find_element, Element};
pub use event::{Event, EventKind, Listener};
