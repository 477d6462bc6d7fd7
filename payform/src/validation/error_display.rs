//! Where a binding shows its message, and how.

use formdom::{Document, NodeId};

use super::result::Outcome;

/// Class marking the element that receives the message text.
pub const ERROR_MESSAGE_CLASS: &str = "error-message";
/// Class added to the group element while an error is shown.
pub const ERROR_CLASS: &str = "error";

/// Which container holds the shared display of a grouped binding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayAnchor {
    /// The container two levels above this field.
    Field(String),
    /// This element is the container.
    Element(String),
    /// The container two levels above whichever member comes last in the
    /// page.
    #[default]
    Last,
}

impl DisplayAnchor {
    pub fn field(key: impl Into<String>) -> Self {
        Self::Field(key.into())
    }

    pub fn element(id: impl Into<String>) -> Self {
        Self::Element(id.into())
    }

    /// Resolve to a container for the given bound fields.
    pub(crate) fn container(&self, doc: &Document, members: &[NodeId]) -> Option<NodeId> {
        match self {
            Self::Field(key) => doc.ancestor(doc.find_field(key)?, 2),
            Self::Element(id) => doc.get_element_by_id(id),
            Self::Last => doc.ancestor(*members.iter().max()?, 2),
        }
    }
}

/// A message slot and the group element whose `error` class toggles with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDisplay {
    pub message: NodeId,
    pub group: NodeId,
}

impl ErrorDisplay {
    /// Display for a lone field: the field's parent is the group and holds
    /// the message slot.
    pub fn for_field(doc: &Document, field: NodeId) -> Option<Self> {
        let group = doc.parent(field)?;
        let message = doc.find_descendant_with_class(group, ERROR_MESSAGE_CLASS)?;
        Some(Self { message, group })
    }

    /// Display inside a container: the first message slot beneath it, grouped
    /// by the slot's grandparent.
    pub fn for_container(doc: &Document, container: NodeId) -> Option<Self> {
        let message = doc.find_descendant_with_class(container, ERROR_MESSAGE_CLASS)?;
        let group = doc.ancestor(message, 2)?;
        Some(Self { message, group })
    }

    pub fn show(&self, doc: &mut Document, message: &str) {
        doc.set_text(self.message, message);
        doc.add_class(self.group, ERROR_CLASS);
    }

    pub fn clear(&self, doc: &mut Document) {
        doc.set_text(self.message, "");
        doc.remove_class(self.group, ERROR_CLASS);
    }

    pub fn is_shown(&self, doc: &Document) -> bool {
        doc.node(self.group).is_some_and(|g| g.has_class(ERROR_CLASS))
    }

    /// Current message text, if an error is shown.
    pub fn shown_message<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        if !self.is_shown(doc) {
            return None;
        }
        doc.node(self.message).map(|m| m.text())
    }

    /// Show, clear, or leave the display according to `outcome`.
    pub fn apply(&self, doc: &mut Document, outcome: &Outcome) {
        match outcome {
            Outcome::Valid => self.clear(doc),
            Outcome::Invalid(message) => self.show(doc, message),
            Outcome::Abstain => {}
        }
    }
}
