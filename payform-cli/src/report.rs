//! What the page shows after a replay.

use std::fmt;

use formdom::Document;
use payform::validation::{ERROR_CLASS, ERROR_MESSAGE_CLASS};
use serde::Serialize;

/// A message slot currently showing an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShownError {
    pub group: String,
    pub classes: String,
    pub slot: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub errors: Vec<ShownError>,
    /// Ids of hidden elements, in page order.
    pub hidden: Vec<String>,
}

impl Report {
    pub fn collect(doc: &Document) -> Self {
        let errors = doc
            .get_elements_by_class(ERROR_MESSAGE_CLASS)
            .into_iter()
            .filter_map(|slot| {
                let node = doc.node(slot)?;
                if node.text().is_empty() {
                    return None;
                }
                let group = doc
                    .ancestors(slot)
                    .into_iter()
                    .find(|&a| doc.node(a).is_some_and(|n| n.has_class(ERROR_CLASS)))?;
                let group = doc.node(group)?;
                Some(ShownError {
                    group: group.id().to_string(),
                    classes: group.class_name(),
                    slot: node.id().to_string(),
                    message: node.text().to_string(),
                })
            })
            .collect();

        let hidden = doc
            .nodes()
            .filter_map(|id| doc.node(id))
            .filter(|n| n.hidden())
            .map(|n| n.id().to_string())
            .collect();

        Self { errors, hidden }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            writeln!(f, "No errors shown")?;
        }
        for error in &self.errors {
            writeln!(f, "#{} [{}]: {}", error.group, error.classes, error.message)?;
        }
        for id in &self.hidden {
            writeln!(f, "hidden: #{}", id)?;
        }
        Ok(())
    }
}
