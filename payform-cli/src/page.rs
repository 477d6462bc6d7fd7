//! JSON page descriptions.
//!
//! A page file is one element tree:
//!
//! ```json
//! { "tag": "div", "children": [
//!     { "tag": "div", "id": "AverageTimeToPay-group", "class": "form-group", "children": [
//!         { "tag": "span", "class": "error-message" },
//!         { "tag": "input", "id": "AverageTimeToPay", "name": "AverageTimeToPay" }
//!     ] }
//! ] }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use formdom::{Document, Element};
use serde::Deserialize;

use crate::error::{CliError, read_json};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageNode {
    pub tag: String,
    pub id: Option<String>,
    pub name: Option<String>,
    /// Space separated, as in markup.
    pub class: Option<String>,
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    pub attrs: BTreeMap<String, String>,
    pub value: Option<String>,
    pub checked: bool,
    pub text: Option<String>,
    pub hidden: bool,
    pub children: Vec<PageNode>,
}

impl Default for PageNode {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            id: None,
            name: None,
            class: None,
            input_type: None,
            attrs: BTreeMap::new(),
            value: None,
            checked: false,
            text: None,
            hidden: false,
            children: Vec::new(),
        }
    }
}

impl From<PageNode> for Element {
    fn from(node: PageNode) -> Self {
        let mut element = Element::new(node.tag);

        if let Some(id) = node.id {
            element = element.id(id);
        }
        if let Some(name) = node.name {
            element = element.name(name);
        }
        if let Some(class) = node.class {
            element = element.class(class);
        }
        if let Some(input_type) = node.input_type {
            element = element.attr("type", input_type);
        }
        for (key, value) in node.attrs {
            element = element.attr(key, value);
        }
        if let Some(value) = node.value {
            element = element.value(value);
        }
        if let Some(text) = node.text {
            element = element.content(text);
        }

        element
            .checked(node.checked)
            .hidden(node.hidden)
            .children(node.children.into_iter().map(Element::from))
    }
}

/// Build a document from a JSON page description.
pub fn parse_page(json: &str) -> Result<Document, serde_json::Error> {
    let root: PageNode = serde_json::from_str(json)?;
    Ok(Document::new(root.into()))
}

pub fn load_page(path: &Path) -> Result<Document, CliError> {
    let root: PageNode = read_json(path)?;
    log::debug!("[page] loaded {}", path.display());
    Ok(Document::new(root.into()))
}
