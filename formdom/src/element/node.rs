use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// A page element under construction.
///
/// Elements are composed into a tree with the builder methods below and then
/// handed to [`crate::Document::new`], which takes ownership and flattens the
/// tree into document order.
#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub tag: String,
    pub id: String,
    pub name: Option<String>,

    // Styling hooks
    pub classes: Vec<String>,
    pub attributes: HashMap<String, String>,

    // Form state
    pub value: String,
    pub checked: bool,
    /// Set when the control holds input it cannot represent as a value
    /// (a number input containing letters reports an empty value).
    pub bad_input: bool,

    // Content
    pub text: String,
    pub hidden: bool,
    pub children: Vec<Element>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            id: generate_id("el"),
            name: None,
            classes: Vec::new(),
            attributes: HashMap::new(),
            value: String::new(),
            checked: false,
            bad_input: false,
            text: String::new(),
            hidden: false,
            children: Vec::new(),
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn fieldset() -> Self {
        Self::new("fieldset")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: content.into(),
            ..Self::new("span")
        }
    }

    /// Create a text input carrying the given `name` attribute.
    pub fn input(name: impl Into<String>) -> Self {
        Self::new("input").name(name).attr("type", "text")
    }

    /// Create a radio button belonging to the `name` group.
    pub fn radio(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new("input")
            .name(name)
            .attr("type", "radio")
            .value(value)
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self {
            text: label.into(),
            ..Self::new("button")
        }
    }

    /// Create a link pointing at `href`.
    pub fn link(href: impl Into<String>) -> Self {
        Self::new("a").attr("href", href)
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    // Styling hooks
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        for token in class.split_whitespace() {
            if !self.classes.iter().any(|c| c == token) {
                self.classes.push(token.to_string());
            }
        }
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    // Form state
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn bad_input(mut self, bad_input: bool) -> Self {
        self.bad_input = bad_input;
        self
    }

    // Content
    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(new_children);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
