//! Error types

/// Errors from wiring a rule to page fields.
///
/// A page that simply lacks the fields is not an error: binding then does
/// nothing. These variants flag wiring code that can never work.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The rule reads a different number of values than fields were given.
    #[error("Rule '{rule}' takes {expected} value(s) but was bound to {actual} field(s)")]
    Arity {
        rule: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No rule in the library has this name.
    #[error("Unknown validation rule '{0}'")]
    UnknownRule(String),
}

impl BindError {
    pub fn arity(rule: &'static str, expected: usize, actual: usize) -> Self {
        Self::Arity {
            rule,
            expected,
            actual,
        }
    }

    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule(name.into())
    }
}

/// Errors from loading a [`crate::FormConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
