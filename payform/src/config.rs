//! Page configuration.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validation::{MessageCatalog, Validator};

/// Settings the host page injects at startup.
///
/// Every key is optional; the defaults describe an English page served over
/// plain HTTP with no service start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Error text, keyed by error kind.
    pub messages: MessageCatalog,
    /// Earliest date a reporting period may end on (`YYYY-MM-DD`).
    pub service_start: Option<NaiveDate>,
    /// Mark cookies written by the consent banner as `Secure`.
    pub secure_cookies: bool,
    /// Path of the page being served.
    pub path: String,
    /// Page the visitor came from; the cookie settings page links back to it.
    pub referrer: Option<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            messages: MessageCatalog::default(),
            service_start: None,
            secure_cookies: false,
            path: "/".to_string(),
            referrer: None,
        }
    }
}

impl FormConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build a validator using these messages and service start date.
    pub fn validator(&self) -> Validator {
        let validator = Validator::new(self.messages.clone());
        match self.service_start {
            Some(date) => validator.with_service_start(date),
            None => validator,
        }
    }
}
