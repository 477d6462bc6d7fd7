//! Error kinds and the message catalog that names them.

use serde::{Deserialize, Serialize};

/// Every way a rule can reject input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Integer,
    NonNegative,
    PercentageBounds,
    SumTo100,
    Date,
    Future,
    StartBeforeEnd,
    BeforeServiceStart,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::Integer,
        ErrorKind::NonNegative,
        ErrorKind::PercentageBounds,
        ErrorKind::SumTo100,
        ErrorKind::Date,
        ErrorKind::Future,
        ErrorKind::StartBeforeEnd,
        ErrorKind::BeforeServiceStart,
    ];

    /// Catalog key for this kind.
    pub fn key(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::NonNegative => "nonnegative",
            Self::PercentageBounds => "percentagebounds",
            Self::SumTo100 => "sumto100",
            Self::Date => "date",
            Self::Future => "future",
            Self::StartBeforeEnd => "startbeforeend",
            Self::BeforeServiceStart => "beforeservicestart",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Human-readable text for each [`ErrorKind`].
///
/// The host page owns the wording. Deserializing a partial catalog keeps the
/// default English text for any key it leaves out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    pub integer: String,
    pub nonnegative: String,
    pub percentagebounds: String,
    pub sumto100: String,
    pub date: String,
    pub future: String,
    pub startbeforeend: String,
    pub beforeservicestart: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            integer: "Please round up or down to the nearest whole number".to_string(),
            nonnegative: "This should be a non-negative number".to_string(),
            percentagebounds: "This should be a number between 0 and 100".to_string(),
            sumto100: "Figures A, B and C do not add up to 100".to_string(),
            date: "This date is invalid".to_string(),
            future: "Reporting period cannot cover the future".to_string(),
            startbeforeend: "The end date cannot be before the start date".to_string(),
            beforeservicestart: "The end date cannot be before the service started".to_string(),
        }
    }
}

impl MessageCatalog {
    pub fn message(&self, kind: ErrorKind) -> &str {
        match kind {
            ErrorKind::Integer => &self.integer,
            ErrorKind::NonNegative => &self.nonnegative,
            ErrorKind::PercentageBounds => &self.percentagebounds,
            ErrorKind::SumTo100 => &self.sumto100,
            ErrorKind::Date => &self.date,
            ErrorKind::Future => &self.future,
            ErrorKind::StartBeforeEnd => &self.startbeforeend,
            ErrorKind::BeforeServiceStart => &self.beforeservicestart,
        }
    }

    /// Replace the text for one kind.
    pub fn with_message(mut self, kind: ErrorKind, text: impl Into<String>) -> Self {
        let text = text.into();
        match kind {
            ErrorKind::Integer => self.integer = text,
            ErrorKind::NonNegative => self.nonnegative = text,
            ErrorKind::PercentageBounds => self.percentagebounds = text,
            ErrorKind::SumTo100 => self.sumto100 = text,
            ErrorKind::Date => self.date = text,
            ErrorKind::Future => self.future = text,
            ErrorKind::StartBeforeEnd => self.startbeforeend = text,
            ErrorKind::BeforeServiceStart => self.beforeservicestart = text,
        }
        self
    }
}
