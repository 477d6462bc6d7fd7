/// Result of validating bound fields, with the message already resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Outcome {
    /// The fields passed.
    #[default]
    Valid,
    /// The fields failed; the message comes from the catalog.
    Invalid(String),
    /// No verdict. The current display is left as is.
    Abstain,
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Get the error message (if any).
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => f.write_str("ok"),
            Self::Invalid(message) => f.write_str(message),
            Self::Abstain => f.write_str("no verdict"),
        }
    }
}
