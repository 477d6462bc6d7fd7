//! Scripted user sessions.
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!   { "action": "type", "target": "AverageTimeToPay", "text": "-3" },
//!   { "action": "blur", "target": "AverageTimeToPay" },
//!   { "action": "click", "target": "paymentCodes.yesNo-yes" }
//! ]
//! ```
//!
//! Targets are looked up by id first, then by name.

use std::path::Path;

use formdom::{Document, NodeId};
use serde::Deserialize;

use crate::error::{CliError, read_json};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Key-down, then replace the value.
    Type { target: String, text: String },
    Blur { target: String },
    Click { target: String },
    /// Mark the control as holding input it cannot represent.
    BadInput { target: String },
}

impl Step {
    pub fn target(&self) -> &str {
        match self {
            Self::Type { target, .. }
            | Self::Blur { target }
            | Self::Click { target }
            | Self::BadInput { target } => target,
        }
    }
}

pub fn load_script(path: &Path) -> Result<Vec<Step>, CliError> {
    read_json(path)
}

fn resolve(doc: &Document, step: usize, target: &str) -> Result<NodeId, CliError> {
    doc.find_field(target).ok_or_else(|| CliError::UnknownTarget {
        step,
        target: target.to_string(),
    })
}

/// Run `steps` against `doc` in order. Stops at the first step whose
/// target is missing.
pub fn apply(doc: &mut Document, steps: &[Step]) -> Result<(), CliError> {
    for (i, step) in steps.iter().enumerate() {
        let node = resolve(doc, i + 1, step.target())?;
        log::debug!("[script] step {}: {:?}", i + 1, step);

        match step {
            Step::Type { text, .. } => doc.type_text(node, text.as_str()),
            Step::Blur { .. } => {
                doc.blur(node);
            }
            Step::Click { .. } => {
                doc.click(node);
            }
            Step::BadInput { .. } => doc.set_bad_input(node, true),
        }
    }
    Ok(())
}
