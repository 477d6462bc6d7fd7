//! Live field validation for the report form.
//!
//! Rules are pure functions over raw field text ([`rules`]). A [`Validator`]
//! wires them to page fields so that leaving a field shows or clears an
//! inline error, and typing into it clears the error again.
//!
//! # Example
//!
//! ```ignore
//! use payform::validation::{DisplayAnchor, MessageCatalog, Rule, Validator};
//!
//! let validator = Validator::new(MessageCatalog::default());
//!
//! validator.bind_single(&mut doc, "PercentInvoicesWithin30Days", Rule::TextPercentage)?;
//! validator.bind_group(
//!     &mut doc,
//!     &["PercentInvoicesWithin30Days", "PercentInvoicesWithin60Days", "PercentInvoicesBeyond60Days"],
//!     Rule::MultiSumTo100,
//!     DisplayAnchor::field("PercentInvoicesWithin30Days"),
//! )?;
//! ```

mod error_display;
mod messages;
mod result;
pub mod rules;
mod validator;

pub use error_display::{DisplayAnchor, ERROR_CLASS, ERROR_MESSAGE_CLASS, ErrorDisplay};
pub use messages::{ErrorKind, MessageCatalog};
pub use result::Outcome;
pub use rules::{Rule, RuleContext, Verdict};
pub use validator::{BindingId, Clock, Validator, date_keys};
