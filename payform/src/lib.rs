//! Live validation and progressive disclosure for the payment practices
//! report form.
//!
//! The page is modelled with [`formdom`]. [`validation::Validator`] binds
//! rules to form controls so errors appear as the user leaves each field,
//! [`disclosure`] shows follow-up panels based on yes/no answers, and
//! [`consent`] manages the cookie policy banner.

pub mod config;
pub mod consent;
pub mod disclosure;
pub mod error;
pub mod plumbing;
pub mod validation;

pub use config::FormConfig;
pub use error::{BindError, ConfigError};
pub use plumbing::{Page, wire_report_form};
pub use validation::{DisplayAnchor, ErrorKind, MessageCatalog, Outcome, Rule, Validator};
