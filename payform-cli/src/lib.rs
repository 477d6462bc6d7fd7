//! Command line harness for the payment practices report form.
//!
//! Replays scripted sessions against a page description and evaluates single
//! rules, printing what a visitor would see.

pub mod error;
pub mod page;
pub mod replay;
pub mod report;
pub mod rule;
pub mod script;

pub use error::CliError;
pub use page::{PageNode, load_page, parse_page};
pub use replay::replay;
pub use report::{Report, ShownError};
pub use script::{Step, apply};
