//! `payform rule`

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use payform::{BindError, FormConfig, Outcome, Rule};

use crate::error::CliError;
use crate::replay::load_config;

#[derive(Args, Debug)]
pub struct RuleArgs {
    /// Rule name, e.g. `textPercentage` or `multiSumTo100`.
    pub name: String,

    /// Values in field order (dates as year month day).
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<String>,

    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Pin today's date (YYYY-MM-DD) for future-date checks.
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

/// Evaluate a named rule over raw values.
pub fn evaluate(
    config: &FormConfig,
    name: &str,
    values: &[String],
    today: Option<NaiveDate>,
) -> Result<Outcome, CliError> {
    let rule: Rule = name.parse()?;
    if rule.arity() != values.len() {
        return Err(BindError::arity(rule.name(), rule.arity(), values.len()).into());
    }

    let validator = match today {
        Some(today) => config.validator().with_today(today),
        None => config.validator(),
    };
    let values: Vec<&str> = values.iter().map(String::as_str).collect();
    Ok(validator.check(rule, &values))
}

pub fn run(args: &RuleArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_ref())?;
    let outcome = evaluate(&config, &args.name, &args.values, args.today)?;
    println!("{}", outcome);
    Ok(())
}
