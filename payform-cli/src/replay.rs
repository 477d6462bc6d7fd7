//! `payform replay`

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use formdom::Document;
use payform::consent::{ConsentManager, CookieJar};
use payform::{FormConfig, Page};

use crate::error::CliError;
use crate::page::load_page;
use crate::report::Report;
use crate::script::{Step, apply, load_script};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON element tree of the page.
    #[arg(long)]
    pub page: PathBuf,

    /// JSON array of steps to play against the page.
    #[arg(long)]
    pub script: PathBuf,

    /// Page configuration (messages, service start, cookie settings).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cookie header the page sees at load, e.g. `_ga=GA1; cookies_policy=...`.
    #[arg(long, default_value = "")]
    pub cookies: String,

    /// Pin today's date (YYYY-MM-DD) for future-date checks.
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FormConfig, CliError> {
    match path {
        Some(path) => Ok(FormConfig::from_file(path)?),
        None => Ok(FormConfig::default()),
    }
}

/// Wire `doc` as a report page, play `steps`, and report what is shown.
pub fn replay(
    doc: &mut Document,
    config: &FormConfig,
    cookies: &str,
    today: Option<NaiveDate>,
    steps: &[Step],
) -> Result<Report, CliError> {
    let validator = match today {
        Some(today) => config.validator().with_today(today),
        None => config.validator(),
    };
    let consent = ConsentManager::new(CookieJar::parse(cookies)).with_secure(config.secure_cookies);
    let page = Page::init_with(doc, config, validator, consent)?;
    log::info!(
        "[replay] wired {} bindings, playing {} steps",
        page.bindings.len(),
        steps.len()
    );

    apply(doc, steps)?;
    Ok(Report::collect(doc))
}

pub fn run(args: &ReplayArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_ref())?;
    let mut doc = load_page(&args.page)?;
    let steps = load_script(&args.script)?;

    let report = replay(&mut doc, &config, &args.cookies, args.today, &steps)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
