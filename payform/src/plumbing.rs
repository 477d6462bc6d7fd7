//! Page start-up for the payment practices report.

use formdom::Document;

use crate::config::FormConfig;
use crate::consent::{ConsentManager, CookieJar, bind_cookie_banner, link_previous_page};
use crate::disclosure::{bind_disclosure, bind_header_toggles, default_rules};
use crate::error::BindError;
use crate::validation::{BindingId, DisplayAnchor, Rule, Validator, date_keys};

pub const START_DATE: &str = "StartDate";
pub const END_DATE: &str = "EndDate";
pub const AVERAGE_TIME_TO_PAY: &str = "AverageTimeToPay";
pub const PERCENT_BEYOND_AGREED_TERMS: &str = "PercentInvoicesPaidBeyondAgreedTerms";
pub const PERCENT_WITHIN_30_DAYS: &str = "PercentInvoicesWithin30Days";
pub const PERCENT_WITHIN_60_DAYS: &str = "PercentInvoicesWithin60Days";
pub const PERCENT_BEYOND_60_DAYS: &str = "PercentInvoicesBeyond60Days";

/// Attach every report form rule to `doc`. Fields missing from the page are
/// skipped; the returned ids cover the bindings that took effect.
pub fn wire_report_form(
    doc: &mut Document,
    validator: &Validator,
) -> Result<Vec<BindingId>, BindError> {
    let [start_year, start_month, start_day] = date_keys(START_DATE);
    let [end_year, end_month, end_day] = date_keys(END_DATE);

    let bindings = [
        validator.bind_date_triple(doc, START_DATE, Rule::DateValid)?,
        validator.bind_date_triple(doc, END_DATE, Rule::DateValid)?,
        validator.bind_group(
            doc,
            &[
                start_year.as_str(),
                start_month.as_str(),
                start_day.as_str(),
                end_year.as_str(),
                end_month.as_str(),
                end_day.as_str(),
            ],
            Rule::MultiStartBeforeEnd,
            DisplayAnchor::field(end_year.as_str()),
        )?,
        validator.bind_single(doc, AVERAGE_TIME_TO_PAY, Rule::TextPositiveInteger)?,
        validator.bind_single(doc, PERCENT_BEYOND_AGREED_TERMS, Rule::TextPercentage)?,
        validator.bind_single(doc, PERCENT_WITHIN_30_DAYS, Rule::TextPercentage)?,
        validator.bind_single(doc, PERCENT_WITHIN_60_DAYS, Rule::TextPercentage)?,
        validator.bind_single(doc, PERCENT_BEYOND_60_DAYS, Rule::TextPercentage)?,
        validator.bind_group(
            doc,
            &[PERCENT_WITHIN_30_DAYS, PERCENT_WITHIN_60_DAYS, PERCENT_BEYOND_60_DAYS],
            Rule::MultiSumTo100,
            DisplayAnchor::field(PERCENT_WITHIN_30_DAYS),
        )?,
    ];

    Ok(bindings.into_iter().flatten().collect())
}

/// Everything a report page wires at load time.
#[derive(Debug, Clone)]
pub struct Page {
    pub validator: Validator,
    pub consent: ConsentManager,
    pub bindings: Vec<BindingId>,
    pub panels: usize,
    pub header_toggles: usize,
}

impl Page {
    /// Wire validation, disclosure panels, header toggles and the cookie
    /// banner onto `doc`.
    pub fn init(doc: &mut Document, config: &FormConfig, jar: CookieJar) -> Result<Self, BindError> {
        let consent = ConsentManager::new(jar).with_secure(config.secure_cookies);
        Self::init_with(doc, config, config.validator(), consent)
    }

    /// Like [`Page::init`], with a caller-built validator and consent manager.
    pub fn init_with(
        doc: &mut Document,
        config: &FormConfig,
        validator: Validator,
        consent: ConsentManager,
    ) -> Result<Self, BindError> {
        bind_cookie_banner(doc, &consent, &config.path);
        link_previous_page(doc, &config.path, config.referrer.as_deref());
        let panels = bind_disclosure(doc, &default_rules());
        let header_toggles = bind_header_toggles(doc);
        let bindings = wire_report_form(doc, &validator)?;

        log::debug!(
            "[page] {} bindings, {} panels, {} header toggles",
            bindings.len(),
            panels,
            header_toggles
        );

        Ok(Self {
            validator,
            consent,
            bindings,
            panels,
            header_toggles,
        })
    }
}
