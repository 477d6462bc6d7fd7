//! Pure validation rules.
//!
//! Every rule reads raw field text and returns a [`Verdict`]. Composite rules
//! check their parts in a fixed order and report the first failure, so the
//! order of the checks below is part of their behaviour.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::messages::ErrorKind;
use crate::error::BindError;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer pattern is valid"));

/// Result of running a rule against field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(ErrorKind),
    /// The rule declines to judge because one of its inputs is itself
    /// invalid. Displays are left untouched.
    Abstain,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Keep `self` if it already failed, otherwise run `next`.
    fn or_else(self, next: impl FnOnce() -> Verdict) -> Verdict {
        match self {
            Self::Valid => next(),
            failed => failed,
        }
    }
}

fn fail_if(condition: bool, kind: ErrorKind) -> Verdict {
    if condition {
        Verdict::Invalid(kind)
    } else {
        Verdict::Valid
    }
}

/// Inputs a rule may need besides the field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    pub today: NaiveDate,
    pub service_start: Option<NaiveDate>,
}

impl RuleContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            service_start: None,
        }
    }

    pub fn with_service_start(mut self, start: NaiveDate) -> Self {
        self.service_start = Some(start);
        self
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse trimmed text as a whole number. Decimals, exponents and trailing
/// text are rejected.
pub fn as_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if !INTEGER.is_match(trimmed) {
        return None;
    }
    trimmed.parse().ok()
}

/// Build a calendar date from raw year, month (1-based) and day text.
///
/// Years below 100 are rejected: browsers read them as 19xx, so the date
/// never round-trips to what the user typed.
pub fn as_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year = as_integer(year)?;
    let month = as_integer(month)?;
    let day = as_integer(day)?;

    if (0..100).contains(&year) {
        return None;
    }

    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

// ============================================================================
// Single-value rules
// ============================================================================

pub fn integer(text: &str) -> Verdict {
    fail_if(as_integer(text).is_none(), ErrorKind::Integer)
}

/// Unparsable text is not judged here; pair with [`integer`].
pub fn non_negative(text: &str) -> Verdict {
    match as_integer(text) {
        Some(n) => fail_if(n < 0, ErrorKind::NonNegative),
        None => Verdict::Valid,
    }
}

pub fn positive_integer(text: &str) -> Verdict {
    integer(text).or_else(|| non_negative(text))
}

/// Unparsable text is not judged here; pair with [`integer`].
pub fn percentage_bounds(text: &str) -> Verdict {
    match as_integer(text) {
        Some(n) => fail_if(!(0..=100).contains(&n), ErrorKind::PercentageBounds),
        None => Verdict::Valid,
    }
}

pub fn percentage(text: &str) -> Verdict {
    percentage_bounds(text).or_else(|| integer(text))
}

// ============================================================================
// Date rules
// ============================================================================

pub fn date_valid(year: &str, month: &str, day: &str) -> Verdict {
    fail_if(as_date(year, month, day).is_none(), ErrorKind::Date)
}

pub fn date_not_in_future(date: NaiveDate, today: NaiveDate) -> Verdict {
    fail_if(date > today, ErrorKind::Future)
}

pub fn date_not_before_service_start(service_start: NaiveDate, date: NaiveDate) -> Verdict {
    fail_if(date < service_start, ErrorKind::BeforeServiceStart)
}

pub fn start_before_end(start: NaiveDate, end: NaiveDate) -> Verdict {
    fail_if(start > end, ErrorKind::StartBeforeEnd)
}

/// A real date that is not after today.
pub fn date_valid_and_past(year: &str, month: &str, day: &str, today: NaiveDate) -> Verdict {
    match as_date(year, month, day) {
        Some(date) => date_not_in_future(date, today),
        None => Verdict::Invalid(ErrorKind::Date),
    }
}

// ============================================================================
// Cross-field rules
// ============================================================================

/// Check a reporting period given as start y/m/d followed by end y/m/d.
///
/// If either date does not exist the period abstains; the date fields report
/// that themselves.
pub fn multi_start_before_end(values: [&str; 6], ctx: &RuleContext) -> Verdict {
    let [start_year, start_month, start_day, end_year, end_month, end_day] = values;

    let (Some(start), Some(end)) = (
        as_date(start_year, start_month, start_day),
        as_date(end_year, end_month, end_day),
    ) else {
        return Verdict::Abstain;
    };

    start_before_end(start, end)
        .or_else(|| date_not_in_future(start, ctx.today))
        .or_else(|| date_not_in_future(end, ctx.today))
        .or_else(|| match ctx.service_start {
            Some(service_start) => date_not_before_service_start(service_start, end),
            None => Verdict::Valid,
        })
}

/// Three percentages must total 100, give or take 2 for rounding.
///
/// If any single value is not a valid percentage the rule abstains.
pub fn multi_sum_to_100(values: [&str; 3]) -> Verdict {
    if values.iter().any(|v| !percentage(v).is_valid()) {
        return Verdict::Abstain;
    }

    let sum: i64 = values.iter().filter_map(|v| as_integer(v)).sum();
    fail_if(!(98..=102).contains(&sum), ErrorKind::SumTo100)
}

// ============================================================================
// Named rules
// ============================================================================

/// A rule from the library, addressable by its page-facing name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    TextInteger,
    TextNonNegative,
    TextPercentageBounds,
    TextPositiveInteger,
    TextPercentage,
    /// A real date that is not in the future.
    DateValid,
    MultiSumTo100,
    MultiStartBeforeEnd,
}

impl Rule {
    pub const ALL: [Rule; 8] = [
        Rule::TextInteger,
        Rule::TextNonNegative,
        Rule::TextPercentageBounds,
        Rule::TextPositiveInteger,
        Rule::TextPercentage,
        Rule::DateValid,
        Rule::MultiSumTo100,
        Rule::MultiStartBeforeEnd,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::TextInteger => "textInteger",
            Self::TextNonNegative => "textNonNegative",
            Self::TextPercentageBounds => "textPercentageBounds",
            Self::TextPositiveInteger => "textPositiveInteger",
            Self::TextPercentage => "textPercentage",
            Self::DateValid => "dateValid",
            Self::MultiSumTo100 => "multiSumTo100",
            Self::MultiStartBeforeEnd => "multiStartBeforeEnd",
        }
    }

    /// Number of field values the rule reads.
    pub fn arity(self) -> usize {
        match self {
            Self::TextInteger
            | Self::TextNonNegative
            | Self::TextPercentageBounds
            | Self::TextPositiveInteger
            | Self::TextPercentage => 1,
            Self::DateValid | Self::MultiSumTo100 => 3,
            Self::MultiStartBeforeEnd => 6,
        }
    }

    /// Run the rule. A value count that does not match [`Rule::arity`]
    /// abstains.
    pub fn evaluate(self, values: &[&str], ctx: &RuleContext) -> Verdict {
        match (self, values) {
            (Self::TextInteger, [v]) => integer(v),
            (Self::TextNonNegative, [v]) => non_negative(v),
            (Self::TextPercentageBounds, [v]) => percentage_bounds(v),
            (Self::TextPositiveInteger, [v]) => positive_integer(v),
            (Self::TextPercentage, [v]) => percentage(v),
            (Self::DateValid, [y, m, d]) => date_valid_and_past(y, m, d, ctx.today),
            (Self::MultiSumTo100, [a, b, c]) => multi_sum_to_100([*a, *b, *c]),
            (Self::MultiStartBeforeEnd, [sy, sm, sd, ey, em, ed]) => {
                multi_start_before_end([*sy, *sm, *sd, *ey, *em, *ed], ctx)
            }
            _ => Verdict::Abstain,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| BindError::unknown_rule(s))
    }
}
