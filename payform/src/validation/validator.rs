//! Binds rules to page fields.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use formdom::{Document, EventKind, NodeId};

use super::error_display::{DisplayAnchor, ErrorDisplay};
use super::messages::MessageCatalog;
use super::result::Outcome;
use super::rules::{Rule, RuleContext, Verdict};
use crate::error::BindError;

/// Source of today's date for rules that reject the future.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Unique identifier for a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(usize);

impl BindingId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for BindingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__binding_{}", self.0)
    }
}

/// Attaches live validation to form fields.
///
/// The validator holds the message catalog and the inputs date rules need.
/// Each `bind_*` call looks its fields up once, resolves where errors are
/// shown, and registers blur and key-down listeners on the document:
///
/// - blur runs the rule and shows or clears the error,
/// - key-down clears the error while the user edits.
///
/// Binding several rules to the same field is additive: every rule runs on
/// blur, oldest first.
///
/// # Example
///
/// ```ignore
/// let validator = Validator::new(MessageCatalog::default());
/// validator.bind_single(&mut doc, "AverageTimeToPay", Rule::TextPositiveInteger)?;
/// validator.bind_date_triple(&mut doc, "StartDate", Rule::DateValid)?;
/// ```
#[derive(Clone)]
pub struct Validator {
    messages: Arc<MessageCatalog>,
    service_start: Option<NaiveDate>,
    clock: Clock,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("messages", &self.messages)
            .field("service_start", &self.service_start)
            .finish_non_exhaustive()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(MessageCatalog::default())
    }
}

impl Validator {
    /// Create a validator that reads the local date for future checks.
    pub fn new(messages: MessageCatalog) -> Self {
        Self {
            messages: Arc::new(messages),
            service_start: None,
            clock: Arc::new(|| chrono::Local::now().date_naive()),
        }
    }

    /// Reject reporting periods ending before this date.
    pub fn with_service_start(mut self, date: NaiveDate) -> Self {
        self.service_start = Some(date);
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Pin "today" to a fixed date.
    pub fn with_today(self, today: NaiveDate) -> Self {
        self.with_clock(move || today)
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    pub fn service_start(&self) -> Option<NaiveDate> {
        self.service_start
    }

    /// Rule inputs as of now.
    pub fn context(&self) -> RuleContext {
        RuleContext {
            today: (self.clock)(),
            service_start: self.service_start,
        }
    }

    /// Run `rule` over `values` and resolve the message.
    pub fn check(&self, rule: Rule, values: &[&str]) -> Outcome {
        let verdict = rule.evaluate(values, &self.context());
        log::trace!("[check] {} {:?} -> {:?}", rule, values, verdict);
        self.outcome(verdict)
    }

    pub fn outcome(&self, verdict: Verdict) -> Outcome {
        match verdict {
            Verdict::Valid => Outcome::Valid,
            Verdict::Invalid(kind) => Outcome::Invalid(self.messages.message(kind).to_string()),
            Verdict::Abstain => Outcome::Abstain,
        }
    }

    /// Validate one field when it loses focus.
    ///
    /// Empty fields are skipped unless the control reports input it could
    /// not hold as a value. Returns `Ok(None)` when the field or its message
    /// slot is not on the page.
    pub fn bind_single(
        &self,
        doc: &mut Document,
        field: &str,
        rule: Rule,
    ) -> Result<Option<BindingId>, BindError> {
        check_arity(rule, 1)?;

        let Some(node) = doc.find_field(field) else {
            log::debug!("[bind_single] field '{}' not on page, skipping {}", field, rule);
            return Ok(None);
        };
        let Some(display) = ErrorDisplay::for_field(doc, node) else {
            log::debug!("[bind_single] no error display for '{}', skipping {}", field, rule);
            return Ok(None);
        };

        let validator = self.clone();
        doc.add_listener(node, EventKind::Blur, move |doc, event| {
            let Some(target) = doc.node(event.target) else { return };
            if target.value().is_empty() && !target.bad_input() {
                return;
            }
            let value = target.value().to_string();
            let outcome = validator.check(rule, &[&value]);
            display.apply(doc, &outcome);
        });
        doc.add_listener(node, EventKind::KeyDown, move |doc, _| display.clear(doc));

        let id = BindingId::new();
        log::debug!("[bind_single] {} bound {} to '{}'", id, rule, field);
        Ok(Some(id))
    }

    /// Validate several fields together when any of them loses focus.
    ///
    /// While any member is empty the group is not evaluated and the display
    /// is left alone. All members share the display found under `anchor`.
    pub fn bind_group(
        &self,
        doc: &mut Document,
        fields: &[&str],
        rule: Rule,
        anchor: DisplayAnchor,
    ) -> Result<Option<BindingId>, BindError> {
        check_arity(rule, fields.len())?;

        let Some(members) = resolve_fields(doc, fields) else {
            log::debug!("[bind_group] fields {:?} not all on page, skipping {}", fields, rule);
            return Ok(None);
        };
        let Some(display) = anchor
            .container(doc, &members)
            .and_then(|container| ErrorDisplay::for_container(doc, container))
        else {
            log::debug!("[bind_group] no error display at {:?}, skipping {}", anchor, rule);
            return Ok(None);
        };

        self.bind_members(doc, members, rule, display);

        let id = BindingId::new();
        log::debug!("[bind_group] {} bound {} to {:?}", id, rule, fields);
        Ok(Some(id))
    }

    /// Validate a `<prefix>.year` / `.month` / `.day` triple as one date.
    ///
    /// Behaves like [`Validator::bind_group`] with the display taken from the
    /// year field's container.
    pub fn bind_date_triple(
        &self,
        doc: &mut Document,
        prefix: &str,
        rule: Rule,
    ) -> Result<Option<BindingId>, BindError> {
        check_arity(rule, 3)?;

        let keys = date_keys(prefix);
        let fields: Vec<&str> = keys.iter().map(String::as_str).collect();
        let Some(members) = resolve_fields(doc, &fields) else {
            log::debug!("[bind_date_triple] date '{}' not on page, skipping {}", prefix, rule);
            return Ok(None);
        };
        let Some(display) = doc
            .ancestor(members[0], 2)
            .and_then(|container| ErrorDisplay::for_container(doc, container))
        else {
            log::debug!("[bind_date_triple] no error display for '{}', skipping {}", prefix, rule);
            return Ok(None);
        };

        self.bind_members(doc, members, rule, display);

        let id = BindingId::new();
        log::debug!("[bind_date_triple] {} bound {} to '{}'", id, rule, prefix);
        Ok(Some(id))
    }

    fn bind_members(
        &self,
        doc: &mut Document,
        members: Vec<NodeId>,
        rule: Rule,
        display: ErrorDisplay,
    ) {
        let validator = self.clone();
        let watched = members.clone();
        let on_blur = move |doc: &mut Document, _: &formdom::Event| {
            let Some(values) = read_complete(doc, &watched) else {
                log::trace!("[blur] {} group incomplete, leaving display", rule);
                return;
            };
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            let outcome = validator.check(rule, &values);
            display.apply(doc, &outcome);
        };

        for &member in &members {
            doc.add_listener(member, EventKind::Blur, on_blur.clone());
            doc.add_listener(member, EventKind::KeyDown, move |doc, _| display.clear(doc));
        }
    }
}

/// Field keys of a date triple, in year, month, day order.
pub fn date_keys(prefix: &str) -> [String; 3] {
    [
        format!("{prefix}.year"),
        format!("{prefix}.month"),
        format!("{prefix}.day"),
    ]
}

fn check_arity(rule: Rule, fields: usize) -> Result<(), BindError> {
    if rule.arity() == fields {
        Ok(())
    } else {
        Err(BindError::arity(rule.name(), rule.arity(), fields))
    }
}

fn resolve_fields(doc: &Document, fields: &[&str]) -> Option<Vec<NodeId>> {
    fields.iter().map(|key| doc.find_field(key)).collect()
}

/// Current values of all members, or `None` if any is empty.
fn read_complete(doc: &Document, members: &[NodeId]) -> Option<Vec<String>> {
    members
        .iter()
        .map(|&node| {
            doc.value(node)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
        .collect()
}
