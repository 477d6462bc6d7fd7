//! Tests for live field bindings.

mod common;

use std::sync::{Arc, Mutex};

use common::*;
use formdom::{Document, Element, EventKind};
use payform::validation::ErrorDisplay;
use payform::{BindError, DisplayAnchor, MessageCatalog, Rule};

fn messages() -> MessageCatalog {
    MessageCatalog::default()
}

// ============================================================================
// Single fields
// ============================================================================

#[test]
fn test_single_shows_error_on_blur() {
    let mut doc = report_page();
    validator()
        .bind_single(&mut doc, "AverageTimeToPay", Rule::TextPositiveInteger)
        .unwrap()
        .unwrap();

    enter(&mut doc, "AverageTimeToPay", "-4");

    assert_eq!(field_error(&doc, "AverageTimeToPay"), Some(messages().nonnegative));
}

#[test]
fn test_single_clears_error_when_fixed() {
    let mut doc = report_page();
    validator()
        .bind_single(&mut doc, "AverageTimeToPay", Rule::TextPositiveInteger)
        .unwrap();

    enter(&mut doc, "AverageTimeToPay", "soon");
    assert_eq!(field_error(&doc, "AverageTimeToPay"), Some(messages().integer));

    let field = node(&doc, "AverageTimeToPay");
    doc.set_value(field, "30");
    doc.blur(field);
    assert_eq!(field_error(&doc, "AverageTimeToPay"), None);
    assert_eq!(doc.node(node(&doc, "AverageTimeToPay-error")).unwrap().text(), "");
}

#[test]
fn test_single_skips_empty_field() {
    let mut doc = report_page();
    validator()
        .bind_single(&mut doc, "AverageTimeToPay", Rule::TextPositiveInteger)
        .unwrap();

    let field = node(&doc, "AverageTimeToPay");
    doc.blur(field);

    assert_eq!(field_error(&doc, "AverageTimeToPay"), None);
}

#[test]
fn test_single_validates_bad_input_even_when_empty() {
    let mut doc = report_page();
    validator()
        .bind_single(&mut doc, "AverageTimeToPay", Rule::TextPositiveInteger)
        .unwrap();

    let field = node(&doc, "AverageTimeToPay");
    doc.set_bad_input(field, true);
    doc.blur(field);

    assert_eq!(field_error(&doc, "AverageTimeToPay"), Some(messages().integer));
}

#[test]
fn test_key_down_clears_error() {
    let mut doc = report_page();
    validator()
        .bind_single(&mut doc, "PercentInvoicesPaidBeyondAgreedTerms", Rule::TextPercentage)
        .unwrap();

    enter(&mut doc, "PercentInvoicesPaidBeyondAgreedTerms", "140");
    assert_eq!(
        field_error(&doc, "PercentInvoicesPaidBeyondAgreedTerms"),
        Some(messages().percentagebounds)
    );

    let field = node(&doc, "PercentInvoicesPaidBeyondAgreedTerms");
    doc.key_down(field);
    assert_eq!(field_error(&doc, "PercentInvoicesPaidBeyondAgreedTerms"), None);
}

#[test]
fn test_single_lookup_by_name() {
    let mut doc = Document::new(
        Element::div().child(
            Element::div()
                .id("group")
                .class("form-group")
                .child(Element::span().id("msg").class("error-message"))
                .child(Element::input("Amount").id("amount-input")),
        ),
    );
    validator()
        .bind_single(&mut doc, "Amount", Rule::TextInteger)
        .unwrap()
        .unwrap();

    enter(&mut doc, "amount-input", "1.5");
    assert_eq!(error_at(&doc, "group", "msg"), Some(messages().integer));
}

#[test]
fn test_single_missing_field_is_noop() {
    let mut doc = report_page();
    let result = validator().bind_single(&mut doc, "NotOnThisPage", Rule::TextPercentage);
    assert_eq!(result, Ok(None));
}

#[test]
fn test_single_missing_message_slot_is_noop() {
    let mut doc = Document::new(Element::div().child(Element::input("Lonely")));
    let result = validator().bind_single(&mut doc, "Lonely", Rule::TextPercentage);
    assert_eq!(result, Ok(None));

    let field = doc.find_field("Lonely").unwrap();
    assert_eq!(doc.listener_count(field, EventKind::Blur), 0);
}

#[test]
fn test_single_rejects_multi_value_rule() {
    let mut doc = report_page();
    let result = validator().bind_single(&mut doc, "AverageTimeToPay", Rule::MultiSumTo100);
    assert_eq!(
        result,
        Err(BindError::Arity {
            rule: "multiSumTo100",
            expected: 3,
            actual: 1
        })
    );
}

// ============================================================================
// Groups
// ============================================================================

const PERIODS: [&str; 3] = [
    "PercentInvoicesWithin30Days",
    "PercentInvoicesWithin60Days",
    "PercentInvoicesBeyond60Days",
];

fn bind_sum(doc: &mut Document) {
    validator()
        .bind_group(
            doc,
            &PERIODS,
            Rule::MultiSumTo100,
            DisplayAnchor::field("PercentInvoicesWithin30Days"),
        )
        .unwrap()
        .unwrap();
}

fn periods_error(doc: &Document) -> Option<String> {
    error_at(doc, "periods-group", "periods-error")
}

#[test]
fn test_group_shows_shared_error() {
    let mut doc = report_page();
    bind_sum(&mut doc);

    enter(&mut doc, PERIODS[0], "30");
    enter(&mut doc, PERIODS[1], "30");
    enter(&mut doc, PERIODS[2], "30");

    assert_eq!(periods_error(&doc), Some(messages().sumto100));
    assert_eq!(field_error(&doc, PERIODS[0]), None);
}

#[test]
fn test_group_any_member_blur_revalidates() {
    let mut doc = report_page();
    bind_sum(&mut doc);

    enter(&mut doc, PERIODS[0], "30");
    enter(&mut doc, PERIODS[1], "30");
    enter(&mut doc, PERIODS[2], "30");
    assert!(periods_error(&doc).is_some());

    // Fix the first field without typing (no key-down), then blur the last.
    let first = node(&doc, PERIODS[0]);
    doc.set_value(first, "40");
    let last = node(&doc, PERIODS[2]);
    doc.blur(last);

    assert_eq!(periods_error(&doc), None);
}

#[test]
fn test_group_incomplete_neither_shows_nor_clears() {
    let mut doc = report_page();
    bind_sum(&mut doc);

    enter(&mut doc, PERIODS[0], "10");
    enter(&mut doc, PERIODS[1], "10");
    assert_eq!(periods_error(&doc), None);

    enter(&mut doc, PERIODS[2], "10");
    assert!(periods_error(&doc).is_some());

    // Empty a member without a key-down and blur another member.
    let middle = node(&doc, PERIODS[1]);
    doc.set_value(middle, "");
    let first = node(&doc, PERIODS[0]);
    doc.blur(first);

    assert_eq!(periods_error(&doc), Some(messages().sumto100));
}

#[test]
fn test_group_abstain_leaves_display() {
    let mut doc = report_page();
    bind_sum(&mut doc);

    enter(&mut doc, PERIODS[0], "30");
    enter(&mut doc, PERIODS[1], "30");
    enter(&mut doc, PERIODS[2], "30");
    assert!(periods_error(&doc).is_some());

    let first = node(&doc, PERIODS[0]);
    doc.set_value(first, "-1");
    doc.blur(first);

    assert_eq!(periods_error(&doc), Some(messages().sumto100));
}

#[test]
fn test_group_key_down_in_any_member_clears() {
    let mut doc = report_page();
    bind_sum(&mut doc);

    enter(&mut doc, PERIODS[0], "30");
    enter(&mut doc, PERIODS[1], "30");
    enter(&mut doc, PERIODS[2], "30");

    let middle = node(&doc, PERIODS[1]);
    doc.key_down(middle);
    assert_eq!(periods_error(&doc), None);
}

#[test]
fn test_group_anchor_last_uses_last_member_in_page() {
    let mut doc = report_page();
    validator()
        .bind_group(
            &mut doc,
            &[PERIODS[2], PERIODS[0], PERIODS[1]],
            Rule::MultiSumTo100,
            DisplayAnchor::Last,
        )
        .unwrap()
        .unwrap();

    enter(&mut doc, PERIODS[0], "1");
    enter(&mut doc, PERIODS[1], "1");
    enter(&mut doc, PERIODS[2], "1");

    // All members share the fieldset, so the fieldset's slot reports.
    assert_eq!(periods_error(&doc), Some(messages().sumto100));
}

#[test]
fn test_group_anchor_last_across_containers() {
    let mut doc = report_page();
    validator()
        .bind_group(
            &mut doc,
            &[
                "StartDate.year",
                "StartDate.month",
                "StartDate.day",
                "EndDate.year",
                "EndDate.month",
                "EndDate.day",
            ],
            Rule::MultiStartBeforeEnd,
            DisplayAnchor::Last,
        )
        .unwrap()
        .unwrap();

    enter_date(&mut doc, "StartDate", "2021", "5", "1");
    enter_date(&mut doc, "EndDate", "2021", "4", "1");

    assert_eq!(
        error_at(&doc, "EndDate-group", "EndDate-error"),
        Some(messages().startbeforeend)
    );
    assert_eq!(error_at(&doc, "StartDate-group", "StartDate-error"), None);
    assert_eq!(doc.node(node(&doc, "StartDate-error")).unwrap().text(), "");
}

#[test]
fn test_group_anchor_element() {
    let mut doc = report_page();
    validator()
        .bind_group(
            &mut doc,
            &PERIODS,
            Rule::MultiSumTo100,
            DisplayAnchor::element("PercentInvoicesBeyond60Days-group"),
        )
        .unwrap()
        .unwrap();

    let display = ErrorDisplay::for_container(&doc, node(&doc, "PercentInvoicesBeyond60Days-group"))
        .unwrap();
    assert_eq!(display.message, node(&doc, "PercentInvoicesBeyond60Days-error"));
    assert_eq!(display.group, node(&doc, "periods-fieldset"));

    enter(&mut doc, PERIODS[0], "1");
    enter(&mut doc, PERIODS[1], "1");
    enter(&mut doc, PERIODS[2], "1");

    assert_eq!(display.shown_message(&doc), Some(messages().sumto100.as_str()));
}

#[test]
fn test_group_missing_member_is_noop() {
    let mut doc = report_page();
    let result = validator().bind_group(
        &mut doc,
        &[PERIODS[0], PERIODS[1], "Missing"],
        Rule::MultiSumTo100,
        DisplayAnchor::Last,
    );
    assert_eq!(result, Ok(None));
}

#[test]
fn test_group_arity_mismatch() {
    let mut doc = report_page();
    let result = validator().bind_group(
        &mut doc,
        &PERIODS[..2],
        Rule::MultiSumTo100,
        DisplayAnchor::Last,
    );
    assert!(matches!(result, Err(BindError::Arity { actual: 2, .. })));
}

// ============================================================================
// Date triples
// ============================================================================

fn start_date_error(doc: &Document) -> Option<String> {
    error_at(doc, "StartDate-group", "StartDate-error")
}

#[test]
fn test_date_triple_invalid_date() {
    let mut doc = report_page();
    validator()
        .bind_date_triple(&mut doc, "StartDate", Rule::DateValid)
        .unwrap()
        .unwrap();

    enter_date(&mut doc, "StartDate", "2021", "2", "29");
    assert_eq!(start_date_error(&doc), Some(messages().date));

    let day = node(&doc, "StartDate.day");
    doc.set_value(day, "28");
    doc.blur(day);
    assert_eq!(start_date_error(&doc), None);
}

#[test]
fn test_date_triple_future() {
    let mut doc = report_page();
    validator()
        .bind_date_triple(&mut doc, "StartDate", Rule::DateValid)
        .unwrap();

    enter_date(&mut doc, "StartDate", "2024", "6", "16");
    assert_eq!(start_date_error(&doc), Some(messages().future));
}

#[test]
fn test_date_triple_waits_for_all_parts() {
    let mut doc = report_page();
    validator()
        .bind_date_triple(&mut doc, "StartDate", Rule::DateValid)
        .unwrap();

    enter(&mut doc, "StartDate.year", "2021");
    enter(&mut doc, "StartDate.month", "2");
    assert_eq!(start_date_error(&doc), None);
}

#[test]
fn test_date_triple_missing_is_noop() {
    let mut doc = report_page();
    let result = validator().bind_date_triple(&mut doc, "FinishDate", Rule::DateValid);
    assert_eq!(result, Ok(None));
}

#[test]
fn test_date_triple_needs_three_value_rule() {
    let mut doc = report_page();
    let result = validator().bind_date_triple(&mut doc, "StartDate", Rule::TextInteger);
    assert!(matches!(result, Err(BindError::Arity { expected: 1, actual: 3, .. })));
}

// ============================================================================
// Rebinding
// ============================================================================

#[test]
fn test_rebinding_runs_both_rules_in_order() {
    let mut doc = report_page();
    let field = node(&doc, "AverageTimeToPay");
    let order = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&order);
    doc.add_listener(field, EventKind::Blur, move |_, _| log.lock().unwrap().push("before"));

    validator()
        .bind_single(&mut doc, "AverageTimeToPay", Rule::TextInteger)
        .unwrap();
    let log = Arc::clone(&order);
    doc.add_listener(field, EventKind::Blur, move |doc, _| {
        let shown = doc.node(doc.get_element_by_id("AverageTimeToPay-group").unwrap())
            .unwrap()
            .has_class("error");
        log.lock().unwrap().push(if shown { "after-error" } else { "after-clear" });
    });
    validator()
        .bind_single(&mut doc, "AverageTimeToPay", Rule::TextPercentage)
        .unwrap();

    enter(&mut doc, "AverageTimeToPay", "250");

    // Integer passes (clears), then the percentage rule shows its error.
    assert_eq!(*order.lock().unwrap(), vec!["before", "after-clear"]);
    assert_eq!(field_error(&doc, "AverageTimeToPay"), Some(messages().percentagebounds));
    assert_eq!(doc.listener_count(field, EventKind::Blur), 4);
}

#[test]
fn test_date_field_shared_by_triple_and_ordering() {
    let mut doc = report_page();
    let validator = validator();
    validator
        .bind_date_triple(&mut doc, "EndDate", Rule::DateValid)
        .unwrap()
        .unwrap();
    validator
        .bind_group(
            &mut doc,
            &[
                "StartDate.year",
                "StartDate.month",
                "StartDate.day",
                "EndDate.year",
                "EndDate.month",
                "EndDate.day",
            ],
            Rule::MultiStartBeforeEnd,
            DisplayAnchor::field("EndDate.year"),
        )
        .unwrap()
        .unwrap();

    let end_year = node(&doc, "EndDate.year");
    assert_eq!(doc.listener_count(end_year, EventKind::Blur), 2);

    enter_date(&mut doc, "StartDate", "2021", "5", "1");
    enter_date(&mut doc, "EndDate", "2021", "4", "1");

    assert_eq!(
        error_at(&doc, "EndDate-group", "EndDate-error"),
        Some(messages().startbeforeend)
    );
}
