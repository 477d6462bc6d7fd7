#![allow(dead_code)]

use chrono::NaiveDate;
use formdom::{Document, Element, NodeId};
use payform::{MessageCatalog, Validator};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

pub fn validator() -> Validator {
    Validator::new(MessageCatalog::default()).with_today(today())
}

/// A single-field form group: message slot and input share a parent.
pub fn text_field(name: &str) -> Element {
    Element::div()
        .id(format!("{name}-group"))
        .class("form-group")
        .child(Element::new("label").content(name))
        .child(
            Element::span()
                .id(format!("{name}-error"))
                .class("error-message"),
        )
        .child(Element::input(name).id(name))
}

/// A date fieldset: the three inputs sit in a `form-date` wrapper whose
/// parent holds the message slot.
pub fn date_field(prefix: &str) -> Element {
    Element::div()
        .id(format!("{prefix}-group"))
        .class("form-group")
        .child(
            Element::fieldset()
                .id(format!("{prefix}-fieldset"))
                .child(
                    Element::span()
                        .id(format!("{prefix}-error"))
                        .class("error-message"),
                )
                .child(
                    Element::div()
                        .class("form-date")
                        .child(Element::input(format!("{prefix}.year")).id(format!("{prefix}.year")))
                        .child(Element::input(format!("{prefix}.month")).id(format!("{prefix}.month")))
                        .child(Element::input(format!("{prefix}.day")).id(format!("{prefix}.day"))),
                ),
        )
}

/// The payment period percentages: each has its own display, and the
/// fieldset's first message slot reports the sum.
pub fn payment_periods() -> Element {
    Element::div()
        .id("periods-group")
        .class("form-group")
        .child(
            Element::fieldset()
                .id("periods-fieldset")
                .child(Element::span().id("periods-error").class("error-message"))
                .child(text_field("PercentInvoicesWithin30Days"))
                .child(text_field("PercentInvoicesWithin60Days"))
                .child(text_field("PercentInvoicesBeyond60Days")),
        )
}

pub fn yes_no(name: &str, panel_id: &str) -> Element {
    Element::div()
        .child(Element::radio(name, "yes").id(format!("{name}-yes")))
        .child(Element::radio(name, "no").id(format!("{name}-no")))
        .child(Element::div().id(panel_id).content("More detail"))
}

pub fn report_page() -> Document {
    Document::new(
        Element::div()
            .id("root")
            .child(date_field("StartDate"))
            .child(date_field("EndDate"))
            .child(text_field("AverageTimeToPay"))
            .child(text_field("PercentInvoicesPaidBeyondAgreedTerms"))
            .child(payment_periods())
            .child(yes_no("paymentCodes.yesNo", "show-if-payment-codes-short"))
            .child(yes_no(
                "paymentTerms.paymentTermsChanged.changed.yesNo",
                "show-if-payment-changes",
            )),
    )
}

pub fn node(doc: &Document, id: &str) -> NodeId {
    doc.get_element_by_id(id)
        .unwrap_or_else(|| panic!("no element '{id}'"))
}

/// Type `value` into a field and leave it.
pub fn enter(doc: &mut Document, id: &str, value: &str) {
    let field = node(doc, id);
    doc.type_text(field, value);
    doc.blur(field);
}

pub fn enter_date(doc: &mut Document, prefix: &str, year: &str, month: &str, day: &str) {
    enter(doc, &format!("{prefix}.year"), year);
    enter(doc, &format!("{prefix}.month"), month);
    enter(doc, &format!("{prefix}.day"), day);
}

/// Message shown by the display whose group has id `group`, if in error.
pub fn error_at(doc: &Document, group: &str, message: &str) -> Option<String> {
    let group = doc.node(node(doc, group))?;
    if !group.has_class("error") {
        return None;
    }
    Some(doc.node(node(doc, message))?.text().to_string())
}

pub fn field_error(doc: &Document, name: &str) -> Option<String> {
    error_at(doc, &format!("{name}-group"), &format!("{name}-error"))
}
