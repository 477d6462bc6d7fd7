//! Tests for yes/no panels and the header toggle.

mod common;

use common::*;
use formdom::{Document, Element};
use payform::disclosure::{
    DisclosureRule, HIDDEN_CLASS, NO, VISIBLE_CLASS, answer, bind_disclosure,
    bind_header_toggles, default_rules,
};

fn hidden(doc: &Document, id: &str) -> bool {
    doc.node(node(doc, id)).unwrap().hidden()
}

#[test]
fn test_answer_defaults_to_no() {
    let doc = report_page();
    assert_eq!(answer(&doc, "paymentCodes.yesNo"), NO);
    assert_eq!(answer(&doc, "not.on.page"), NO);
}

#[test]
fn test_panels_hidden_until_yes() {
    let mut doc = report_page();
    let bound = bind_disclosure(&mut doc, &default_rules());

    // Only two of the four panels exist on this page.
    assert_eq!(bound, 2);
    assert!(hidden(&doc, "show-if-payment-codes-short"));
    assert!(hidden(&doc, "show-if-payment-changes"));

    let yes = node(&doc, "paymentCodes.yesNo-yes");
    doc.click(yes);
    assert!(!hidden(&doc, "show-if-payment-codes-short"));
    assert!(hidden(&doc, "show-if-payment-changes"));

    let no = node(&doc, "paymentCodes.yesNo-no");
    doc.click(no);
    assert!(hidden(&doc, "show-if-payment-codes-short"));
}

#[test]
fn test_panel_reflects_prechecked_answer() {
    let mut doc = Document::new(
        Element::div()
            .child(Element::radio("q", "yes").checked(true))
            .child(Element::radio("q", "no"))
            .child(Element::div().id("panel")),
    );
    bind_disclosure(&mut doc, &[DisclosureRule::new("panel", "q")]);
    assert!(!hidden(&doc, "panel"));
}

#[test]
fn test_header_toggle() {
    let mut doc = Document::new(
        Element::div()
            .child(
                Element::link("#navigation")
                    .id("toggle")
                    .class("js-header-toggle"),
            )
            .child(Element::new("nav").id("navigation"))
            .child(Element::link("#nowhere").class("js-header-toggle")),
    );
    assert_eq!(bind_header_toggles(&mut doc), 1);

    let toggle = node(&doc, "toggle");
    doc.click(toggle);
    let nav = doc.node(node(&doc, "navigation")).unwrap();
    assert!(nav.has_class(VISIBLE_CLASS));
    assert!(doc.node(toggle).unwrap().has_class(HIDDEN_CLASS));

    doc.click(toggle);
    let nav = doc.node(node(&doc, "navigation")).unwrap();
    assert!(!nav.has_class(VISIBLE_CLASS));
    assert!(!doc.node(toggle).unwrap().has_class(HIDDEN_CLASS));
}
