//! Gradual disclosure: follow-up panels that appear for "yes" answers, and
//! the header navigation toggle.

use formdom::{Document, EventKind, NodeId};

/// Radio value that reveals a panel.
pub const YES: &str = "yes";
/// Answer assumed when no radio in the group is checked.
pub const NO: &str = "no";

pub const HEADER_TOGGLE_CLASS: &str = "js-header-toggle";
pub const VISIBLE_CLASS: &str = "js-visible";
pub const HIDDEN_CLASS: &str = "js-hidden";

/// A panel shown only while a yes/no radio group is answered "yes".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureRule {
    pub panel_id: String,
    pub radio_name: String,
}

impl DisclosureRule {
    pub fn new(panel_id: impl Into<String>, radio_name: impl Into<String>) -> Self {
        Self {
            panel_id: panel_id.into(),
            radio_name: radio_name.into(),
        }
    }
}

/// Panels on the payment practices report.
pub fn default_rules() -> Vec<DisclosureRule> {
    vec![
        DisclosureRule::new("show-if-payment-codes-short", "paymentCodes.yesNo"),
        DisclosureRule::new(
            "show-if-payment-codes-long",
            "otherInformation.paymentCodes.yesNo",
        ),
        DisclosureRule::new(
            "show-if-payment-changes",
            "paymentTerms.paymentTermsChanged.changed.yesNo",
        ),
        DisclosureRule::new(
            "show-if-payment-changes-notified",
            "paymentTerms.paymentTermsChanged.notified.yesNo",
        ),
    ]
}

/// The checked value of a radio group. If several are checked the last one
/// wins; if none is, the answer is [`NO`].
pub fn answer<'a>(doc: &'a Document, radio_name: &str) -> &'a str {
    doc.get_elements_by_name(radio_name)
        .into_iter()
        .rev()
        .filter_map(|n| doc.node(n))
        .find(|n| n.checked())
        .map_or(NO, |n| n.value())
}

/// Show `panel` iff the group is answered "yes".
pub fn show_panel_if_yes(doc: &mut Document, panel: NodeId, radio_name: &str) {
    let visible = answer(doc, radio_name) == YES;
    doc.set_hidden(panel, !visible);
}

/// Apply each rule now and again whenever one of its radios is clicked.
/// Rules whose panel is not on the page are skipped. Returns the number of
/// panels wired.
pub fn bind_disclosure(doc: &mut Document, rules: &[DisclosureRule]) -> usize {
    let mut bound = 0;

    for rule in rules {
        let Some(panel) = doc.get_element_by_id(&rule.panel_id) else {
            log::debug!("[disclosure] panel '{}' not on page", rule.panel_id);
            continue;
        };

        show_panel_if_yes(doc, panel, &rule.radio_name);

        for radio in doc.get_elements_by_name(&rule.radio_name) {
            let radio_name = rule.radio_name.clone();
            doc.add_listener(radio, EventKind::Click, move |doc, _| {
                show_panel_if_yes(doc, panel, &radio_name);
            });
        }
        bound += 1;
    }

    bound
}

/// Wire every `js-header-toggle` link. Clicking one toggles `js-visible` on
/// the element its `href` fragment names and `js-hidden` on the link.
/// Returns the number of toggles wired.
pub fn bind_header_toggles(doc: &mut Document) -> usize {
    let mut bound = 0;

    for toggle in doc.get_elements_by_class(HEADER_TOGGLE_CLASS) {
        let target = doc
            .node(toggle)
            .and_then(|n| n.attr("href"))
            .and_then(|href| href.strip_prefix('#'))
            .and_then(|id| doc.get_element_by_id(id));
        let Some(target) = target else {
            log::debug!("[header_toggle] toggle {} has no target", toggle);
            continue;
        };

        doc.add_listener(toggle, EventKind::Click, move |doc, event| {
            doc.toggle_class(target, VISIBLE_CLASS);
            doc.toggle_class(event.target, HIDDEN_CLASS);
        });
        bound += 1;
    }

    bound
}
