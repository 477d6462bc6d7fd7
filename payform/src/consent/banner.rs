//! Cookie banner and cookie settings page wiring.

use formdom::{Document, EventKind, NodeId};

use super::{ConsentManager, confirmation_message, is_cookies_page};

pub const BANNER_CLASS: &str = "notify-cookie-banner";
pub const WRAPPER_CLASS: &str = "notify-cookie-banner__wrapper";
pub const CONFIRMATION_CLASS: &str = "notify-cookie-banner__confirmation";
pub const CONFIRMATION_MESSAGE_CLASS: &str = "notify-cookie-banner__confirmation-message";
pub const SAVE_SETTINGS_CLASS: &str = "govuk-save-cookie-settings";
pub const SETTINGS_CONFIRMATION_CLASS: &str = "cookie-settings__confirmation";
pub const PREV_PAGE_CLASS: &str = "cookie-settings__prev-page";

const ACCEPT_ATTR: &str = "data-accept-cookies";
const HIDE_ATTR: &str = "data-hide-cookie-banner";
const ANALYTICS_YES_ID: &str = "cookies-analytics-yes";
const ANALYTICS_NO_ID: &str = "cookies-analytics-no";

/// Analytics cookies removed when the visitor opts out on the settings page.
const ANALYTICS_COOKIES: [&str; 3] = ["_ga", "_gid", "_gat"];

fn first_with_class(doc: &Document, class: &str) -> Option<NodeId> {
    doc.get_elements_by_class(class).into_iter().next()
}

/// Swap the banner body for the confirmation text.
pub fn show_confirmation_message(doc: &mut Document, analytics: bool) {
    if let Some(message) = first_with_class(doc, CONFIRMATION_MESSAGE_CLASS) {
        doc.set_text(message, confirmation_message(analytics));
    }
    if let Some(wrapper) = first_with_class(doc, WRAPPER_CLASS) {
        doc.set_hidden(wrapper, true);
    }
    if let Some(confirmation) = first_with_class(doc, CONFIRMATION_CLASS) {
        doc.set_hidden(confirmation, false);
    }
}

/// Show or hide the banner for `path` and wire its buttons, plus the save
/// button of the cookie settings page when present.
///
/// Returns false when the page has no banner and no settings form.
pub fn bind_cookie_banner(doc: &mut Document, consent: &ConsentManager, path: &str) -> bool {
    let banner = first_with_class(doc, BANNER_CLASS);
    if let Some(banner) = banner {
        doc.set_hidden(banner, !consent.should_show_banner(path));
    }

    for (value, analytics) in [("true", true), ("false", false)] {
        for button in doc.get_elements_by_attr(ACCEPT_ATTR, Some(value)) {
            let consent = consent.clone();
            doc.add_listener(button, EventKind::Click, move |doc, _| {
                consent.set_analytics(analytics);
                show_confirmation_message(doc, analytics);
            });
        }
    }

    for button in doc.get_elements_by_attr(HIDE_ATTR, None) {
        doc.add_listener(button, EventKind::Click, |doc, _| {
            if let Some(confirmation) = first_with_class(doc, CONFIRMATION_CLASS) {
                doc.set_hidden(confirmation, true);
            }
        });
    }

    let save = first_with_class(doc, SAVE_SETTINGS_CLASS);
    if let Some(save) = save {
        let consent = consent.clone();
        doc.add_listener(save, EventKind::Click, move |doc, _| save_settings(doc, &consent));
    }

    banner.is_some() || save.is_some()
}

fn save_settings(doc: &mut Document, consent: &ConsentManager) {
    if let Some(confirmation) = first_with_class(doc, SETTINGS_CONFIRMATION_CLASS) {
        doc.set_hidden(confirmation, false);
    }

    let checked = |id: &str| {
        doc.get_element_by_id(id)
            .and_then(|n| doc.node(n))
            .is_some_and(|n| n.checked())
    };

    let analytics = if checked(ANALYTICS_YES_ID) {
        true
    } else if checked(ANALYTICS_NO_ID) {
        for cookie in ANALYTICS_COOKIES {
            consent.delete_cookie(cookie);
        }
        false
    } else {
        return;
    };

    consent.set_analytics(analytics);
    show_confirmation_message(doc, analytics);
}

/// Point the settings page's back link at the page the visitor came from.
/// Only applies on the cookie settings page. Returns whether a link was set.
pub fn link_previous_page(doc: &mut Document, path: &str, referrer: Option<&str>) -> bool {
    if !is_cookies_page(path) {
        return false;
    }
    let (Some(link), Some(referrer)) = (first_with_class(doc, PREV_PAGE_CLASS), referrer) else {
        return false;
    };
    doc.set_attr(link, "href", referrer);
    true
}
