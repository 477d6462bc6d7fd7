//! Cookie consent.
//!
//! The visitor's choices live in the `cookies_policy` cookie as a JSON object
//! mapping category to consent, e.g. `{"analytics":false}`. Every cookie the
//! site writes goes through [`ConsentManager::set_cookie`], which refuses
//! cookies whose category has not been consented to.

mod banner;
mod cookie;

pub use banner::{
    BANNER_CLASS, CONFIRMATION_CLASS, CONFIRMATION_MESSAGE_CLASS, PREV_PAGE_CLASS,
    SAVE_SETTINGS_CLASS, SETTINGS_CONFIRMATION_CLASS, WRAPPER_CLASS, bind_cookie_banner,
    link_previous_page, show_confirmation_message,
};
pub use cookie::{Cookie, CookieJar};

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Name of the cookie recording the visitor's choices.
pub const CONSENT_COOKIE: &str = "cookies_policy";
/// Lifetime of the consent cookie.
pub const CONSENT_COOKIE_DAYS: i64 = 365;
pub const ANALYTICS: &str = "analytics";
/// Path of the cookie settings page, where the banner is never shown.
pub const COOKIES_PAGE: &str = "/cookies";

/// Consent per cookie category.
pub type ConsentPolicy = BTreeMap<String, bool>;

/// Source of the current time for cookie expiry.
pub type UtcClock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Policy assumed before the visitor chooses: analytics off.
pub fn default_consent() -> ConsentPolicy {
    ConsentPolicy::from([(ANALYTICS.to_string(), false)])
}

/// Cookies the site may set, with their category.
pub const KNOWN_COOKIES: [(&str, &str); 2] = [("_ga", ANALYTICS), ("_gid", ANALYTICS)];

/// Category of a cookie the site knows about.
pub fn cookie_category(name: &str) -> Option<&'static str> {
    KNOWN_COOKIES
        .iter()
        .find(|(cookie, _)| *cookie == name)
        .map(|&(_, category)| category)
}

pub fn is_cookies_page(path: &str) -> bool {
    path == COOKIES_PAGE
}

/// Text confirming the visitor's analytics choice.
pub fn confirmation_message(analytics: bool) -> &'static str {
    if analytics {
        "You’ve accepted analytics cookies."
    } else {
        "You told us not to use analytics cookies."
    }
}

/// Reads and writes the visitor's cookie choices.
///
/// Cheap to clone; clones share the same cookie jar, so page listeners can
/// each hold one.
#[derive(Clone)]
pub struct ConsentManager {
    jar: Arc<RwLock<CookieJar>>,
    secure: bool,
    clock: UtcClock,
}

impl std::fmt::Debug for ConsentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsentManager")
            .field("jar", &self.jar)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl ConsentManager {
    pub fn new(jar: CookieJar) -> Self {
        Self {
            jar: Arc::new(RwLock::new(jar)),
            secure: false,
            clock: Arc::new(Utc::now),
        }
    }

    /// Mark written cookies `Secure`.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Snapshot of the jar.
    pub fn jar(&self) -> CookieJar {
        self.jar
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn cookie(&self, name: &str) -> Option<String> {
        let now = self.now();
        self.jar
            .read()
            .ok()
            .and_then(|guard| guard.get(name, now).map(str::to_string))
    }

    /// Write a cookie if consent allows it. Returns whether it was written.
    pub fn set_cookie(&self, name: &str, value: &str, days: Option<i64>) -> bool {
        if !self.check_consent_cookie(name, Some(value)) {
            log::debug!("[consent] refused cookie '{}'", name);
            return false;
        }

        let now = self.now();
        let mut cookie = Cookie::new(name, value).secure(self.secure);
        if let Some(days) = days {
            cookie = cookie.expires(now + Duration::days(days));
        }

        match self.jar.write() {
            Ok(mut guard) => {
                guard.insert(cookie, now);
                true
            }
            Err(_) => false,
        }
    }

    pub fn delete_cookie(&self, name: &str) {
        if let Ok(mut guard) = self.jar.write() {
            guard.remove(name);
        }
    }

    /// The recorded policy, or `None` if the visitor has not chosen yet or
    /// the cookie cannot be read.
    pub fn consent(&self) -> Option<ConsentPolicy> {
        let raw = self.cookie(CONSENT_COOKIE)?;

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("[consent] malformed {} cookie: {}", CONSENT_COOKIE, e);
                return None;
            }
        };

        // Older pages stored the policy JSON-encoded twice.
        let value = match value {
            Value::String(inner) => serde_json::from_str(&inner).ok()?,
            other => other,
        };

        let Value::Object(map) = value else {
            log::warn!("[consent] {} cookie is not an object", CONSENT_COOKIE);
            return None;
        };

        Some(
            map.into_iter()
                .filter_map(|(category, allowed)| allowed.as_bool().map(|b| (category, b)))
                .collect(),
        )
    }

    /// Merge `options` into the recorded policy, delete cookies of any
    /// category now refused, and rewrite the consent cookie.
    pub fn set_consent(&self, options: &ConsentPolicy) {
        let mut consent = self.consent().unwrap_or_else(default_consent);

        for (category, &allowed) in options {
            consent.insert(category.clone(), allowed);

            if !allowed {
                for (cookie, _) in KNOWN_COOKIES.iter().filter(|(_, c)| c == category) {
                    self.delete_cookie(cookie);
                }
            }
        }

        match serde_json::to_string(&consent) {
            Ok(json) => {
                self.set_cookie(CONSENT_COOKIE, &json, Some(CONSENT_COOKIE_DAYS));
            }
            Err(e) => log::warn!("[consent] could not encode policy: {}", e),
        }
    }

    /// Set the analytics choice alone.
    pub fn set_analytics(&self, allowed: bool) {
        self.set_consent(&ConsentPolicy::from([(ANALYTICS.to_string(), allowed)]));
    }

    /// Whether writing `name` with `value` is allowed. The consent cookie and
    /// deletions (`None`) always are; unknown cookies never are.
    pub fn check_consent_cookie(&self, name: &str, value: Option<&str>) -> bool {
        if name == CONSENT_COOKIE || value.is_none() {
            return true;
        }

        match cookie_category(name) {
            Some(category) => self.check_consent_category(name, category),
            None => false,
        }
    }

    /// Whether `category` is consented to. Known cookies are allowed until
    /// the visitor records a choice.
    pub fn check_consent_category(&self, name: &str, category: &str) -> bool {
        match self.consent() {
            Some(consent) => consent.get(category).copied().unwrap_or(false),
            None => cookie_category(name).is_some(),
        }
    }

    /// The banner shows until the visitor chooses, except on the cookie
    /// settings page itself.
    pub fn should_show_banner(&self, path: &str) -> bool {
        !is_cookies_page(path) && self.consent().is_none()
    }
}
