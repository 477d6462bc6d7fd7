//! In-memory cookie storage.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// A single cookie. `value` is stored decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
    pub secure: bool,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
            secure: false,
        }
    }

    pub fn expires(mut self, at: DateTime<Utc>) -> Self {
        self.expires = Some(at);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }

    /// Render as a `Set-Cookie` style string scoped to the whole site.
    pub fn to_header(&self) -> String {
        let mut header = format!("{}={}; path=/", self.name, urlencoding::encode(&self.value));
        if let Some(at) = self.expires {
            header.push_str(&format!("; expires={}", at.format("%a, %d %b %Y %H:%M:%S GMT")));
        }
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

/// Cookies visible to the page, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, Cookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cookie` request header (`a=1; b=2`). Pairs without `=` are
    /// ignored; values that fail to decode are kept as sent.
    pub fn parse(header: &str) -> Self {
        let mut jar = Self::new();
        for pair in header.split(';') {
            let Some((name, value)) = pair.trim_start().split_once('=') else {
                continue;
            };
            let value = urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string());
            jar.cookies.insert(name.to_string(), Cookie::new(name, value));
        }
        jar
    }

    /// Current value of a cookie, unless it has expired.
    pub fn get(&self, name: &str, now: DateTime<Utc>) -> Option<&str> {
        self.cookies
            .get(name)
            .filter(|cookie| !cookie.is_expired(now))
            .map(|cookie| cookie.value.as_str())
    }

    pub fn cookie(&self, name: &str) -> Option<&Cookie> {
        self.cookies.get(name)
    }

    /// Store a cookie. A cookie that is already expired deletes any cookie
    /// with the same name instead.
    pub fn insert(&mut self, cookie: Cookie, now: DateTime<Utc>) {
        if cookie.is_expired(now) {
            self.cookies.remove(&cookie.name);
        } else {
            self.cookies.insert(cookie.name.clone(), cookie);
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.cookies.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Render as a `Cookie` request header.
    pub fn to_header(&self) -> String {
        self.cookies
            .values()
            .map(|c| format!("{}={}", c.name, urlencoding::encode(&c.value)))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
