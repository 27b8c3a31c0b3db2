//! Cookie transport.
//!
//! # Responsibilities
//! - Parse the request's `Cookie` headers
//! - Queue cookies set while handling a request
//! - Emit queued cookies as `Set-Cookie` on the response
//!
//! # Design Decisions
//! - Queued writes are flushed onto every response, redirects included
//! - Cookies are `HttpOnly; SameSite=Lax`, scoped to the application path

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};

use crate::locale::CookieStore;

/// A cookie to send back with the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCookie {
    pub name: String,
    pub value: String,
    /// `None` for a browser-session cookie.
    pub max_age: Option<Duration>,
}

/// Request cookies plus the writes made while handling the request.
#[derive(Debug, Default)]
pub struct CookieJar {
    incoming: HashMap<String, String>,
    pending: Mutex<Vec<PendingCookie>>,
    path: String,
}

impl CookieJar {
    pub fn from_headers(headers: &HeaderMap, path: &str) -> Self {
        Self {
            incoming: parse_cookies(headers),
            pending: Mutex::new(Vec::new()),
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
        }
    }

    pub fn incoming(&self, name: &str) -> Option<&str> {
        self.incoming.get(name).map(String::as_str)
    }

    /// Queue a cookie for the response.
    pub fn queue(&self, cookie: PendingCookie) {
        self.pending
            .lock()
            .expect("cookie jar mutex poisoned")
            .push(cookie);
    }

    pub fn pending(&self) -> Vec<PendingCookie> {
        self.pending
            .lock()
            .expect("cookie jar mutex poisoned")
            .clone()
    }

    /// Append a `Set-Cookie` header for every queued cookie.
    pub fn write_to(&self, headers: &mut HeaderMap) {
        for cookie in self.pending() {
            match HeaderValue::from_str(&self.set_cookie_value(&cookie)) {
                Ok(value) => {
                    headers.append(SET_COOKIE, value);
                }
                Err(e) => {
                    tracing::warn!(cookie = %cookie.name, error = %e, "Dropping unencodable cookie");
                }
            }
        }
    }

    fn set_cookie_value(&self, cookie: &PendingCookie) -> String {
        let mut value = format!("{}={}; Path={}", cookie.name, cookie.value, self.path);
        if let Some(max_age) = cookie.max_age {
            value.push_str(&format!("; Max-Age={}", max_age.as_secs()));
        }
        value.push_str("; HttpOnly; SameSite=Lax");
        value
    }
}

impl CookieStore for CookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.incoming(name).map(str::to_owned)
    }

    fn set(&self, name: &str, value: &str, lifetime: Duration) {
        self.queue(PendingCookie {
            name: name.to_string(),
            value: value.to_string(),
            max_age: Some(lifetime),
        });
    }
}

fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            Some((name.trim().to_string(), value.trim().trim_matches('"').to_string()))
        })
        .collect()
}
