//! Collaborator interfaces consumed by the resolver.
//!
//! The core never owns storage: sessions and cookies belong to the HTTP
//! adapter (see `http::session` and `http::cookies`). The in-memory
//! implementations here back the CLI and unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Session key and cookie name under which the chosen locale is stored.
pub const LANGUAGE_KEY: &str = "__language";

/// Session-like store: written during one request, read by later ones.
pub trait PersistedLocaleState {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, locale: &str);
}

/// Request cookies plus a sink for cookies to send back.
pub trait CookieStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str, lifetime: Duration);
}

/// The per-request signals a resolution may consult.
pub struct LocaleSignals<'a> {
    pub persisted: &'a dyn PersistedLocaleState,
    pub cookies: &'a dyn CookieStore,
    /// Requested locale codes, most preferred first.
    pub preferred: &'a [String],
}

/// Map-backed persisted state.
#[derive(Debug, Default)]
pub struct MemoryState {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, locale: &str) -> Self {
        let state = Self::new();
        state
            .values
            .lock()
            .expect("memory state mutex poisoned")
            .insert(key.to_string(), locale.to_string());
        state
    }

    /// Number of `set` calls observed.
    pub fn writes(&self) -> usize {
        *self.writes.lock().expect("memory state mutex poisoned")
    }
}

impl PersistedLocaleState for MemoryState {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("memory state mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, locale: &str) {
        self.values
            .lock()
            .expect("memory state mutex poisoned")
            .insert(key.to_string(), locale.to_string());
        *self.writes.lock().expect("memory state mutex poisoned") += 1;
    }
}

/// A cookie queued for the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieWrite {
    pub name: String,
    pub value: String,
    pub lifetime: Duration,
}

/// Map-backed cookie store that records writes.
#[derive(Debug, Default)]
pub struct MemoryCookies {
    incoming: HashMap<String, String>,
    written: Mutex<Vec<CookieWrite>>,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookie(name: &str, value: &str) -> Self {
        let mut cookies = Self::new();
        cookies.incoming.insert(name.to_string(), value.to_string());
        cookies
    }

    pub fn written(&self) -> Vec<CookieWrite> {
        self.written
            .lock()
            .expect("memory cookie mutex poisoned")
            .clone()
    }
}

impl CookieStore for MemoryCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.incoming.get(name).cloned()
    }

    fn set(&self, name: &str, value: &str, lifetime: Duration) {
        self.written
            .lock()
            .expect("memory cookie mutex poisoned")
            .push(CookieWrite {
                name: name.to_string(),
                value: value.to_string(),
                lifetime,
            });
    }
}
