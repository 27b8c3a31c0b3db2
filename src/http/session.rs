//! In-memory session storage.
//!
//! # Responsibilities
//! - Store per-session key/value pairs across requests
//! - Bind a request to its session through the session cookie
//! - Mint a session only when something is written
//! - Expire sessions idle for longer than the configured TTL
//!
//! # Design Decisions
//! - `DashMap` shards the store; concurrent requests of one session race and
//!   the last write wins
//! - Unknown session ids from the client are never adopted
//! - Expired entries are invisible immediately and removed by the sweeper

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio::time;
use uuid::Uuid;

use crate::http::cookies::{CookieJar, PendingCookie};
use crate::locale::PersistedLocaleState;

#[derive(Debug)]
struct Session {
    values: HashMap<String, String>,
    last_seen: Instant,
}

impl Session {
    fn new(now: Instant) -> Self {
        Self {
            values: HashMap::new(),
            last_seen: now,
        }
    }
}

/// Process-wide session store.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    /// Sessions idle for longer than `ttl` are expired.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    fn is_live(&self, session: &Session, now: Instant) -> bool {
        now.saturating_duration_since(session.last_seen) <= self.ttl
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions
            .get(session_id)
            .is_some_and(|s| self.is_live(&s, Instant::now()))
    }

    /// Read a value and refresh the session's idle timer.
    pub fn get(&self, session_id: &str, key: &str) -> Option<String> {
        let now = Instant::now();
        let mut session = self.sessions.get_mut(session_id)?;
        if !self.is_live(&session, now) {
            return None;
        }
        session.last_seen = now;
        session.values.get(key).cloned()
    }

    pub fn set(&self, session_id: &str, key: &str, value: &str) {
        let now = Instant::now();
        let mut session = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(now));
        if !self.is_live(&session, now) {
            session.values.clear();
        }
        session.last_seen = now;
        session.values.insert(key.to_string(), value.to_string());
    }

    /// Number of stored sessions, expired ones included until swept.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every session idle at `now`; returns how many were removed.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| self.is_live(session, now));
        before.saturating_sub(self.sessions.len())
    }
}

/// Background task removing expired sessions.
pub struct SessionSweeper {
    store: Arc<SessionStore>,
    interval: Duration,
}

impl SessionSweeper {
    pub fn new(store: Arc<SessionStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            ttl_secs = self.store.ttl.as_secs(),
            "Session sweeper starting"
        );

        let mut ticker = time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = self.store.purge_expired(Instant::now());
                    if removed > 0 {
                        tracing::debug!(removed, remaining = self.store.len(), "Expired sessions removed");
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Session sweeper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

/// One request's view of its session.
pub struct SessionHandle<'a> {
    store: &'a SessionStore,
    jar: &'a CookieJar,
    cookie_name: &'a str,
    minted: OnceLock<String>,
}

impl<'a> SessionHandle<'a> {
    pub fn new(store: &'a SessionStore, jar: &'a CookieJar, cookie_name: &'a str) -> Self {
        Self {
            store,
            jar,
            cookie_name,
            minted: OnceLock::new(),
        }
    }

    fn existing_id(&self) -> Option<&str> {
        if let Some(id) = self.minted.get() {
            return Some(id.as_str());
        }
        self.jar
            .incoming(self.cookie_name)
            .filter(|id| self.store.contains(id))
    }

    fn id_for_write(&self) -> &str {
        if let Some(id) = self.existing_id() {
            return id;
        }
        self.minted.get_or_init(|| {
            let id = Uuid::new_v4().to_string();
            self.jar.queue(PendingCookie {
                name: self.cookie_name.to_string(),
                value: id.clone(),
                max_age: None,
            });
            tracing::debug!(session_id = %id, "Session created");
            id
        })
    }
}

impl PersistedLocaleState for SessionHandle<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.store.get(self.existing_id()?, key)
    }

    fn set(&self, key: &str, locale: &str) {
        let id = self.id_for_write();
        self.store.set(id, key, locale);
    }
}
