use crate::shop::{Cart, UserId};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

/// Per-visitor state kept on the server, keyed by the session cookie.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    pub cart: Cart,
    pub user_id: Option<UserId>,
    pub flashes: Vec<String>,
}

#[derive(Debug)]
struct Entry {
    data: SessionData,
    last_seen: Instant,
}

/// Server-side sessions.
///
/// An entry is only stored once a request writes to it, so visitors that
/// never send their cookie back leave nothing behind. Entries idle for longer
/// than the TTL are dropped by [`SessionStore::purge_expired`] and read as
/// empty until then.
pub struct SessionStore {
    cookie_name: String,
    ttl: Duration,
    sessions: DashMap<Uuid, Entry>,
}

impl SessionStore {
    pub fn new(cookie_name: impl Into<String>, ttl: Duration) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            ttl,
            sessions: DashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Finds the visitor's session id, issuing a new cookie when there is
    /// none or it does not parse.
    pub fn resolve(&self, jar: CookieJar) -> (Uuid, CookieJar) {
        let existing = jar
            .get(&self.cookie_name)
            .and_then(|c| Uuid::parse_str(c.value()).ok());
        match existing {
            Some(id) => (id, jar),
            None => {
                let id = Uuid::new_v4();
                let cookie = Cookie::build((self.cookie_name.clone(), id.to_string()))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax);
                (id, jar.add(cookie))
            }
        }
    }

    /// Runs `f` against the session, storing it if needed. An expired
    /// session starts over empty.
    pub fn with<R>(&self, id: Uuid, f: impl FnOnce(&mut SessionData) -> R) -> R {
        let now = Instant::now();
        let mut entry = self.sessions.entry(id).or_insert_with(|| Entry {
            data: SessionData::default(),
            last_seen: now,
        });
        if self.is_expired(&entry, now) {
            debug!(session = %id, "session expired, starting over");
            entry.data = SessionData::default();
        }
        entry.last_seen = now;
        f(&mut entry.data)
    }

    /// Runs `f` against the session without storing anything. Missing and
    /// expired sessions read as empty.
    pub fn read<R>(&self, id: Uuid, f: impl FnOnce(&SessionData) -> R) -> R {
        match self.sessions.get(&id) {
            Some(entry) if !self.is_expired(&entry, Instant::now()) => f(&entry.data),
            _ => f(&SessionData::default()),
        }
    }

    pub fn flash(&self, id: Uuid, message: impl Into<String>) {
        let message = message.into();
        self.with(id, |s| s.flashes.push(message));
    }

    /// Returns the pending flash messages and forgets them.
    pub fn take_flashes(&self, id: Uuid) -> Vec<String> {
        let now = Instant::now();
        match self.sessions.get_mut(&id) {
            Some(mut entry) if !self.is_expired(&entry, now) => std::mem::take(&mut entry.data.flashes),
            _ => Vec::new(),
        }
    }

    /// Drops every session idle for longer than the TTL.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// Drops every session that is past its TTL at `now`.
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| !self.is_expired(entry, now));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_seen) > self.ttl
    }
}

/// Purges expired sessions every `interval` until the task is dropped.
pub async fn reap_expired_sessions(store: Arc<SessionStore>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let removed = store.purge_expired();
        if removed > 0 {
            info!(removed, remaining = store.len(), "purged expired sessions");
        }
    }
}
