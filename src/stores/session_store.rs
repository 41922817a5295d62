use crate::models::session::Session;
use crate::models::user::UserRecord;
use crate::utils::time::{current_timestamp, is_expired};
use dashmap::DashMap;
use rand::RngCore;

const TOKEN_BYTES: usize = 32;

/// In-memory registry of logged-in sessions, keyed by bearer token
///
/// A session lives for `ttl_secs` after login. Expired sessions are dropped
/// when looked up and by `cleanup_expired`.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl_secs: i64,
}

impl SessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Start a session for a user who has just authenticated
    pub fn create(&self, user: &UserRecord) -> Session {
        self.create_at(user, current_timestamp())
    }

    pub(crate) fn create_at(&self, user: &UserRecord, now: i64) -> Session {
        let session = Session::new(generate_token(), user, now);
        self.sessions.insert(session.token.clone(), session.clone());
        session
    }

    /// Look up a live session by token
    /// Returns a clone of the session if found and not expired
    pub fn get(&self, token: &str) -> Option<Session> {
        self.get_at(token, current_timestamp())
    }

    pub(crate) fn get_at(&self, token: &str, now: i64) -> Option<Session> {
        let session = self.sessions.get(token).map(|entry| entry.value().clone())?;

        if is_expired(session.created_at, self.ttl_secs, now) {
            self.sessions
                .remove_if(token, |_, s| is_expired(s.created_at, self.ttl_secs, now));
            return None;
        }

        Some(session)
    }

    /// End a session. Returns the removed session if it existed.
    pub fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.remove(token).map(|(_, session)| session)
    }

    /// Drop every expired session, returning how many were removed
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_at(current_timestamp())
    }

    pub(crate) fn cleanup_expired_at(&self, now: i64) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !is_expired(session.created_at, self.ttl_secs, now));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
