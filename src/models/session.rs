use crate::models::user::{Preferences, UserRecord};

/// An authenticated session, created on login and discarded on logout or expiry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Hex-encoded bearer token
    pub token: String,
    pub username: String,
    pub preferences: Preferences,
    /// Unix timestamp (seconds) of the login
    pub created_at: i64,
}

impl Session {
    pub fn new(token: String, user: &UserRecord, created_at: i64) -> Self {
        Self {
            token,
            username: user.username.clone(),
            preferences: user.preferences(),
            created_at,
        }
    }
}
