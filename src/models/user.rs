/// One line of the credential file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique key within the store
    pub username: String,
    /// Stored as written; compared verbatim on login
    pub password: String,
    pub language: String,
    pub singer: String,
}

/// A user's stored (language, singer) pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub language: String,
    pub singer: String,
}

impl UserRecord {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        language: impl Into<String>,
        singer: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            language: language.into(),
            singer: singer.into(),
        }
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            language: self.language.clone(),
            singer: self.singer.clone(),
        }
    }
}
