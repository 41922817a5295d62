use crate::core::error::ValidationError;
use crate::models::api::RegisterRequest;
use crate::models::user::UserRecord;

/// Upper bound for any single registration field
pub const MAX_FIELD_LEN: usize = 128;

/// Characters that would break the one-record-per-line, comma-separated format
const FORBIDDEN: &[char] = &[',', '\n', '\r'];

/// Check that a value can be written as one field of a credential record
pub fn check_record_field(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains(FORBIDDEN) {
        return Err(ValidationError::ForbiddenCharacter(field));
    }

    Ok(())
}

fn check_length(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field,
            len,
            max: MAX_FIELD_LEN,
        });
    }

    Ok(())
}

impl RegisterRequest {
    /// Turn a registration form into a storable record.
    ///
    /// Username, language and singer are trimmed; the password is kept verbatim.
    pub fn validate(self) -> Result<UserRecord, ValidationError> {
        let username = self.username.trim();
        let language = self.language.trim();
        let singer = self.singer.trim();

        if username.is_empty() {
            return Err(ValidationError::Empty("username"));
        }

        for (field, value) in [
            ("username", username),
            ("password", self.password.as_str()),
            ("language", language),
            ("singer", singer),
        ] {
            check_record_field(field, value)?;
            check_length(field, value)?;
        }

        Ok(UserRecord::new(username, self.password.as_str(), language, singer))
    }
}
