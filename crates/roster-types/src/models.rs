use std::fmt;

use crate::code::VerificationCode;

/// A stored user. `user_id` is the primary key and never changes.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: String,
    pub password: String,
    pub is_verified: VerificationCode,
}

// Keeps the password out of logs.
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .field("is_verified", &self.is_verified)
            .finish()
    }
}
