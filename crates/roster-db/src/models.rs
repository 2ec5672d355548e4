use roster_types::code::{CodeEnum, CodecError, VerificationCode};
use roster_types::models::UserRecord;

/// A `users` row as stored, with the verification flag still in token form.
pub struct UserRow {
    pub user_id: String,
    pub password: String,
    pub is_verified: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = CodecError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            is_verified: VerificationCode::decode(&row.is_verified)?,
            user_id: row.user_id,
            password: row.password,
        })
    }
}

impl From<&UserRecord> for UserRow {
    fn from(record: &UserRecord) -> Self {
        Self {
            user_id: record.user_id.clone(),
            password: record.password.clone(),
            is_verified: record.is_verified.code().to_string(),
        }
    }
}
