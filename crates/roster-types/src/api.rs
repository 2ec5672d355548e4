use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::code::VerificationCode;
use crate::models::UserRecord;
use crate::validation::{AllowList, LengthBounds, Violation};

pub const USER_ID_LENGTH: LengthBounds = LengthBounds::new(4, 30);
pub const PASSWORD_LENGTH: LengthBounds = LengthBounds::new(8, 50);
pub const INVALID_CODE: &str = "Invalid Code";

static VERIFIED: LazyLock<AllowList<VerificationCode>> =
    LazyLock::new(|| AllowList::of_names(&["TRUE", "FALSE"], INVALID_CODE));

/// Symbols accepted for `isVerified`, built once.
pub fn verified_allow_list() -> &'static AllowList<VerificationCode> {
    &VERIFIED
}

// -- Users --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub is_verified: Option<VerificationCode>,
}

impl UserRequest {
    /// Checks every field and returns one violation per failing field.
    pub fn validate(&self) -> Result<(), Vec<Violation>> {
        let violations: Vec<Violation> = [
            USER_ID_LENGTH.check("userId", &self.user_id),
            PASSWORD_LENGTH.check("password", &self.password),
            verified_allow_list().check("isVerified", self.is_verified),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    pub fn into_record(self) -> Result<UserRecord, Vec<Violation>> {
        self.validate()?;
        match self.is_verified {
            Some(is_verified) => Ok(UserRecord {
                user_id: self.user_id,
                password: self.password,
                is_verified,
            }),
            None => Err(vec![Violation::new("isVerified", INVALID_CODE)]),
        }
    }
}

/// Outward projection of a user. Has no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub user_id: String,
    pub is_verified: VerificationCode,
}

impl From<UserRecord> for UserView {
    fn from(record: UserRecord) -> Self {
        Self {
            user_id: record.user_id,
            is_verified: record.is_verified,
        }
    }
}
