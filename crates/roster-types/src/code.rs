use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted token did not match any declared symbol.
///
/// Only raised when reading stored data, so it points at corruption or
/// schema drift rather than bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Unsupported type for {token}.")]
    Unsupported { token: String },
}

/// A closed set of symbols, each stored as a short text token.
///
/// Implementors list every symbol in `ALL`; decoding and allow-list
/// validation are derived from that list.
pub trait CodeEnum: Copy + Eq + Sized + 'static {
    const ALL: &'static [Self];

    /// Token written to storage.
    fn code(self) -> &'static str;

    /// Symbol name as it appears on the wire.
    fn name(self) -> &'static str;

    fn decode(token: &str) -> Result<Self, CodecError> {
        Self::ALL
            .iter()
            .copied()
            .find(|symbol| symbol.code() == token)
            .ok_or_else(|| CodecError::Unsupported {
                token: token.to_string(),
            })
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|symbol| symbol.name() == name)
    }
}

/// Verification flag of a user record, persisted as a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationCode {
    #[serde(rename = "TRUE")]
    True,
    #[serde(rename = "FALSE")]
    False,
    #[serde(rename = "NULL")]
    Null,
}

impl CodeEnum for VerificationCode {
    const ALL: &'static [Self] = &[Self::True, Self::False, Self::Null];

    fn code(self) -> &'static str {
        match self {
            Self::True => "T",
            Self::False => "F",
            Self::Null => "N",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Null => "NULL",
        }
    }
}
