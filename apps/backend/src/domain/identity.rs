//! Player identity: an authenticated user or a named guest, never both.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{DomainError, ValidationKind};

pub const GUEST_NAME_MAX_CHARS: usize = 32;

/// Reference to an authenticated user owned by the auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRef(pub i64);

/// Normalized guest display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GuestName(String);

impl GuestName {
    /// Trim, NFKC-normalize and length-check a guest display name.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized: String = raw.trim().nfkc().collect();
        let len = normalized.chars().count();
        if len == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidDisplayName,
                "Display name must not be empty",
            ));
        }
        if len > GUEST_NAME_MAX_CHARS {
            return Err(DomainError::validation(
                ValidationKind::InvalidDisplayName,
                format!("Display name must be at most {GUEST_NAME_MAX_CHARS} characters"),
            ));
        }
        if normalized.chars().any(char::is_control) {
            return Err(DomainError::validation(
                ValidationKind::InvalidDisplayName,
                "Display name must not contain control characters",
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GuestName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<GuestName> for String {
    fn from(name: GuestName) -> Self {
        name.0
    }
}

/// Who occupies a seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PlayerIdentity {
    Authenticated(UserRef),
    Guest(GuestName),
}

impl PlayerIdentity {
    pub fn user(id: i64) -> Self {
        Self::Authenticated(UserRef(id))
    }

    pub fn guest(name: &str) -> Result<Self, DomainError> {
        GuestName::parse(name).map(Self::Guest)
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest(_))
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerIdentity::Authenticated(UserRef(id)) => write!(f, "user:{id}"),
            PlayerIdentity::Guest(name) => write!(f, "guest:{}", name.as_str()),
        }
    }
}
