//! Room code generation and parsing.
//!
//! Room codes are 6-character, human-shareable strings drawn from an alphabet
//! without the easily confused glyphs `I`, `O`, `0` and `1`.

use std::fmt;

use lazy_regex::regex_is_match;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::rules::ROOM_CODE_LEN;
use crate::errors::domain::{DomainError, ValidationKind};

pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789"; // no I, O, 0, 1

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Parse user input: surrounding whitespace is ignored and lowercase is
    /// accepted.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let code = raw.trim().to_ascii_uppercase();
        if !regex_is_match!(r"^[A-HJ-NP-Z2-9]{6}$", &code) {
            return Err(DomainError::validation(
                ValidationKind::InvalidRoomCode,
                format!("'{raw}' is not a valid room code"),
            ));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoomCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

/// Generate a room code with the thread-local RNG.
///
/// Uniqueness is not checked here; the session registry reserves codes and
/// asks for another on collision.
pub fn generate_room_code() -> RoomCode {
    generate_room_code_with(&mut rand::rng())
}

pub fn generate_room_code_with<R: Rng + ?Sized>(rng: &mut R) -> RoomCode {
    let code: String = (0..ROOM_CODE_LEN)
        .map(|_| ROOM_CODE_ALPHABET[rng.random_range(0..ROOM_CODE_ALPHABET.len())] as char)
        .collect();
    RoomCode(code)
}
