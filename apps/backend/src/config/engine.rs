use std::env;
use std::str::FromStr;

use crate::domain::rules::{hand_size_range, DEFAULT_DRAW_RESERVE_PER_SEAT, DEFAULT_HAND_SIZE};
use crate::error::AppError;

const DEFAULT_ROOM_CODE_ATTEMPTS: u32 = 32;

/// Engine-wide knobs applied to every session the service creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Cards dealt to each seat on join.
    pub hand_size: u8,
    /// Extra cards per seat requested from the catalog for replenishment.
    pub draw_reserve_per_seat: u8,
    /// Room code generations tried before giving up on a collision streak.
    pub room_code_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            draw_reserve_per_seat: DEFAULT_DRAW_RESERVE_PER_SEAT,
            room_code_attempts: DEFAULT_ROOM_CODE_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `TIMELINE_HAND_SIZE`, `TIMELINE_DRAW_RESERVE`
    /// and `TIMELINE_ROOM_CODE_ATTEMPTS` when set.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            hand_size: var_or("TIMELINE_HAND_SIZE", defaults.hand_size)?,
            draw_reserve_per_seat: var_or(
                "TIMELINE_DRAW_RESERVE",
                defaults.draw_reserve_per_seat,
            )?,
            room_code_attempts: var_or("TIMELINE_ROOM_CODE_ATTEMPTS", defaults.room_code_attempts)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !hand_size_range().contains(&self.hand_size) {
            return Err(AppError::config(format!(
                "hand size must be within {}..={}, got {}",
                hand_size_range().start(),
                hand_size_range().end(),
                self.hand_size
            )));
        }
        if self.room_code_attempts == 0 {
            return Err(AppError::config("room code attempts must be at least 1"));
        }
        Ok(())
    }
}

fn var_or<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AppError::config(format!("{name} must be a non-negative integer, got '{raw}'"))
        }),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(e.into()),
    }
}
