use thiserror::Error;

use crate::catalog::CatalogError;
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

/// Service-level error returned to whatever transport sits above the engine.
///
/// Every variant carries an [`ErrorCode`]; none of them is retried by the
/// engine itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Upstream error: {detail}")]
    Upstream { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
}

impl AppError {
    /// Extract the error code from any error variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Upstream { code, .. }
            | AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Extract the error detail from any error variant
    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Upstream { detail, .. }
            | AppError::Config { detail }
            | AppError::Internal { detail, .. } => detail,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn upstream(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Upstream {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidConfig => ErrorCode::InvalidConfig,
                    ValidationKind::InvalidDisplayName => ErrorCode::InvalidDisplayName,
                    ValidationKind::InvalidRoomCode => ErrorCode::InvalidRoomCode,
                    ValidationKind::InvalidPosition => ErrorCode::InvalidPosition,
                    ValidationKind::SessionNotJoinable => ErrorCode::SessionNotJoinable,
                    ValidationKind::NotEnoughPlayers => ErrorCode::NotEnoughPlayers,
                    ValidationKind::NotHost => ErrorCode::NotHost,
                    ValidationKind::NotThisPlayersTurn => ErrorCode::NotThisPlayersTurn,
                    ValidationKind::PlayerNotActive => ErrorCode::PlayerNotActive,
                    ValidationKind::CardNotInHand => ErrorCode::CardNotInHand,
                    ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                    ValidationKind::SessionClosed => ErrorCode::SessionClosed,
                    ValidationKind::Other(_) => ErrorCode::ValidationError,
                };
                AppError::Validation { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::SessionFull => ErrorCode::SessionFull,
                    ConflictKind::AlreadyJoined => ErrorCode::AlreadyJoined,
                    ConflictKind::RoomCodeExhausted => ErrorCode::RoomCodeExhausted,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Session => ErrorCode::SessionNotFound,
                    NotFoundKind::RoomCode => ErrorCode::RoomCodeNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::CardResolutionFailed => AppError::Upstream {
                    code: ErrorCode::CardResolutionFailed,
                    detail,
                },
                InfraErrorKind::InsufficientCards => AppError::Upstream {
                    code: ErrorCode::InsufficientCards,
                    detail,
                },
                InfraErrorKind::CatalogUnavailable => AppError::Upstream {
                    code: ErrorCode::CatalogUnavailable,
                    detail,
                },
                InfraErrorKind::DataCorruption => AppError::Internal {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                InfraErrorKind::Other(_) => AppError::Internal {
                    code: ErrorCode::Internal,
                    detail,
                },
            },
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownCard(_) => {
                AppError::upstream(ErrorCode::CardResolutionFailed, err.to_string())
            }
            CatalogError::Unavailable(_) => {
                AppError::upstream(ErrorCode::CatalogUnavailable, err.to_string())
            }
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
