// Unit tests for error mapping - pure domain logic without transport dependencies
use crate::catalog::CatalogError;
use crate::domain::cards::CardId;
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_turn_violations() {
    let de = DomainError::validation(ValidationKind::NotThisPlayersTurn, "seat 2 acted");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::NotThisPlayersTurn);
    assert!(matches!(app, AppError::Validation { .. }));

    let de = DomainError::validation(ValidationKind::PlayerNotActive, "left");
    let app: AppError = de.into();
    assert_eq!(app.code().as_str(), "PLAYER_NOT_ACTIVE");
}

#[test]
fn maps_generic_validation_fallback() {
    let de = DomainError::validation_other("Invariant violated: something");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.detail(), "Invariant violated: something");
}

#[test]
fn maps_conflicts() {
    let full = DomainError::conflict(ConflictKind::SessionFull, "4/4 seats taken");
    let app: AppError = full.into();
    assert_eq!(app.code().as_str(), "SESSION_FULL");
    assert!(matches!(app, AppError::Conflict { .. }));

    let other = DomainError::conflict(ConflictKind::Other("x".to_string()), "generic");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::Conflict);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::RoomCode, "ABC234");
    let app: AppError = nf.into();
    assert_eq!(app.code(), ErrorCode::RoomCodeNotFound);

    let nf = DomainError::not_found(NotFoundKind::Player, "no seat");
    let app: AppError = nf.into();
    assert_eq!(app.code(), ErrorCode::PlayerNotFound);
}

#[test]
fn maps_infra() {
    let res = DomainError::infra(InfraErrorKind::CardResolutionFailed, "c9");
    let app: AppError = res.into();
    assert_eq!(app.code(), ErrorCode::CardResolutionFailed);
    assert!(matches!(app, AppError::Upstream { .. }));

    let short = DomainError::infra(InfraErrorKind::InsufficientCards, "need 8, got 3");
    let app: AppError = short.into();
    assert_eq!(app.code(), ErrorCode::InsufficientCards);

    let corrupt = DomainError::infra(InfraErrorKind::DataCorruption, "gap at 2");
    let app: AppError = corrupt.into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert!(matches!(app, AppError::Internal { .. }));
}

#[test]
fn maps_catalog_errors() {
    let app: AppError = CatalogError::UnknownCard(CardId::from("missing")).into();
    assert_eq!(app.code(), ErrorCode::CardResolutionFailed);
    assert!(app.detail().contains("missing"));

    let app: AppError = CatalogError::Unavailable("timeout".into()).into();
    assert_eq!(app.code(), ErrorCode::CatalogUnavailable);
}

#[test]
fn config_errors_use_config_code() {
    let app = AppError::config("TIMELINE_HAND_SIZE must be a number");
    assert_eq!(app.code(), ErrorCode::ConfigError);
    assert_eq!(
        app.to_string(),
        "Configuration error: TIMELINE_HAND_SIZE must be a number"
    );
}
