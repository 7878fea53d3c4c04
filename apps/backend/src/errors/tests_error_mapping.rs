// Unit tests for error mapping - pure domain logic without HTTP plumbing
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_kinds_to_400() {
    let cases = [
        (ValidationKind::InvalidEmail, "INVALID_EMAIL"),
        (ValidationKind::InvalidPassword, "INVALID_PASSWORD"),
        (ValidationKind::Other, "VALIDATION_ERROR"),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "bad field").into();
        assert_eq!(app.code().as_str(), code);
        assert_eq!(app.status().as_u16(), 400);
        assert_eq!(app.detail(), "bad field");
    }
}

#[test]
fn maps_conflicts() {
    let unique = DomainError::conflict(ConflictKind::UniqueEmail, "email exists");
    let app: AppError = unique.into();
    assert_eq!(app.code().as_str(), "UNIQUE_EMAIL");
    assert_eq!(app.status().as_u16(), 409);

    let header = DomainError::conflict(ConflictKind::NoteHeader, "header taken");
    let app: AppError = header.into();
    assert_eq!(app.code(), ErrorCode::NoteHeaderConflict);
    assert_eq!(app.status().as_u16(), 409);

    // Generic conflict fallback
    let other = DomainError::conflict(
        ConflictKind::Other("some conflict".to_string()),
        "generic conflict",
    );
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::User, "no user").into();
    assert_eq!(app.code().as_str(), "USER_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::not_found(NotFoundKind::Note, "no note").into();
    assert_eq!(app.code().as_str(), "NOTE_NOT_FOUND");
}

#[test]
fn maps_forbidden() {
    let app: AppError = DomainError::forbidden(ForbiddenKind::NoteAccess, "not yours").into();
    assert_eq!(app.code().as_str(), "NOTE_ACCESS_DENIED");
    assert_eq!(app.status().as_u16(), 403);

    let app: AppError = DomainError::forbidden(ForbiddenKind::Other, "nope").into();
    assert_eq!(app.code(), ErrorCode::Forbidden);
}

#[test]
fn maps_infra_to_internal() {
    let hash = DomainError::infra(InfraErrorKind::PasswordHash, "salt");
    let app: AppError = hash.into();
    assert_eq!(app.code().as_str(), "INTERNAL");
    assert_eq!(app.status().as_u16(), 500);
    assert!(matches!(app, AppError::Internal { .. }));

    let other = DomainError::infra(InfraErrorKind::Other("unknown".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn constructor_helpers() {
    let validation = DomainError::validation(ValidationKind::Other, "invalid input");
    assert!(matches!(validation, DomainError::Validation(_, _)));

    let conflict = DomainError::conflict(ConflictKind::UniqueEmail, "taken");
    assert!(matches!(
        conflict,
        DomainError::Conflict(ConflictKind::UniqueEmail, _)
    ));

    let not_found = DomainError::not_found(NotFoundKind::User, "user missing");
    assert!(matches!(
        not_found,
        DomainError::NotFound(NotFoundKind::User, _)
    ));

    let infra = DomainError::infra(InfraErrorKind::PasswordHash, "boom");
    assert!(matches!(
        infra,
        DomainError::Infra(InfraErrorKind::PasswordHash, _)
    ));
}
