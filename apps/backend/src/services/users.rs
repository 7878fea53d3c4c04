//! Account flows: signup, login and refresh-token rotation.

use serde::Serialize;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{Identity, TokenPair};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::User;
use crate::state::app_state::AppState;

pub const MIN_PASSWORD_CHARS: usize = 8;

/// Identity plus a fresh token pair, returned by every account flow.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

impl Session {
    fn new(identity: Identity, tokens: TokenPair) -> Self {
        Self {
            user_id: identity.subject_id,
            email: identity.email,
            first_name: identity.first_name,
            last_name: identity.last_name,
            tokens,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Signup {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Trim, NFKC-normalize and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

/// Structural check only: one `@`, a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::validation(ValidationKind::InvalidEmail, "Invalid email address");

    if email.is_empty() || email.len() > 254 || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidPassword,
            format!("Password must be at least {MIN_PASSWORD_CHARS} characters"),
        ));
    }
    Ok(())
}

fn clean_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

pub async fn signup(state: &AppState, input: Signup) -> Result<Session, AppError> {
    let email = normalize_email(&input.email);
    validate_email(&email)?;
    validate_password(&input.password)?;

    // Cheap pre-check; the store's insert is the authority.
    if state.users.find_by_email(&email).await?.is_some() {
        debug!(email = %Redacted(&email), "signup for existing email");
        return Err(
            DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered").into(),
        );
    }

    let password_hash = hash_password(&input.password).await?;
    let now = state.clock.now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        email,
        password_hash,
        first_name: clean_name(input.first_name),
        last_name: clean_name(input.last_name),
        refresh_token: None,
        last_login: None,
        created_at: now,
    };

    let tokens = state.issuer.issue(&user.identity())?;
    let user = state
        .users
        .insert(User {
            refresh_token: Some(tokens.refresh_token.clone()),
            last_login: Some(now),
            ..user
        })
        .await?;

    info!(user_id = %user.id, email = %Redacted(&user.email), "user signed up");
    Ok(Session::new(user.identity(), tokens))
}

pub async fn login(state: &AppState, email: &str, password: &str) -> Result<Session, AppError> {
    let email = normalize_email(email);

    let Some(user) = state.users.find_by_email(&email).await? else {
        security::login_failed("unknown_email", Some(&email));
        return Err(AppError::invalid_credentials());
    };
    if !verify_password(password, &user.password_hash).await? {
        security::login_failed("wrong_password", Some(&email));
        return Err(AppError::invalid_credentials());
    }

    let session = start_session(state, &user).await?;
    info!(user_id = %user.id, "user logged in");
    Ok(session)
}

/// Exchange the current refresh token for a new pair. The old refresh token
/// stops working.
pub async fn refresh(state: &AppState, refresh_token: &str) -> Result<Session, AppError> {
    let claims = state.validator.validate_refresh(refresh_token).map_err(|e| {
        security::login_failed("refresh_token_invalid", None);
        AppError::from(e)
    })?;

    let user = state.users.find_by_id(&claims.sub).await?;
    let user = match user {
        Some(u) if u.refresh_token.as_deref() == Some(refresh_token) => u,
        _ => {
            security::login_failed("refresh_token_revoked", Some(&claims.email));
            return Err(AppError::refresh_token_revoked());
        }
    };

    start_session(state, &user).await
}

async fn start_session(state: &AppState, user: &User) -> Result<Session, AppError> {
    let identity = user.identity();
    let tokens = state.issuer.issue(&identity)?;
    state
        .users
        .update_refresh_token_and_last_login(&user.id, &tokens.refresh_token, state.clock.now())
        .await?;
    Ok(Session::new(identity, tokens))
}
