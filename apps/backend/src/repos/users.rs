//! Identity store: account records keyed by subject id and by email.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::OffsetDateTime;

use crate::auth::Identity;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Account record.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Subject id carried in tokens
    pub id: String,
    /// Normalized (lowercase) email
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Most recently issued refresh token; older ones are revoked
    pub refresh_token: Option<String>,
    pub last_login: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl User {
    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;

    /// Fails with `Conflict(UniqueEmail)` when the email is taken.
    async fn insert(&self, user: User) -> Result<User, DomainError>;

    async fn update_refresh_token_and_last_login(
        &self,
        id: &str,
        refresh_token: &str,
        at: OffsetDateTime,
    ) -> Result<(), DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}

/// Process-local identity store.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, User>,
    ids_by_email: DashMap<String, String>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let id = match self.ids_by_email.get(email) {
            Some(id) => id.value().clone(),
            None => return Ok(None),
        };
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn insert(&self, user: User) -> Result<User, DomainError> {
        // The email entry stays locked until the record is in place.
        match self.ids_by_email.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "Email already registered",
            )),
            Entry::Vacant(slot) => {
                self.users.insert(user.id.clone(), user.clone());
                slot.insert(user.id.clone());
                Ok(user)
            }
        }
    }

    async fn update_refresh_token_and_last_login(
        &self,
        id: &str,
        refresh_token: &str,
        at: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let mut user = self
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found"))?;
        user.refresh_token = Some(refresh_token.to_owned());
        user.last_login = Some(at);
        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.users.len())
    }
}
