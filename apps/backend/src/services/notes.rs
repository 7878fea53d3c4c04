//! Note operations and their access rules.
//!
//! Reading needs ownership or a sharable note; changing or deleting needs
//! ownership.

use tracing::info;
use ulid::Ulid;

use crate::errors::domain::{DomainError, ForbiddenKind, NotFoundKind, ValidationKind};
use crate::extractors::current_user::CurrentUser;
use crate::repos::Note;
use crate::state::app_state::AppState;

#[derive(Debug, Clone)]
pub struct NewNote {
    pub header: String,
    pub notes_data: String,
    pub sharable: bool,
}

/// Partial update; `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub header: Option<String>,
    pub notes_data: Option<String>,
    pub sharable: Option<bool>,
}

fn clean_header(header: &str) -> Result<String, DomainError> {
    let header = header.trim();
    if header.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Other,
            "Note header must not be empty",
        ));
    }
    Ok(header.to_string())
}

fn note_not_found(id: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Note, format!("Note {id} not found"))
}

async fn load(state: &AppState, id: &str) -> Result<Note, DomainError> {
    state
        .notes
        .find_by_id(id)
        .await?
        .ok_or_else(|| note_not_found(id))
}

async fn load_owned(state: &AppState, user: &CurrentUser, id: &str) -> Result<Note, DomainError> {
    let note = load(state, id).await?;
    if note.owner_id != user.subject_id {
        return Err(DomainError::forbidden(
            ForbiddenKind::NoteAccess,
            "Only the owner can change this note",
        ));
    }
    Ok(note)
}

pub async fn list(state: &AppState, user: &CurrentUser) -> Result<Vec<Note>, DomainError> {
    state.notes.find_visible_to(&user.subject_id).await
}

pub async fn get(state: &AppState, user: &CurrentUser, id: &str) -> Result<Note, DomainError> {
    let note = load(state, id).await?;
    if !note.is_visible_to(&user.subject_id) {
        return Err(DomainError::forbidden(
            ForbiddenKind::NoteAccess,
            "Note is not shared with you",
        ));
    }
    Ok(note)
}

pub async fn create(
    state: &AppState,
    user: &CurrentUser,
    input: NewNote,
) -> Result<Note, DomainError> {
    let now = state.clock.now();
    let note = Note {
        id: Ulid::new().to_string(),
        owner_id: user.subject_id.clone(),
        email: user.email.clone(),
        header: clean_header(&input.header)?,
        notes_data: input.notes_data,
        sharable: input.sharable,
        created_at: now,
        updated_at: now,
    };
    let note = state.notes.insert(note).await?;
    info!(note_id = %note.id, owner_id = %note.owner_id, "note created");
    Ok(note)
}

pub async fn update(
    state: &AppState,
    user: &CurrentUser,
    id: &str,
    changes: NoteChanges,
) -> Result<Note, DomainError> {
    let mut note = load_owned(state, user, id).await?;

    if let Some(header) = changes.header {
        note.header = clean_header(&header)?;
    }
    if let Some(data) = changes.notes_data {
        note.notes_data = data;
    }
    if let Some(sharable) = changes.sharable {
        note.sharable = sharable;
    }
    note.updated_at = state.clock.now();

    state.notes.update(note).await
}

pub async fn delete(state: &AppState, user: &CurrentUser, id: &str) -> Result<Note, DomainError> {
    let removed = state.notes.delete(id, &user.subject_id).await?;
    info!(note_id = %removed.id, "note deleted");
    Ok(removed)
}

/// Give `target_user_id` a private copy of a note the caller can read.
pub async fn share(
    state: &AppState,
    user: &CurrentUser,
    id: &str,
    target_user_id: &str,
) -> Result<Note, DomainError> {
    let source = get(state, user, id).await?;
    let target = state
        .users
        .find_by_id(target_user_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::User,
                format!("User {target_user_id} not found"),
            )
        })?;

    let now = state.clock.now();
    let copy = Note {
        id: Ulid::new().to_string(),
        owner_id: target.id,
        email: target.email,
        header: source.header,
        notes_data: source.notes_data,
        sharable: false,
        created_at: now,
        updated_at: now,
    };
    let copy = state.notes.insert(copy).await?;
    info!(source_id = %source.id, copy_id = %copy.id, "note shared");
    Ok(copy)
}

/// Case-insensitive search over header and body; any term may match.
pub async fn search(
    state: &AppState,
    user: &CurrentUser,
    query: &str,
) -> Result<Vec<Note>, DomainError> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Other,
            "Search query must not be empty",
        ));
    }

    let visible = state.notes.find_visible_to(&user.subject_id).await?;
    Ok(visible
        .into_iter()
        .filter(|note| {
            let header = note.header.to_lowercase();
            let body = note.notes_data.to_lowercase();
            terms
                .iter()
                .any(|t| header.contains(t.as_str()) || body.contains(t.as_str()))
        })
        .collect())
}
