//! Note store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use time::OffsetDateTime;

use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// ULID; sorts by creation time
    pub id: String,
    pub owner_id: String,
    /// Owner's email at the time the note was written
    pub email: String,
    pub header: String,
    pub notes_data: String,
    pub sharable: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Note {
    /// Owners always see their notes; others only when marked sharable.
    pub fn is_visible_to(&self, user_id: &str) -> bool {
        self.owner_id == user_id || self.sharable
    }
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Notes owned by `user_id` or marked sharable, oldest first.
    async fn find_visible_to(&self, user_id: &str) -> Result<Vec<Note>, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>, DomainError>;

    /// Fails with `Conflict(NoteHeader)` when the owner already has the header.
    async fn insert(&self, note: Note) -> Result<Note, DomainError>;

    /// Replace an existing note; same header rule as `insert`.
    async fn update(&self, note: Note) -> Result<Note, DomainError>;

    /// Remove a note owned by `owner_id`. The ownership check and the removal
    /// are one step: `NotFound` when absent, `Forbidden` when owned by someone
    /// else.
    async fn delete(&self, id: &str, owner_id: &str) -> Result<Note, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}

#[derive(Debug, Default)]
pub struct InMemoryNoteStore {
    notes: RwLock<BTreeMap<String, Note>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn header_taken(notes: &BTreeMap<String, Note>, candidate: &Note) -> bool {
    notes.values().any(|n| {
        n.owner_id == candidate.owner_id && n.header == candidate.header && n.id != candidate.id
    })
}

fn header_conflict(header: &str) -> DomainError {
    DomainError::conflict(
        ConflictKind::NoteHeader,
        format!("A note with header '{header}' already exists"),
    )
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn find_visible_to(&self, user_id: &str) -> Result<Vec<Note>, DomainError> {
        Ok(self
            .notes
            .read()
            .values()
            .filter(|n| n.is_visible_to(user_id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>, DomainError> {
        Ok(self.notes.read().get(id).cloned())
    }

    async fn insert(&self, note: Note) -> Result<Note, DomainError> {
        let mut notes = self.notes.write();
        if header_taken(&notes, &note) {
            return Err(header_conflict(&note.header));
        }
        notes.insert(note.id.clone(), note.clone());
        Ok(note)
    }

    async fn update(&self, note: Note) -> Result<Note, DomainError> {
        let mut notes = self.notes.write();
        if !notes.contains_key(&note.id) {
            return Err(DomainError::not_found(NotFoundKind::Note, "Note not found"));
        }
        if header_taken(&notes, &note) {
            return Err(header_conflict(&note.header));
        }
        notes.insert(note.id.clone(), note.clone());
        Ok(note)
    }

    async fn delete(&self, id: &str, owner_id: &str) -> Result<Note, DomainError> {
        let mut notes = self.notes.write();
        match notes.get(id) {
            None => Err(DomainError::not_found(
                NotFoundKind::Note,
                format!("Note {id} not found"),
            )),
            Some(note) if note.owner_id != owner_id => Err(DomainError::forbidden(
                ForbiddenKind::NoteAccess,
                "Only the owner can change this note",
            )),
            Some(_) => notes.remove(id).ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Note, format!("Note {id} not found"))
            }),
        }
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.notes.read().len())
    }
}
