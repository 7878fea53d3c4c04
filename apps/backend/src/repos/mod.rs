//! Storage collaborators behind async traits, with in-process implementations.

pub mod notes;
pub mod users;

pub use notes::{InMemoryNoteStore, Note, NoteStore};
pub use users::{InMemoryUserStore, User, UserStore};
