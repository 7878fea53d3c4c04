//! Wiring of application state.

pub mod state;
