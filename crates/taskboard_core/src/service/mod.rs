//! Stores: the authoritative in-memory state for each widget variant.
//!
//! # Responsibility
//! - Own entity collections plus their transient selection state.
//! - Validate, apply, then persist every mutation through the adapter.
//!
//! # Invariants
//! - A rejected mutation leaves entities and selection untouched.
//! - Deleting an entity clears every transient pointer to it.

pub mod board_service;
pub mod todo_service;
