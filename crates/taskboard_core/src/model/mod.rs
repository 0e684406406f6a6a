//! Domain model for the board and flat-list variants.
//!
//! # Responsibility
//! - Define the persisted entity shapes and their JSON wire names.
//! - Own required-text validation shared by both stores.
//! - Allocate process-unique integer identifiers.
//!
//! # Invariants
//! - Identifiers are assigned at creation and never reused or mutated.
//! - Entities carry no transient UI state.

pub mod board;
pub mod id;
pub mod todo;
pub mod validation;
