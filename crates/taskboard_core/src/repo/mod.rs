//! Persistence medium and whole-state adapter.
//!
//! # Responsibility
//! - Define the string-keyed medium contract (`KeyValueStore`).
//! - Serialize complete state documents as JSON under one key each.
//!
//! # Invariants
//! - Writes always replace the whole document; there is no partial update.
//! - A missing or unreadable document is reported as "no prior state".

pub mod kv_repo;
pub mod state_repo;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure while reading or writing a state document.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Json(serde_json::Error),
    /// Connection is missing the `kv_entries` table.
    NotMigrated,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid state document: {err}"),
            Self::NotMigrated => write!(f, "storage connection has no kv_entries table"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::NotMigrated => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
