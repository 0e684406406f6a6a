//! Explicit core configuration.
//!
//! Nothing is read from the environment; hosts build a `CoreConfig` and
//! hand it to the core.

use crate::db::open_db;
use crate::logging::{default_log_level, LogSettings};
use crate::repo::kv_repo::SqliteKvStore;
use crate::repo::RepoResult;
use std::path::PathBuf;

/// Storage key holding the board document (array of projects).
pub const PROJECTS_KEY: &str = "projects";
/// Storage key holding the flat-list document (array of todos).
pub const TODOS_KEY: &str = "todos";

const DEFAULT_DB_FILE_NAME: &str = "taskboard.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub db_file_name: String,
    pub log_level: String,
}

impl CoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            log_level: default_log_level().to_string(),
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_db_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.db_file_name = file_name.into();
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings::new(self.log_level.clone(), self.log_dir())
    }

    /// Opens the configured database file, applying migrations.
    pub fn open_storage(&self) -> RepoResult<SqliteKvStore> {
        let conn = open_db(self.db_path())?;
        SqliteKvStore::try_new(conn)
    }
}
