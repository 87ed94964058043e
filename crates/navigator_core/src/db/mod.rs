//! Entry-store bootstrap: connections, pragmas and schema versioning.
//!
//! # Responsibility
//! - Hand out SQLite connections that already carry the entry schema.
//! - Classify bootstrap failures so callers can tell a broken file from a
//!   file written by a newer build.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - No repository sees a connection whose migrations have not all succeeded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the entry store.
#[derive(Debug)]
pub enum DbError {
    /// Driver-level failure outside any migration step.
    Sqlite(rusqlite::Error),
    /// One migration script failed; nothing from that run was committed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// Store was last written by a build with a newer schema.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Whether upgrading the app, rather than repairing the file, fixes this.
    pub fn needs_newer_build(&self) -> bool {
        matches!(self, Self::UnsupportedSchemaVersion { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "entry store error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "entry store migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "entry store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
