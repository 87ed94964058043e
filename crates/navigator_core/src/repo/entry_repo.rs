//! Entry repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/get/delete APIs over saved session snapshots.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Entry::validate()` before SQL mutations.
//! - An entry and its value points are written in one transaction.
//! - Listing is most-recent-first: `timestamp_ms DESC`, newest insert first
//!   on ties.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::domain::Domain;
use crate::model::entry::{Entry, EntryId, EntryValidationError};
use crate::model::score::Score;
use crate::model::value_point::{ValuePoint, ValuePointId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    NotFound(EntryId),
    /// Connection was not opened through `open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "entry repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
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

/// Paging options for listing entries.
#[derive(Debug, Clone, Default)]
pub struct EntryListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for saved entries.
pub trait EntryRepository {
    fn create_entry(&self, entry: &Entry) -> RepoResult<EntryId>;
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>>;
    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<Entry>>;
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `RepoError::UninitializedConnection` when the schema version does not
    ///   match this binary.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create_entry(&self, entry: &Entry) -> RepoResult<EntryId> {
        entry.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO entries (entry_uuid, timestamp_ms) VALUES (?1, ?2);",
            params![entry.id().to_string(), entry.timestamp_ms()],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO value_points (
                    entry_uuid,
                    point_uuid,
                    position,
                    label,
                    domain,
                    score
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            )?;
            for (position, point) in entry.value_points().iter().enumerate() {
                stmt.execute(params![
                    entry.id().to_string(),
                    point.id.to_string(),
                    position as i64,
                    point.label.as_str(),
                    point.domain.name(),
                    i64::from(point.score.value()),
                ])?;
            }
        }
        tx.commit()?;

        Ok(entry.id())
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        let mut stmt = self.conn.prepare(
            "SELECT entry_uuid, timestamp_ms
             FROM entries
             WHERE entry_uuid = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(self.load_entry(row)?)),
            None => Ok(None),
        }
    }

    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<Entry>> {
        let mut sql = String::from(
            "SELECT entry_uuid, timestamp_ms
             FROM entries
             ORDER BY timestamp_ms DESC, rowid DESC",
        );
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(self.load_entry(row)?);
        }

        Ok(entries)
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM entries WHERE entry_uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

impl SqliteEntryRepository<'_> {
    fn load_entry(&self, row: &Row<'_>) -> RepoResult<Entry> {
        let uuid_text: String = row.get("entry_uuid")?;
        let id = EntryId::from_uuid(parse_uuid(&uuid_text, "entries.entry_uuid")?);
        let timestamp_ms: i64 = row.get("timestamp_ms")?;

        let mut stmt = self.conn.prepare(
            "SELECT point_uuid, label, domain, score
             FROM value_points
             WHERE entry_uuid = ?1
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([uuid_text.as_str()])?;
        let mut points = Vec::new();
        while let Some(point_row) = rows.next()? {
            points.push(parse_point_row(point_row)?);
        }

        let entry = Entry::from_parts(id, timestamp_ms, points);
        entry.validate().map_err(|err| {
            RepoError::InvalidData(format!("entry {id} failed validation: {err}"))
        })?;
        Ok(entry)
    }
}

fn parse_point_row(row: &Row<'_>) -> RepoResult<ValuePoint> {
    let uuid_text: String = row.get("point_uuid")?;
    let id = ValuePointId::from_uuid(parse_uuid(&uuid_text, "value_points.point_uuid")?);

    let domain_text: String = row.get("domain")?;
    let domain = Domain::from_name(&domain_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid domain `{domain_text}` in value_points.domain"
        ))
    })?;

    let raw_score: i64 = row.get("score")?;
    let score = Score::new(raw_score)
        .map_err(|err| RepoError::InvalidData(format!("value_points.score: {err}")))?;

    let label: String = row.get("label")?;
    ValuePoint::with_id(id, label, domain, score)
        .map_err(|err| RepoError::InvalidData(format!("value point {id}: {err}")))
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
