//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for the entry store.
//! - Configure pragmas and run migrations before handing connections out.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` so deleting an entry
//!   cascades to its value points.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Creates the file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = connect()
        .map_err(DbError::from)
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} needs_newer_build={} error={}",
            started_at.elapsed().as_millis(),
            err.needs_newer_build(),
            err
        ),
    }
    result
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}
