//! Process-wide FFI configuration resolved from the environment.
//!
//! # Invariants
//! - Values are resolved once per process and never change afterwards.
//! - Blank environment values fall back to defaults.

use std::path::PathBuf;
use std::sync::OnceLock;

const DB_PATH_ENV: &str = "NAVIGATOR_DB_PATH";
const DELETE_CODE_ENV: &str = "NAVIGATOR_DELETE_CODE";
const DB_FILE_NAME: &str = "values_navigator.sqlite3";
const DEFAULT_DELETE_CODE: &str = "1983";

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static DELETE_CODE: OnceLock<String> = OnceLock::new();

/// SQLite file holding saved entries.
pub(crate) fn db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            non_blank_env(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME))
        })
        .clone()
}

/// Code a user must type to delete a saved entry.
pub(crate) fn delete_code() -> &'static str {
    DELETE_CODE
        .get_or_init(|| {
            non_blank_env(DELETE_CODE_ENV).unwrap_or_else(|| DEFAULT_DELETE_CODE.to_string())
        })
        .as_str()
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}
