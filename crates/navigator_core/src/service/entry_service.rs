//! Entry use-case service.
//!
//! # Responsibility
//! - Save drafts as immutable entries and read history back.
//! - Guard deletion behind the configured authorization code.
//! - Feed loaded history into the timeline and summary projections.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - A delete with a wrong or blank code never reaches the repository.
//! - Logs carry ids and counts only, never value labels.

use crate::model::entry::{Draft, DraftError, Entry, EntryId};
use crate::repo::entry_repo::{EntryListQuery, EntryRepository, RepoError};
use crate::stats::summary::{summarize_by_domain, DomainSummary};
use crate::timeline::projector::{project, project_domain_averages, DomainTrendRow, Timeline};
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, EntryServiceError>;

/// Service error for entry use-cases.
#[derive(Debug)]
pub enum EntryServiceError {
    /// Delete code missing or wrong.
    Unauthorized,
    EntryNotFound(EntryId),
    Draft(DraftError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for EntryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "delete code rejected"),
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
            Self::Draft(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EntryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Draft(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EntryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EntryNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<DraftError> for EntryServiceError {
    fn from(value: DraftError) -> Self {
        Self::Draft(value)
    }
}

/// Use-case service over an entry repository.
pub struct EntryService<R: EntryRepository> {
    repo: R,
    delete_code: String,
}

impl<R: EntryRepository> EntryService<R> {
    /// Creates a service. A blank `delete_code` disables deletion entirely.
    pub fn new(repo: R, delete_code: impl Into<String>) -> Self {
        Self {
            repo,
            delete_code: delete_code.into().trim().to_string(),
        }
    }

    /// Freezes `draft` at `timestamp_ms` and persists it.
    ///
    /// The draft is not cleared; the caller clears it once the save returns.
    pub fn save_draft_at(&self, draft: &Draft, timestamp_ms: i64) -> ServiceResult<Entry> {
        let entry = draft.freeze(timestamp_ms)?;
        self.repo.create_entry(&entry)?;
        info!(
            "event=entry_save module=service status=ok entry_id={} points={}",
            entry.id(),
            entry.value_points().len()
        );
        Ok(entry)
    }

    /// Freezes `draft` with the current wall-clock time and persists it.
    pub fn save_draft(&self, draft: &Draft) -> ServiceResult<Entry> {
        self.save_draft_at(draft, Utc::now().timestamp_millis())
    }

    pub fn get_entry(&self, id: EntryId) -> ServiceResult<Option<Entry>> {
        Ok(self.repo.get_entry(id)?)
    }

    /// Lists saved entries, most recent first.
    pub fn history(&self, limit: Option<u32>) -> ServiceResult<Vec<Entry>> {
        let query = EntryListQuery { limit, offset: 0 };
        Ok(self.repo.list_entries(&query)?)
    }

    /// Most recently saved entry, if any.
    pub fn latest_entry(&self) -> ServiceResult<Option<Entry>> {
        Ok(self.history(Some(1))?.into_iter().next())
    }

    /// Deletes an entry when `code` matches the configured delete code.
    ///
    /// # Errors
    /// - `EntryServiceError::Unauthorized` for a wrong or blank code.
    /// - `EntryServiceError::EntryNotFound` when the entry does not exist.
    pub fn delete_entry(&self, id: EntryId, code: &str) -> ServiceResult<()> {
        if self.delete_code.is_empty() || code.trim() != self.delete_code {
            warn!("event=entry_delete module=service status=unauthorized entry_id={id}");
            return Err(EntryServiceError::Unauthorized);
        }
        self.repo.delete_entry(id)?;
        info!("event=entry_delete module=service status=ok entry_id={id}");
        Ok(())
    }

    /// Per-label trend series over the full history.
    pub fn timeline(&self) -> ServiceResult<Timeline> {
        Ok(project(&self.history(None)?))
    }

    /// Per-domain average series over the full history.
    pub fn domain_trend(&self) -> ServiceResult<Vec<DomainTrendRow>> {
        Ok(project_domain_averages(&self.history(None)?))
    }

    /// Domain-grouped summary of the latest entry.
    pub fn latest_summary(&self) -> ServiceResult<Option<(Entry, Vec<DomainSummary>)>> {
        Ok(self.latest_entry()?.map(|entry| {
            let summaries = summarize_by_domain(entry.value_points());
            (entry, summaries)
        }))
    }
}
