//! Value statement refinement contract.
//!
//! # Responsibility
//! - Define the text-transform seam used to polish custom value labels.
//! - Guarantee callers always get a usable label back.
//!
//! # Invariants
//! - `refine_or_keep` never fails; refiner errors and blank output fall back
//!   to the user's draft.
//! - Draft text is never written to logs.

use crate::model::domain::Domain;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefineError {
    /// Backend cannot be reached or is not configured.
    Unavailable(String),
    /// Backend refused the input.
    Rejected(String),
}

impl Display for RefineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "refiner unavailable: {message}"),
            Self::Rejected(message) => write!(f, "refiner rejected input: {message}"),
        }
    }
}

impl Error for RefineError {}

/// Turns a rough draft into a concise value statement for a domain.
pub trait ValueRefiner {
    fn refine(&self, domain: Domain, rough_draft: &str) -> Result<String, RefineError>;
}

/// Refiner that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughRefiner;

impl ValueRefiner for PassThroughRefiner {
    fn refine(&self, _domain: Domain, rough_draft: &str) -> Result<String, RefineError> {
        Ok(rough_draft.to_string())
    }
}

/// Refines `rough_draft`, keeping it unchanged when the refiner fails or
/// returns nothing.
pub fn refine_or_keep(refiner: &dyn ValueRefiner, domain: Domain, rough_draft: &str) -> String {
    match refiner.refine(domain, rough_draft) {
        Ok(refined) if !refined.trim().is_empty() => refined.trim().to_string(),
        Ok(_) => {
            warn!(
                "event=value_refine module=refine status=empty domain=\"{}\"",
                domain.name()
            );
            rough_draft.to_string()
        }
        Err(err) => {
            warn!(
                "event=value_refine module=refine status=error domain=\"{}\" error={}",
                domain.name(),
                err
            );
            rough_draft.to_string()
        }
    }
}
