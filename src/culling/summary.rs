//! Run results handed back to the caller after planning and applying.

use std::path::PathBuf;

use crate::errors::CullError;

/// One completed rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// A single item that could not be processed. The run continues past it.
#[derive(Debug)]
pub struct ItemFailure {
    /// The file (or directory, for enumeration failures) the failure concerns.
    pub path: PathBuf,
    /// Target that was attempted, when one had been resolved.
    pub target: Option<PathBuf>,
    pub error: CullError,
}

/// Final outcome of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Number of rename intents the plan contained.
    pub planned: usize,
    pub renamed: Vec<Renamed>,
    /// Intents whose resolved target was the file's current path.
    pub unchanged: usize,
    pub failures: Vec<ItemFailure>,
    /// Set when a shutdown request stopped the run before every intent was processed.
    pub interrupted: bool,
}

impl RunSummary {
    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Intents processed so far, whatever their outcome.
    pub fn processed(&self) -> usize {
        self.renamed.len() + self.unchanged + self.rename_failures()
    }

    /// No intents and nothing went wrong while looking for them.
    pub fn nothing_to_do(&self) -> bool {
        self.planned == 0 && self.failures.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.interrupted
    }

    fn rename_failures(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| !matches!(f.error, CullError::Enumeration { .. } | CullError::NonUnicodeName(_)))
            .count()
    }
}
