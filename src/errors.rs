//! Typed error definitions for name_culling.
//! Provides the fatal precondition failures and the per-item failure kinds
//! collected by the planner and the applier.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fs_ops::io_hint;

#[derive(Debug, Error)]
pub enum CullError {
    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("Cannot enumerate '{}': {source}{}", .path.display(), io_hint(.source))]
    Enumeration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot strip rules from non-Unicode name: {}", .0.display())]
    NonUnicodeName(PathBuf),

    #[error("Stripping '{original}' in {} leaves an unusable name '{proposed}'", .dir.display())]
    UnusableName {
        dir: PathBuf,
        original: String,
        proposed: String,
    },

    #[error("No free name for '{name}' in {} after {attempts} suffixes", .dir.display())]
    CollisionExhausted {
        dir: PathBuf,
        name: String,
        attempts: u64,
    },

    #[error("Rename '{}' -> '{}' failed: {source}{}", .from.display(), .to.display(), io_hint(.source))]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl CullError {
    /// Stable numeric code for structured logs and exit diagnostics.
    pub fn code(&self) -> u16 {
        match self {
            CullError::RootNotFound(_) => 10,
            CullError::RootNotDirectory(_) => 11,
            CullError::Enumeration { .. } => 20,
            CullError::NonUnicodeName(_) => 21,
            CullError::UnusableName { .. } => 30,
            CullError::CollisionExhausted { .. } => 31,
            CullError::RenameFailed { .. } => 40,
            CullError::Interrupted => 130,
        }
    }

    /// Short machine-friendly label matching the `kind` field used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CullError::RootNotFound(_) => "root_not_found",
            CullError::RootNotDirectory(_) => "root_not_directory",
            CullError::Enumeration { .. } => "enumeration",
            CullError::NonUnicodeName(_) => "non_unicode_name",
            CullError::UnusableName { .. } => "unusable_name",
            CullError::CollisionExhausted { .. } => "collision_exhausted",
            CullError::RenameFailed { .. } => "rename_failed",
            CullError::Interrupted => "interrupted",
        }
    }
}
