//! Plan building.
//! - Enumerates regular files under the root (flat or recursive).
//! - Filters by extension whitelist when one is given.
//! - Strips every rule from each name and keeps only names that actually change.
//!
//! Notes:
//! - Entries are sorted by file name within each directory so the plan order is
//!   stable; collision suffixes are assigned in this order.
//! - Symlinks and directories are never planned.
//! - Enumeration errors are recorded per item; planning continues.
//! - Names are matched as raw bytes on Unix, so names that are not UTF-8 are
//!   planned too. Elsewhere such a name is recorded as a failure.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::CullError;

use super::name::is_processable;
use super::rules::{ExtensionWhitelist, StripRules};
use super::summary::ItemFailure;

/// How far below the root files are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalMode {
    /// Direct children of the root only.
    #[default]
    Flat,
    /// Every file in the subtree; each file stays in its own directory.
    Recursive,
}

impl TraversalMode {
    fn max_depth(self) -> usize {
        match self {
            TraversalMode::Flat => 1,
            TraversalMode::Recursive => usize::MAX,
        }
    }
}

/// A file as found during planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub dir: PathBuf,
    pub name: OsString,
}

impl FileRef {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

/// A file whose stripped name differs from its current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameIntent {
    pub file: FileRef,
    pub proposed: OsString,
}

/// Ordered intents plus whatever could not be enumerated.
#[derive(Debug, Default)]
pub struct Plan {
    pub intents: Vec<RenameIntent>,
    pub failures: Vec<ItemFailure>,
    /// Eligible files examined (after the whitelist filter).
    pub scanned: usize,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }
}

/// Fail fast when the root is missing or not a directory.
pub fn ensure_root(root: &Path) -> Result<(), CullError> {
    match root.metadata() {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CullError::RootNotDirectory(root.to_path_buf())),
        Err(_) => Err(CullError::RootNotFound(root.to_path_buf())),
    }
}

/// Compute the proposed name for `name`, or None when stripping changes nothing.
pub fn propose(name: &OsStr, rules: &StripRules) -> Option<OsString> {
    let proposed = rules.apply_os(name);
    (proposed.as_os_str() != name).then_some(proposed)
}

/// Build the ordered rename plan for `root`.
pub fn build_plan(
    root: &Path,
    mode: TraversalMode,
    rules: &StripRules,
    whitelist: Option<&ExtensionWhitelist>,
) -> Result<Plan, CullError> {
    ensure_root(root)?;

    let mut plan = Plan::default();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(mode.max_depth())
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                let msg = err.to_string();
                let source = err.into_io_error().unwrap_or_else(|| io::Error::other(msg));
                warn!(path = %path.display(), error = %source, "Skipping unreadable entry");
                plan.failures.push(ItemFailure {
                    path: path.clone(),
                    target: None,
                    error: CullError::Enumeration { path, source },
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name();
        if !is_processable(name) {
            let path = entry.path().to_path_buf();
            warn!(path = %path.display(), "Cannot match rules against a non-Unicode name");
            plan.failures.push(ItemFailure {
                path: path.clone(),
                target: None,
                error: CullError::NonUnicodeName(path),
            });
            continue;
        }

        if let Some(wl) = whitelist
            && !wl.allows_os(name)
        {
            continue;
        }
        plan.scanned += 1;

        if let Some(proposed) = propose(name, rules) {
            let dir = entry.path().parent().unwrap_or(root).to_path_buf();
            debug!(dir = %dir.display(), from = ?name, to = ?proposed, "planned");
            plan.intents.push(RenameIntent {
                file: FileRef {
                    dir,
                    name: name.to_os_string(),
                },
                proposed,
            });
        }
    }

    Ok(plan)
}
