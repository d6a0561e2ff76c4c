//! Rename planning and application.
//!
//! Data flows one way: enumerate files, strip rules from their names, resolve
//! collisions against live directory state, rename. `cull` runs the whole
//! pipeline; `build_plan` and `apply_plan` are the two halves.

mod apply;
mod name;
mod plan;
mod resolve;
mod rules;
mod summary;

pub use apply::apply_plan;
pub use plan::{build_plan, ensure_root, propose, FileRef, Plan, RenameIntent, TraversalMode};
pub use resolve::{numbered_name, resolve_target, DirectoryState, LiveDirectory, MAX_SUFFIX_PROBES};
pub use rules::{extension_of, split_extension, ExtensionWhitelist, StripRules};
pub use summary::{ItemFailure, Renamed, RunSummary};

use std::path::Path;
use tracing::info;

use crate::errors::CullError;
use crate::progress::Progress;

/// Plan and apply in one go against the real filesystem.
///
/// Only a missing or non-directory root is an error; everything else ends up in the summary.
pub fn cull<P>(
    root: &Path,
    mode: TraversalMode,
    rules: &StripRules,
    whitelist: Option<&ExtensionWhitelist>,
    progress: &mut P,
) -> Result<RunSummary, CullError>
where
    P: Progress + ?Sized,
{
    let plan = build_plan(root, mode, rules, whitelist)?;
    info!(
        root = %root.display(),
        ?mode,
        scanned = plan.scanned,
        planned = plan.len(),
        "Plan built"
    );
    Ok(apply_plan(plan, &LiveDirectory, progress))
}
