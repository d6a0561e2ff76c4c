//! Core library for `name_culling`.
//!
//! Renames files by removing literal substrings from their names:
//! - `culling` builds an ordered rename plan and applies it with collision-safe naming.
//! - `config` loads settings (XML config file, plain-text list files) and validates the root.
//! - `cli`, `output`, `progress` and `shutdown` are the thin layers the binary uses.

pub mod cli;
pub mod config;
pub mod culling;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod progress;
pub mod shutdown;

pub use config::{default_config_path, default_log_path, path_has_symlink_ancestor, Config, LogLevel};
pub use culling::{
    apply_plan, build_plan, cull, ExtensionWhitelist, ItemFailure, Plan, RenameIntent, RunSummary,
    StripRules, TraversalMode,
};
pub use errors::CullError;

/// Convenient imports for library users.
pub mod prelude {
    pub use crate::config::{Config, LogLevel};
    pub use crate::culling::{
        apply_plan, build_plan, cull, resolve_target, DirectoryState, ExtensionWhitelist, LiveDirectory,
        Plan, RunSummary, StripRules, TraversalMode,
    };
    pub use crate::errors::CullError;
    pub use crate::progress::{NoProgress, Progress};
    pub use crate::shutdown::request as request_shutdown;
}
