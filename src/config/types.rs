//! Core configuration types.
//! - Config holds everything a run needs, with defaults matching the original tool
//!   (flat traversal, extension restriction on).
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::culling::{ExtensionWhitelist, StripRules, TraversalMode};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// Per-file details
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one culling run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose files are renamed
    pub root: Option<PathBuf>,
    /// Substrings removed from every eligible file name, in order
    pub strip_rules: StripRules,
    /// Extensions eligible for renaming when `restrict_extensions` is set
    pub extensions: ExtensionWhitelist,
    /// If false, every file is eligible regardless of extension
    pub restrict_extensions: bool,
    /// Flat (root only) or recursive traversal
    pub mode: TraversalMode,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Draw a progress bar while renaming
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            strip_rules: StripRules::default(),
            extensions: ExtensionWhitelist::default(),
            restrict_extensions: true,
            mode: TraversalMode::Flat,
            log_level: LogLevel::Normal,
            log_file: None,
            show_progress: true,
        }
    }
}

impl Config {
    /// Construct a Config with an explicit root and rules; other fields use defaults.
    pub fn new(root: impl Into<PathBuf>, strip_rules: StripRules) -> Self {
        Self {
            root: Some(root.into()),
            strip_rules,
            ..Default::default()
        }
    }

    /// The whitelist to plan with, or None when extensions are unrestricted.
    pub fn whitelist(&self) -> Option<&ExtensionWhitelist> {
        self.restrict_extensions.then_some(&self.extensions)
    }
}
