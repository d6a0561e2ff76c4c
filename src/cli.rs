//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - List sources given on the command line (`--rules-file` plus `--strip`,
//!   `--whitelist-file` plus `--ext`) replace the corresponding config-file list.
//! - --debug is a shorthand for --log-level debug.

use anyhow::Result;
use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};
use crate::config::{read_extensions_file, read_rules_file};
use crate::culling::{ExtensionWhitelist, StripRules, TraversalMode};

/// Strip unwanted text from file names in bulk.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Batch-remove literal substrings from file names (Rust)"
)]
pub struct Args {
    /// Folder whose files are renamed; overrides <root> from the config file.
    #[arg(value_name = "ROOT", value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Literal text to remove from names (repeatable, applied in order).
    #[arg(
        long = "strip",
        short = 's',
        value_name = "TEXT",
        allow_hyphen_values = true,
        help = "Literal text to remove from file names (repeatable)"
    )]
    pub strip: Vec<String>,

    /// File with one strip rule per line.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub rules_file: Option<PathBuf>,

    /// Allowed extension, without the dot (repeatable).
    #[arg(long = "ext", short = 'e', value_name = "EXT", help = "Allowed extension (repeatable)")]
    pub ext: Vec<String>,

    /// File with one allowed extension per line.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub whitelist_file: Option<PathBuf>,

    /// Rename files of every extension.
    #[arg(long, conflicts_with = "restrict_extensions", help = "Ignore the extension whitelist")]
    pub all_extensions: bool,

    /// Only rename files whose extension is whitelisted.
    #[arg(long, help = "Only rename whitelisted extensions (default)")]
    pub restrict_extensions: bool,

    /// Also process files in subfolders.
    #[arg(short = 'r', long, conflicts_with = "flat", help = "Process subfolders too")]
    pub recursive: bool,

    /// Only process files directly inside ROOT.
    #[arg(long, help = "Only process files directly inside ROOT (default)")]
    pub flat: bool,

    /// Explicit config file; must exist.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_parser = parse_log_level, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Print where name_culling looks for its config file, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Do not draw a progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

impl Args {
    /// ROOT with stray surrounding quotes removed.
    pub fn resolved_root(&self) -> Option<PathBuf> {
        self.root.as_deref().map(Self::sanitize_path)
    }

    #[inline]
    fn sanitize_path(p: &Path) -> PathBuf {
        // Trim surrounding single/double quotes left by PowerShell/CMD quoting.
        let s = p.to_string_lossy();
        let trimmed = s.trim();
        let mut inner = if trimmed.len() >= 2
            && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
                || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
        {
            trimmed[1..trimmed.len() - 1].to_string()
        } else {
            trimmed.trim_matches(|c| c == '\'' || c == '"').to_string()
        };

        // One trailing separator left over from quoting ("C:\dir\" -> C:\dir)
        if (inner.ends_with('\\') || inner.ends_with('/')) && inner.len() > 1 {
            inner.pop();
        }

        PathBuf::from(inner)
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    /// Fails only when a list file cannot be read.
    pub fn apply_overrides(&self, cfg: &mut Config) -> Result<()> {
        if let Some(root) = self.resolved_root() {
            cfg.root = Some(root);
        }

        if self.rules_file.is_some() || !self.strip.is_empty() {
            let mut rules: Vec<String> = match &self.rules_file {
                Some(p) => read_rules_file(p)?.iter().map(str::to_owned).collect(),
                None => Vec::new(),
            };
            rules.extend(self.strip.iter().cloned());
            cfg.strip_rules = StripRules::new(rules);
        }

        if self.whitelist_file.is_some() || !self.ext.is_empty() {
            let mut exts: Vec<String> = match &self.whitelist_file {
                Some(p) => read_extensions_file(p)?.iter().map(str::to_owned).collect(),
                None => Vec::new(),
            };
            exts.extend(self.ext.iter().cloned());
            cfg.extensions = ExtensionWhitelist::new(exts);
        }

        if self.all_extensions {
            cfg.restrict_extensions = false;
        }
        if self.restrict_extensions {
            cfg.restrict_extensions = true;
        }
        if self.recursive {
            cfg.mode = TraversalMode::Recursive;
        }
        if self.flat {
            cfg.mode = TraversalMode::Flat;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.no_progress {
            cfg.show_progress = false;
        }
        Ok(())
    }
}

pub fn parse() -> Args {
    Args::parse()
}
