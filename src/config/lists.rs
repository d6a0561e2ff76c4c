//! Plain-text list files: one strip rule or one extension per line.
//! Surrounding whitespace is trimmed and blank lines are ignored; extensions
//! may be written with or without their leading dot.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::culling::{ExtensionWhitelist, StripRules};
use crate::fs_ops::io_error_with_help;

/// Read strip rules from a text file, keeping line order.
pub fn read_rules_file(path: &Path) -> Result<StripRules> {
    let text = fs::read_to_string(path).map_err(io_error_with_help("read rules file", path))?;
    let rules = StripRules::from_lines(&text);
    debug!(path = %path.display(), count = rules.len(), "Loaded strip rules");
    Ok(rules)
}

/// Read an extension whitelist from a text file.
pub fn read_extensions_file(path: &Path) -> Result<ExtensionWhitelist> {
    let text = fs::read_to_string(path).map_err(io_error_with_help("read whitelist file", path))?;
    let wl = ExtensionWhitelist::from_lines(&text);
    debug!(path = %path.display(), extensions = ?wl.iter().collect::<Vec<_>>(), "Loaded extension whitelist");
    Ok(wl)
}
