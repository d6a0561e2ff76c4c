//! Config validation logic.
//! Verifies the root is configured, exists, is a directory, and is readable.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::culling::ensure_root;

use super::types::Config;

impl Config {
    /// Validate the run settings and return the root directory to process.
    pub fn validate(&self) -> Result<PathBuf> {
        let root = self.root.clone().ok_or_else(|| {
            error!("No root directory configured");
            anyhow!("no root directory given; pass ROOT or set <root> in the config file")
        })?;

        if let Err(e) = ensure_root(&root) {
            error!(code = e.code(), kind = e.kind(), path = %root.display(), "Invalid root");
            return Err(e.into());
        }

        fs::read_dir(&root).with_context(|| {
            format!("Cannot read root directory '{}'; check permissions", root.display())
        })?;
        debug!("root readable: {}", root.display());

        if self.restrict_extensions && self.extensions.is_empty() {
            warn!("Extension restriction is on but the whitelist is empty; no file is eligible");
        }

        info!(
            "Config validated: root='{}' mode={:?} rules={} restrict_extensions={}",
            root.display(),
            self.mode,
            self.strip_rules.len(),
            self.restrict_extensions
        );
        Ok(root)
    }
}
