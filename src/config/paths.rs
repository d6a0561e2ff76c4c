//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use anyhow::{anyhow, Result};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "NAME_CULLING_CONFIG";

const APP_DIR: &str = "name_culling";

/// Config path from the environment, made absolute against the current directory.
fn env_config_path() -> Option<PathBuf> {
    let raw = env::var_os(CONFIG_ENV)?;
    if raw.is_empty() {
        return None;
    }
    let p = PathBuf::from(raw);
    if p.is_absolute() {
        Some(p)
    } else {
        env::current_dir().ok().map(|cwd| cwd.join(p))
    }
}

/// Config path: $NAME_CULLING_CONFIG if set, else the OS config dir.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env_config_path() {
        return Ok(p);
    }
    if let Some(base) = config_dir() {
        return Ok(base.join(APP_DIR).join("config.xml"));
    }
    env::var_os("HOME")
        .map(|h| PathBuf::from(h).join(".config").join(APP_DIR).join("config.xml"))
        .ok_or_else(|| anyhow!("cannot determine a config directory (no config dir and HOME unset)"))
}

/// Log path suggestion: next to an explicit config file, else in the OS data dir.
pub fn default_log_path() -> Result<PathBuf> {
    if let Some(cfg) = env_config_path()
        && let Some(parent) = cfg.parent()
    {
        return Ok(parent.join("name_culling.log"));
    }
    if let Some(base) = data_dir() {
        return Ok(base.join(APP_DIR).join("name_culling.log"));
    }
    env::var_os("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join(APP_DIR)
                .join("name_culling.log")
        })
        .ok_or_else(|| anyhow!("cannot determine a data directory (no data dir and HOME unset)"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
