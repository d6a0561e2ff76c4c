//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Creates a commented template on first run when the default location is used.
//!
//! Notes:
//! - This module only reads/writes the config file; the root is validated elsewhere.
//! - Unknown XML fields are an error so typos do not silently change behavior.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, path_has_symlink_ancestor, CONFIG_ENV};
use super::types::{Config, LogLevel};
use crate::culling::{ExtensionWhitelist, StripRules, TraversalMode};
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    root: Option<String>,
    recursive: Option<bool>,
    restrict_extensions: Option<bool>,
    strip: Option<XmlStrip>,
    extensions: Option<XmlExtensions>,
    log_level: Option<String>,
    log_file: Option<String>,
    show_progress: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct XmlStrip {
    #[serde(rename = "rule", default)]
    rules: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct XmlExtensions {
    #[serde(rename = "ext", default)]
    exts: Vec<String>,
}

/// Outcome of locating and reading the config file.
#[derive(Debug)]
pub enum LoadResult {
    /// A config file was found and parsed.
    Loaded(Config, PathBuf),
    /// No file at the (explicit) location; defaults apply.
    Missing(PathBuf),
    /// First run at the default location: a template was written.
    CreatedTemplate(PathBuf),
}

fn non_empty(s: &str) -> Option<&str> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t) }
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    cfg.root = parsed.root.as_deref().and_then(non_empty).map(PathBuf::from);
    if let Some(strip) = parsed.strip {
        cfg.strip_rules = StripRules::new(strip.rules.iter().map(|r| r.trim()));
    }
    if let Some(exts) = parsed.extensions {
        cfg.extensions = ExtensionWhitelist::new(&exts.exts);
    }
    if let Some(restrict) = parsed.restrict_extensions {
        cfg.restrict_extensions = restrict;
    }
    if parsed.recursive == Some(true) {
        cfg.mode = TraversalMode::Recursive;
    }
    if let Some(level) = parsed.log_level.as_deref().and_then(LogLevel::parse) {
        cfg.log_level = level;
    }
    cfg.log_file = parsed.log_file.as_deref().and_then(non_empty).map(PathBuf::from);
    if let Some(show) = parsed.show_progress {
        cfg.show_progress = show;
    }

    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    debug!(path = %path.display(), "Parsed config file");
    Ok(xml_to_config(parsed))
}

/// Locate and load the config file.
///
/// Search order:
///  - `explicit` (the `--config` flag): must exist.
///  - $NAME_CULLING_CONFIG: used if present, otherwise defaults apply.
///  - OS default path: a template is created on first run.
pub fn load_or_init(explicit: Option<&Path>) -> Result<LoadResult> {
    if let Some(p) = explicit {
        if !p.exists() {
            bail!("config file not found: {}", p.display());
        }
        return Ok(LoadResult::Loaded(load_config_from_xml_path(p)?, p.to_path_buf()));
    }

    let env_set = env::var_os(CONFIG_ENV).is_some_and(|v| !v.is_empty());
    let path = default_config_path()?;
    if path.exists() {
        let cfg = load_config_from_xml_path(&path)?;
        return Ok(LoadResult::Loaded(cfg, path));
    }
    if env_set {
        return Ok(LoadResult::Missing(path));
    }

    create_template_config(&path)?;
    Ok(LoadResult::CreatedTemplate(path))
}

/// Create the default template config file and parent directory (best-effort permissions).
/// Uses secure creation to avoid following attacker-controlled symlinks on Unix.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    write_config_secure_new_0600(path, TEMPLATE.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}

const TEMPLATE: &str = r#"<!--
  name_culling configuration (XML)

  root                 -> folder whose files are renamed (the ROOT argument overrides it)
  recursive            -> true: also rename files in subfolders (each file stays in its folder)
  restrict_extensions  -> true: only rename files whose extension is listed under <extensions>
  strip/rule           -> literal text removed from file names, applied in order
  extensions/ext       -> allowed extensions, without the dot
  log_level            -> quiet | normal | info | debug
  log_file             -> optional log file path
  show_progress        -> draw a progress bar while renaming

  Command-line flags override these values.
-->
<config>
  <root></root>
  <recursive>false</recursive>
  <restrict_extensions>true</restrict_extensions>
  <strip>
  </strip>
  <extensions>
    <ext>mp4</ext>
    <ext>mkv</ext>
  </extensions>
  <log_level>normal</log_level>
  <show_progress>true</show_progress>
</config>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let parsed: XmlConfig = from_xml_str(TEMPLATE).unwrap();
        let cfg = xml_to_config(parsed);
        assert!(cfg.root.is_none());
        assert!(cfg.strip_rules.is_empty());
        assert!(cfg.restrict_extensions);
        assert_eq!(cfg.mode, TraversalMode::Flat);
        assert!(cfg.extensions.contains("mkv"));
    }

    #[test]
    fn empty_xml_maps_to_defaults() {
        let cfg = xml_to_config(XmlConfig::default());
        assert!(cfg.root.is_none());
        assert!(cfg.restrict_extensions);
        assert!(cfg.show_progress);
        assert_eq!(cfg.log_level, LogLevel::Normal);
    }
}
