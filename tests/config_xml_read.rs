//! Verify XML config is parsed and used without touching user state.

use std::fs;
use tempfile::tempdir;

use name_culling::config::{create_template_config, load_config_from_xml_path};
use name_culling::{LogLevel, TraversalMode};

#[test]
fn reads_config_xml_and_applies_values() {
    let td = tempdir().expect("create tempdir");
    let cfg_path = td.path().join("config.xml");
    let root = td.path().join("videos");
    let log_file = td.path().join("name_culling.log");

    let xml = format!(
        r#"
<config>
  <root>{}</root>
  <recursive>true</recursive>
  <restrict_extensions>false</restrict_extensions>
  <strip>
    <rule>[www.site.com]</rule>
    <rule>  (1080p)  </rule>
    <rule>   </rule>
  </strip>
  <extensions>
    <ext>.mp4</ext>
    <ext>mkv</ext>
  </extensions>
  <log_level>debug</log_level>
  <log_file>{}</log_file>
  <show_progress>false</show_progress>
</config>
"#,
        root.display(),
        log_file.display()
    );
    fs::write(&cfg_path, xml).expect("write config.xml");

    let cfg = load_config_from_xml_path(&cfg_path).expect("load_config_from_xml_path");

    assert_eq!(cfg.root.as_deref(), Some(root.as_path()));
    assert_eq!(cfg.mode, TraversalMode::Recursive);
    assert!(!cfg.restrict_extensions);
    assert_eq!(
        cfg.strip_rules.iter().collect::<Vec<_>>(),
        vec!["[www.site.com]", "(1080p)"],
        "rules keep order, are trimmed, and blank rules are dropped"
    );
    assert!(cfg.extensions.contains("mp4"));
    assert!(cfg.extensions.contains("mkv"));
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.log_file.as_deref(), Some(log_file.as_path()));
    assert!(!cfg.show_progress);
    assert!(cfg.whitelist().is_none());
}

#[test]
fn unknown_field_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><root>/tmp</root><bogus>1</bogus></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}

#[test]
fn malformed_xml_is_an_error() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><root>/tmp</config>").unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err:#}").contains("parse config xml"));
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><root>/srv/media</root></config>").unwrap();
    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert!(cfg.strip_rules.is_empty());
    assert!(cfg.restrict_extensions);
    assert_eq!(cfg.mode, TraversalMode::Flat);
    assert_eq!(cfg.log_level, LogLevel::Normal);
}

#[test]
fn template_is_created_and_loadable() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("name_culling").join("config.xml");
    create_template_config(&cfg_path).expect("create template");
    assert!(cfg_path.exists());

    let cfg = load_config_from_xml_path(&cfg_path).expect("template parses");
    assert!(cfg.root.is_none());
    assert!(cfg.strip_rules.is_empty());

    // a second call must not clobber the user's file
    assert!(create_template_config(&cfg_path).is_err());
}
