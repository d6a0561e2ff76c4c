use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use name_culling::config::{load_or_init, LoadResult, CONFIG_ENV};
use name_culling::{default_config_path, default_log_path};

#[test]
#[serial]
fn env_override_points_at_config_and_colocates_log() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("custom_config.xml");
    fs::write(&cfg, "<config><strip><rule>[x]</rule></strip></config>").unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg);
    }

    assert_eq!(default_config_path().unwrap(), cfg);
    assert_eq!(default_log_path().unwrap().parent(), cfg.parent());

    match load_or_init(None).unwrap() {
        LoadResult::Loaded(c, path) => {
            assert_eq!(path, cfg);
            assert_eq!(c.strip_rules.len(), 1);
        }
        other => panic!("expected Loaded, got {other:?}"),
    }

    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
}

#[test]
#[serial]
fn env_pointing_at_missing_file_uses_defaults_without_template() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("absent.xml");

    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg);
    }
    let result = load_or_init(None).unwrap();
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    assert!(matches!(result, LoadResult::Missing(_)));
    assert!(!cfg.exists(), "no template is written for an explicit location");
}

#[test]
#[serial]
fn explicit_config_flag_must_exist() {
    let td = tempdir().unwrap();
    let err = load_or_init(Some(&td.path().join("nope.xml"))).unwrap_err();
    assert!(err.to_string().contains("config file not found"));
}
