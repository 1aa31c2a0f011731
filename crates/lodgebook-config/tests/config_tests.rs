use lodgebook_config::{Config, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert!(!cfg.date_format.is_empty());
}

#[test]
fn scan_root_defaults_under_the_data_root() {
    let mut cfg = Config::default();
    cfg.default_data_root = Some(std::path::PathBuf::from("/srv/lodgebook"));

    assert_eq!(
        cfg.resolve_document_scan_root(),
        std::path::PathBuf::from("/srv/lodgebook/scans")
    );
    assert_eq!(
        cfg.resolve_default_backup_root(),
        std::path::PathBuf::from("/srv/lodgebook/backups")
    );
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let mut cfg = Config::default();
    cfg.currency = "RUB".to_string();
    cfg.backup_retention = Some(10);

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "RUB");
    assert_eq!(loaded.backup_retention, Some(10));
}

#[test]
fn backup_and_restore_round_trip() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.locale = "ru-RU".to_string();
    let name = manager.backup(&cfg, Some("pre migration")).expect("backup");
    assert!(name.contains("pre-migration"));

    let restored = manager.restore(&name).expect("restore");
    assert_eq!(restored.locale, "ru-RU");

    let listed = manager.list_backups().expect("list");
    assert!(listed.contains(&name));
}

#[test]
fn prune_keeps_only_the_retained_backups() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.backup_retention = Some(1);
    manager.backup(&cfg, Some("one")).expect("backup");
    manager.backup(&cfg, Some("two")).expect("backup");
    manager.backup(&cfg, Some("three")).expect("backup");

    let removed = manager
        .prune_backups(cfg.backup_retention.unwrap())
        .expect("prune");
    assert_eq!(removed, 2);
    assert_eq!(manager.list_backups().expect("list").len(), 1);
}
