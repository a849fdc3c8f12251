use assert_fs::TempDir;
use bootmount::{Config, Provisioner};
use std::fs;
use std::path::PathBuf;

#[test]
fn log_file_under_missing_directory_is_allowed() {
    let td = TempDir::new().unwrap();
    let cfg = Config {
        log_file: Some(td.path().join("logs").join("boot.log")),
        ..Default::default()
    };
    cfg.validate().expect("parent is created when logging starts");
}

#[test]
fn log_file_pointing_at_directory_fails() {
    let td = TempDir::new().unwrap();
    let dir = td.path().join("logs");
    fs::create_dir_all(&dir).unwrap();
    let cfg = Config {
        log_file: Some(dir),
        ..Default::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("is a directory"), "err: {err}");
}

#[test]
fn relative_marker_fails() {
    let cfg = Config {
        marker_path: PathBuf::from("run/.containerenv"),
        ..Default::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn provisioner_takes_settings_from_config() {
    let cfg = Config {
        marker_path: PathBuf::from("/run/.containerenv"),
        dir_mode: 0o750,
        ..Default::default()
    };
    cfg.validate().unwrap();
    let p = Provisioner::from_config(&cfg);
    assert_eq!(p.marker_path(), cfg.marker_path.as_path());
    assert_eq!(p.dir_mode(), 0o750);
}
