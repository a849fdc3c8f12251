#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::sync::mpsc;

use bootmount::{ErrorCode, Provisioner};
use tempfile::tempdir;

fn linux() -> Provisioner {
    Provisioner::default()
}

#[test]
fn creates_directory_with_no_access_bits() {
    let td = tempdir().unwrap();
    let data = td.path().join("data");

    linux().ensure_dir_sync(&data).expect("ensure_dir_sync");

    assert!(data.is_dir());
    let mode = fs::metadata(&data).unwrap().permissions().mode() & 0o7777;
    assert_eq!(mode, 0, "created directory should carry mode 0000");
}

#[test]
fn second_call_is_not_an_error() {
    let td = tempdir().unwrap();
    let data = td.path().join("data");
    let p = linux();

    p.ensure_dir_sync(&data).unwrap();
    p.ensure_dir_sync(&data).expect("existing directory must be tolerated");
}

#[test]
fn nested_paths_with_configured_mode() {
    let td = tempdir().unwrap();
    let nested = td.path().join("run").join("boot").join("state");

    linux()
        .with_dir_mode(0o700)
        .ensure_dir_sync(&nested)
        .unwrap();

    assert!(nested.is_dir());
    let mode = fs::metadata(&nested).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o700);
}

#[test]
fn existing_file_at_path_counts_as_exists() {
    let td = tempdir().unwrap();
    let occupied = td.path().join("occupied");
    fs::write(&occupied, b"x").unwrap();

    linux()
        .ensure_dir_sync(&occupied)
        .expect("EEXIST is swallowed regardless of entry type");
    assert!(occupied.is_file());
}

#[test]
fn component_that_is_a_file_propagates() {
    let td = tempdir().unwrap();
    let file = td.path().join("file");
    fs::write(&file, b"x").unwrap();

    let err = linux()
        .with_dir_mode(0o700)
        .ensure_dir_sync(file.join("child"))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Unknown);
    assert_eq!(err.raw_os_error(), Some(libc::ENOTDIR));
    assert_eq!(err.op(), "mkdirp");
}

#[test]
fn completion_form_reports_exactly_once() {
    let td = tempdir().unwrap();
    let data = td.path().join("data");
    let (tx, rx) = mpsc::channel();

    let p = linux();
    let first = tx.clone();
    p.ensure_dir(&data, move |res| first.send(res.map_err(|e| e.code())).unwrap());
    p.ensure_dir(&data, move |res| tx.send(res.map_err(|e| e.code())).unwrap());

    let results: Vec<_> = rx.iter().collect();
    assert_eq!(results, vec![Ok(()), Ok(())]);
}
