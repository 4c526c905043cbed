use assert_fs::TempDir;
use assert_fs::prelude::*;
use buildpatch_fs::{Error, WriteOptions, backup_path, io};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("gradle.properties");

    io::write_atomic(file.path(), b"android.useAndroidX=true\n", WriteOptions::default()).unwrap();

    file.assert("android.useAndroidX=true\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("build.gradle");
    file.write_str("original").unwrap();

    io::write_text(file.path(), "updated", WriteOptions::default()).unwrap();

    file.assert("updated");
    temp.child("build.gradle.bak").assert(predicate::path::missing());
}

#[test]
fn test_write_atomic_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("android/app/build.gradle");

    io::write_text(file.path(), "apply plugin: \"com.android.application\"\n", WriteOptions::default())
        .unwrap();

    file.assert(predicate::str::starts_with("apply plugin"));
}

#[test]
fn test_backup_keeps_previous_content() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("gradle.properties");
    file.write_str("android.enableJetifier=true\n").unwrap();

    io::write_text(
        file.path(),
        "android.enableJetifier=false\n",
        WriteOptions::with_backup(true),
    )
    .unwrap();

    file.assert("android.enableJetifier=false\n");
    temp.child("gradle.properties.bak")
        .assert("android.enableJetifier=true\n");
}

#[test]
fn test_backup_skipped_when_target_is_new() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("build.gradle");

    io::write_text(file.path(), "x", WriteOptions::with_backup(true)).unwrap();

    assert!(!backup_path(file.path()).exists());
}

#[test]
fn test_no_temp_files_left_behind() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("build.gradle");

    io::write_text(file.path(), "content", WriteOptions::default()).unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_read_text_existing_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("gradle.properties");
    file.write_str("hermesEnabled=true\n").unwrap();

    assert_eq!(io::read_text(file.path()).unwrap(), "hermesEnabled=true\n");
}

#[test]
fn test_read_text_nonexistent_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.gradle");

    let err = io::read_text(&missing).unwrap_err();

    match &err {
        Error::Io { path, .. } => assert_eq!(path, &missing),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("nope.gradle"));
}

#[test]
fn test_read_text_rejects_invalid_utf8() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("latin1.properties");
    file.write_binary(&[0x6b, 0x3d, 0xe9, 0x0a]).unwrap();

    assert!(matches!(io::read_text(file.path()), Err(Error::Io { .. })));
}
