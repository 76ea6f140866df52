use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hash_assets() -> Command {
    let mut cmd = Command::cargo_bin("hash-assets").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn hashes_and_reports_count() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("assets");
    fs::create_dir_all(root.join("js")).unwrap();
    fs::create_dir_all(root.join("css")).unwrap();
    fs::write(root.join("js/app.js"), "console.log(1)").unwrap();
    fs::write(root.join("css/site.css"), "a{}").unwrap();

    hash_assets()
        .arg(&root)
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 asset files hashed"))
        .stdout(predicate::str::contains("included file extensions: js, css"));

    assert!(root.join("manifest.json").is_file());
}

#[test]
fn custom_suffix_and_extension() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("assets");
    fs::create_dir_all(root.join("svg")).unwrap();
    fs::write(root.join("svg/logo.svg"), "<svg/>").unwrap();

    hash_assets()
        .arg(&root)
        .args(["-e", "svg", "-s", "fp", "--no-progress"])
        .assert()
        .success();

    let produced: Vec<_> = fs::read_dir(root.join("svg-fp")).unwrap().collect();
    assert_eq!(produced.len(), 1);
}

#[test]
fn missing_dir_exits_non_zero() {
    let dir = TempDir::new().unwrap();

    hash_assets()
        .arg(dir.path().join("assets"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn path_without_assets_segment_is_reported() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("static");
    fs::create_dir_all(root.join("js")).unwrap();
    fs::write(root.join("js/app.js"), "x").unwrap();

    hash_assets()
        .arg(&root)
        .args(["-e", "js", "--no-progress"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no 'assets/' segment"));
}

#[test]
fn no_assets_dir_anywhere_fails() {
    hash_assets()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no assets directory given"));
}
