use assert_cmd::prelude::*;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::Command;

fn is_numbered_rs(entry: &fs::DirEntry) -> bool {
    let path = entry.path();
    path.is_file()
        && path.extension() == Some(OsStr::new("rs"))
        && path
            .file_name()
            .and_then(OsStr::to_str)
            .and_then(|n| n.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
}

#[test]
fn every_demo_runs_against_fixtures() {
    let entries = fs::read_dir(Path::new("examples")).expect("read examples dir");
    let mut names: Vec<String> = entries
        .flatten()
        .filter(is_numbered_rs)
        .filter_map(|e| e.path().file_stem().and_then(OsStr::to_str).map(str::to_string))
        .collect();
    names.sort();
    assert!(!names.is_empty(), "no demos found to run");
    for name in names {
        Command::new("cargo")
            .arg("run")
            .arg("--example")
            .arg(&name)
            .env_remove("NAVCHART_DEMO_FUND")
            .assert()
            .success();
    }
}
