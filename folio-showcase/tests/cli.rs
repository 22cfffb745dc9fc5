use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn help_mentions_script_options() {
    let mut cmd = cargo_bin_cmd!("folio-showcase");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--script"))
        .stdout(predicate::str::contains("--projects"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn default_run_ends_on_a_project_panel() {
    let mut cmd = cargo_bin_cmd!("folio-showcase");
    cmd.env("FOLIO_CAROUSEL_CONFIG", "/nonexistent/carousel.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 projects"))
        .stdout(predicate::str::contains("Data Analytics Dashboard"));
}

#[test]
fn click_updates_the_panel() {
    let mut cmd = cargo_bin_cmd!("folio-showcase");
    cmd.args(["--script", "wait:100,click:10,wait:700"])
        .env("FOLIO_CAROUSEL_CONFIG", "/nonexistent/carousel.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Task Management System [Web Application]"))
        .stdout(predicate::str::contains(
            "see codebase > https://github.com/username/task-manager",
        ));
}

#[test]
fn json_output_is_parseable() {
    let mut cmd = cargo_bin_cmd!("folio-showcase");
    let output = cmd
        .args(["--json", "--script", "wait:100 click:9 wait:700"])
        .env("FOLIO_CAROUSEL_CONFIG", "/nonexistent/carousel.toml")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["projects"], 4);
    assert_eq!(value["steps"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["steps"][2]["active_index"], 1);
    assert_eq!(value["steps"][2]["panel"]["title"], "E-Portfolio");
}

#[test]
fn bad_script_fails_with_context() {
    let mut cmd = cargo_bin_cmd!("folio-showcase");
    cmd.args(["--script", "teleport:4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown step 'teleport:4'"));
}

#[test]
fn custom_catalog_and_config_are_used() {
    let mut catalog = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    catalog
        .write_all(
            br#"[
                {"id":"a","title":"Alpha","category":"Tools"},
                {"id":"b","title":"Beta","category":"Tools","websiteUrl":"https://beta.dev"}
            ]"#,
        )
        .unwrap();
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    config.write_all(b"buffer_copies = 3\nitem_gap = 16.0\n").unwrap();

    let mut cmd = cargo_bin_cmd!("folio-showcase");
    cmd.arg("--projects")
        .arg(catalog.path())
        .arg("--config")
        .arg(config.path())
        .args(["--script", "wait:100 visit:1 wait:700"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 projects"))
        .stdout(predicate::str::contains("see website > https://beta.dev"));
}

#[test]
fn missing_catalog_is_reported() {
    let mut cmd = cargo_bin_cmd!("folio-showcase");
    cmd.args(["--projects", "/nonexistent/projects.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading project catalog"));
}
