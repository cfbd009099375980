//! End-to-end tests of the `shotpath` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TEMPLATE: &str = "/{@show}/{@sequence}/{#product}/{@show}{_@sequence}{_@version}.{#extension}";

/// A command isolated from the developer's own project config.
fn shotpath() -> (Command, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("shotpath").unwrap();
    cmd.env("SHOTPATH_CONFIG_PATH", dir.path());
    cmd.env_remove("SHOTPATH_TEMPLATE");
    cmd.env_remove("SHOTPATH_STYLE");
    (cmd, dir)
}

#[test]
fn build_produces_the_expected_path() {
    let (mut cmd, _dir) = shotpath();
    cmd.args(["--template", TEMPLATE, "build"])
        .args(["show=rrr", "sequence=fb2", "product=renders", "version=v001", "extension=exr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/rrr/fb2/renders/rrr_fb2_v001.exr"));
}

#[test]
fn parse_recovers_the_values() {
    let (mut cmd, _dir) = shotpath();
    cmd.args(["--template", TEMPLATE, "parse", "/rrr/fb2/renders/rrr_fb2_v001.exr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show = rrr"))
        .stdout(predicate::str::contains("version = v001"));
}

#[test]
fn parse_rejects_a_foreign_path() {
    let (mut cmd, _dir) = shotpath();
    cmd.args(["--template", TEMPLATE, "parse", "/rrr/fb2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("count mismatch"));
}

#[test]
fn check_reports_template_errors() {
    let (mut cmd, _dir) = shotpath();
    cmd.args(["--template", "/{@show}/{@a}{?_@b}{?_@c}", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too many optional tokens"));
}

#[test]
fn check_accepts_the_builtin_default_template() {
    let (mut cmd, _dir) = shotpath();
    cmd.arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok:"));
}

#[test]
fn keys_view_filters_editable_tokens() {
    let (mut cmd, _dir) = shotpath();
    cmd.args(["--template", TEMPLATE, "keys", "--view", "editable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("product").not());
}

#[test]
fn build_rejects_values_outside_the_naming_style() {
    let (mut cmd, _dir) = shotpath();
    cmd.args(["--template", TEMPLATE, "build", "show=has_underscore"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not fit the naming style"));
}

#[test]
fn json_output_is_machine_readable() {
    let (mut cmd, _dir) = shotpath();
    let output = cmd
        .args(["--template", TEMPLATE, "--json", "parse", "/rrr/fb2/renders/rrr_fb2_v001.exr"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let mapping: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(mapping["show"], "rrr");
    assert_eq!(mapping["extension"], "exr");
}

#[test]
fn template_is_read_from_the_project_config() {
    let (mut cmd, dir) = shotpath();
    let config_dir = dir.path().join(".shotpath");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.yaml"),
        "template: \"/{@show}/{@shot}\"\n",
    )
    .unwrap();

    cmd.args(["parse", "/rrr/0010"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shot = 0010"));
}
