//! CLI integration tests against the built binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

fn bridgework() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bridgework"))
}

#[test]
fn test_cli_help() {
    bridgework().arg("--help").assert().success();
}

#[test]
fn test_list_uses_builtin_catalog_without_config() {
    let dir = tempdir().unwrap();

    bridgework()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("MyCheckbox <my-checkbox> onMyChange→myChange"))
        .stdout(contains("MyRadioGroup <my-radio-group>"));
}

#[test]
fn test_render_prints_markup() {
    let dir = tempdir().unwrap();

    bridgework()
        .current_dir(dir.path())
        .args(["render", "my-checkbox", "-p", "checked=true", "-p", "label=Accept"])
        .assert()
        .success()
        .stdout(r#"<my-checkbox checked label="Accept"></my-checkbox>
"#);
}

#[test]
fn test_render_unknown_tag_fails() {
    let dir = tempdir().unwrap();

    bridgework()
        .current_dir(dir.path())
        .args(["render", "my-slider"])
        .assert()
        .failure()
        .stderr(contains("Unknown element: my-slider"));
}

#[test]
fn test_init_then_generate() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("src/components.ts");

    bridgework()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    assert!(dir.path().join("bridgework.toml").exists());

    bridgework()
        .current_dir(dir.path())
        .args(["generate", "-o"])
        .arg(&out)
        .assert()
        .success();

    let module = fs::read_to_string(&out).unwrap();
    assert!(module.contains("export const MyRange = typeof window !== 'undefined'"));
    assert!(module.contains("import { renderToString } from \"component-library/hydrate\";"));
}

#[test]
fn test_malformed_config_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bridgework.toml"), "[[elements]]\ntag = \"nohyphen\"\n").unwrap();

    bridgework()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("Invalid custom element tag: nohyphen"));
}

#[test]
fn test_generate_to_stdout_uses_manifest_elements() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("bridgework.toml"),
        r#"
[generate]
package = "@acme/ui"

[[elements]]
tag = "acme-badge"
"#,
    )
    .unwrap();

    bridgework()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(contains("type AcmeBadgeEvents = NonNullable<unknown>;"))
        .stdout(contains("from \"@acme/ui/components/acme-badge.js\"").and(contains("MyButton").not()));
}
