//
//  teamcity-cli
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `tcity` isolated from the user's config and environment.
fn tcity(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tcity").unwrap();
    cmd.env("TCITY_CONFIG", home.path().join("config.toml"))
        .env_remove("TCITY_OUTPUT")
        .env_remove("TCITY_DEBUG")
        .env_remove("NO_COLOR")
        .arg("--no-color");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    tcity(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tcity version"));
}

#[test]
fn test_decode_unknown_trigger_as_json() {
    let home = TempDir::new().unwrap();
    let input = write(
        &home,
        "trigger.json",
        r#"{"id": "T9", "type": "newFutureThing",
            "properties": {"count": 1, "property": [{"name": "x", "value": "1"}]}}"#,
    );
    let output = tcity(&home)
        .args(["decode", "trigger", "--json"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["type"], "newFutureThing");
    assert_eq!(json[0]["properties"]["property"][0]["name"], "x");
}

#[test]
fn test_decode_strict_rejects_generic() {
    let home = TempDir::new().unwrap();
    let input = write(
        &home,
        "trigger.json",
        r#"{"type": "newFutureThing", "properties": {"count": 0}}"#,
    );
    tcity(&home)
        .args(["decode", "trigger", "--strict"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No typed variant for: newFutureThing"));
}

#[test]
fn test_decode_missing_required_property() {
    let home = TempDir::new().unwrap();
    let input = write(
        &home,
        "trigger.json",
        r#"{"type": "buildDependencyTrigger", "properties": {"count": 0}}"#,
    );
    tcity(&home)
        .args(["decode", "trigger"])
        .arg(&input)
        .assert()
        .code(8)
        .stderr(predicate::str::contains("dependsOn"));
}

#[test]
fn test_decode_malformed_input() {
    let home = TempDir::new().unwrap();
    let input = write(&home, "broken.json", "{\"type\": ");
    tcity(&home)
        .args(["decode", "step"])
        .arg(&input)
        .assert()
        .code(3);
}

#[test]
fn test_decode_wrong_shape_bag() {
    let home = TempDir::new().unwrap();
    let input = write(&home, "options.json", r#"{"property": 5}"#);
    tcity(&home)
        .args(["decode", "options"])
        .arg(&input)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("expected a sequence"));
}

#[test]
fn test_decode_envelope_array_without_type() {
    let home = TempDir::new().unwrap();
    let input = write(&home, "steps.json", r#"[{"id": "x"}]"#);
    tcity(&home)
        .args(["decode", "step"])
        .arg(&input)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("missing field `type`"));
}

#[test]
fn test_encode_wrong_shape_document() {
    let home = TempDir::new().unwrap();
    let input = write(&home, "params.yaml", "name: p
value: v1
");
    tcity(&home)
        .args(["encode", "parameters"])
        .arg(&input)
        .assert()
        .code(3);
}

#[test]
fn test_decode_options_as_yaml() {
    let home = TempDir::new().unwrap();
    let input = write(
        &home,
        "options.json",
        r#"{"count": 1, "property": [{"name": "allowPersonalBuildTriggering", "value": "false"}]}"#,
    );
    tcity(&home)
        .args(["decode", "options", "-o", "yaml"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("allow_personal_build_triggering: false"))
        .stdout(predicate::str::contains("build_counter: 1"));
}

#[test]
fn test_decode_parameters_masks_passwords() {
    let home = TempDir::new().unwrap();
    let input = write(
        &home,
        "params.json",
        r#"{"count": 2, "property": [
            {"name": "env.TOKEN", "value": "hunter2", "type": {"rawValue": "password"}},
            {"name": "system.version", "value": "1.2.3"}
        ]}"#,
    );
    tcity(&home)
        .args(["decode", "parameters"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("******"))
        .stdout(predicate::str::contains("1.2.3"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_encode_parameters_from_yaml() {
    let home = TempDir::new().unwrap();
    let input = write(
        &home,
        "params.yaml",
        "- name: p\n  value: v1\n- namespace: system\n  name: s\n  value: v2\n- namespace: env\n  name: e\n  value: v3\n",
    );
    let out = home.path().join("params.json");
    tcity(&home)
        .args(["encode", "parameters"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let json = read_json(&out);
    assert_eq!(json["count"], 3);
    assert_eq!(json["property"][1]["name"], "system.s");
    assert_eq!(json["property"][2]["name"], "env.e");
}

#[test]
fn test_encode_trigger_list() {
    let home = TempDir::new().unwrap();
    let input = write(
        &home,
        "triggers.yaml",
        "- type: vcsTrigger\n  id: T1\n  options:\n    branch_filter: ['+:*']\n\
         - type: newFutureThing\n  id: T2\n  properties:\n    count: 1\n    property:\n      - name: x\n        value: '1'\n",
    );
    let output = tcity(&home)
        .args(["encode", "trigger", "--compact"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["trigger"][0]["type"], "vcsTrigger");
    assert_eq!(json["trigger"][1]["properties"]["property"][0]["value"], "1");
}

#[test]
fn test_decode_then_encode_git_root() {
    let home = TempDir::new().unwrap();
    let input = write(
        &home,
        "root.json",
        r#"{"name": "App", "vcsName": "jetbrains.git", "properties": {"count": 2, "property": [
            {"name": "url", "value": "https://example.com/app.git"},
            {"name": "branch", "value": "refs/heads/main"}
        ]}}"#,
    );
    let decoded = tcity(&home)
        .args(["decode", "git", "-o", "yaml"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(decoded.status.success());
    let yaml = write(&home, "root.yaml", &String::from_utf8(decoded.stdout).unwrap());

    let out = home.path().join("bag.json");
    tcity(&home)
        .args(["encode", "git"])
        .arg(&yaml)
        .arg("-O")
        .arg(&out)
        .assert()
        .success();
    let json = read_json(&out);
    let names: Vec<_> = json["property"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert!(names.contains(&"url".to_string()));
    assert!(names.contains(&"branch".to_string()));
}

#[test]
fn test_descriptor_render_and_parse() {
    let home = TempDir::new().unwrap();
    tcity(&home)
        .args(["descriptor", "render", "--control-type", "password", "--label", "X"])
        .assert()
        .success()
        .stdout("password label='X'\n");

    tcity(&home)
        .args(["descriptor", "parse", "label='X' password", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"X\""))
        .stdout(predicate::str::contains("controlType").not());
}

#[test]
fn test_descriptor_render_nothing_fails() {
    let home = TempDir::new().unwrap();
    tcity(&home)
        .args(["descriptor", "render"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to render"));
}

#[test]
fn test_config_set_get_and_output_default() {
    let home = TempDir::new().unwrap();
    tcity(&home)
        .args(["config", "set", "output", "json"])
        .assert()
        .success();
    tcity(&home)
        .args(["config", "get", "output"])
        .assert()
        .success()
        .stdout("json\n");

    // the configured format applies without -o
    let input = write(
        &home,
        "step.json",
        r#"{"type": "simpleRunner", "properties": {"count": 1, "property": [
            {"name": "script.content", "value": "make"}
        ]}}"#,
    );
    let output = tcity(&home).args(["decode", "step"]).arg(&input).output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["options"]["script"], "make");
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    tcity(&home)
        .args(["config", "set", "editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key 'editor'"));
}

#[test]
fn test_config_path_honours_env() {
    let home = TempDir::new().unwrap();
    tcity(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
