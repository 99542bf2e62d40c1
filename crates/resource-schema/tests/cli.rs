//! Integration tests for the resource-schema binary.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

const DEFINITIONS: &str = r#"{
    "k8s.io/api/apps/v1.Deployment": {
        "schema": {
            "description": "Deployment enables declarative updates for Pods and ReplicaSets.",
            "type": "object",
            "properties": {
                "kind": { "type": "string" },
                "apiVersion": { "type": "string" },
                "spec": { "default": {}, "$ref": "k8s.io/api/apps/v1.DeploymentSpec" }
            }
        }
    },
    "k8s.io/api/apps/v1.DeploymentSpec": {
        "schema": {
            "type": "object",
            "properties": {
                "replicas": { "type": "integer", "format": "int32" },
                "template": { "$ref": "k8s.io/api/core/v1.PodTemplateSpec" }
            }
        }
    },
    "k8s.io/api/core/v1.PodTemplateSpec": {
        "schema": {
            "type": "object",
            "properties": {
                "containers": {
                    "type": "array",
                    "items": { "$ref": "k8s.io/api/core/v1.Container" }
                }
            }
        }
    },
    "k8s.io/api/core/v1.Container": {
        "schema": {
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": { "type": "string" },
                "imagePullPolicy": { "type": "string", "enum": ["Always", "IfNotPresent", "Never"] }
            }
        }
    },
    "Unqualified": { "schema": { "type": "object" } }
}"#;

/// A command isolated from the user's global config.
fn command(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("resource-schema"));
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir)
        .env_remove("RUST_LOG");
    cmd
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn generates_one_file_per_definition() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("openapi")).unwrap();
    std::fs::write(dir.path().join("openapi/definitions.json"), DEFINITIONS).unwrap();

    let output = command(dir.path()).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Unqualified resolve err: "));

    let schema_dir = dir.path().join("doc/schema");
    let mut files: Vec<String> = std::fs::read_dir(&schema_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(
        files,
        vec![
            "apps_v1_Deployment.json",
            "apps_v1_DeploymentSpec.json",
            "core_v1_Container.json",
            "core_v1_PodTemplateSpec.json",
        ]
    );

    let deployment = read_json(&schema_dir.join("apps_v1_Deployment.json"));
    assert_eq!(deployment["title"], "apps_v1_Deployment");
    assert_eq!(deployment["type"], "object");
    assert_eq!(deployment["properties"]["kind"]["const"], "Deployment");
    assert_eq!(deployment["properties"]["apiVersion"]["const"], "apps/v1");

    let container = &deployment["properties"]["spec"]["properties"]["template"]["properties"]
        ["containers"]["items"]["properties"];
    assert_eq!(
        container["imagePullPolicy"]["enum"],
        serde_json::json!(["Always", "IfNotPresent", "Never"])
    );

    let container_doc = read_json(&schema_dir.join("core_v1_Container.json"));
    assert_eq!(container_doc["required"], serde_json::json!(["name"]));
}

#[test]
fn flags_override_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("defs.json"), DEFINITIONS).unwrap();
    std::fs::create_dir_all(dir.path().join(".resource-schema")).unwrap();
    std::fs::write(
        dir.path().join(".resource-schema/config.toml"),
        "[output]\ndir = \"from-config\"\n",
    )
    .unwrap();

    command(dir.path())
        .args(["defs.json", "--output", "from-flag", "--pretty", "--no-parallel"])
        .assert()
        .success();

    assert!(!dir.path().join("from-config").exists());
    let content =
        std::fs::read_to_string(dir.path().join("from-flag/core_v1_Container.json")).unwrap();
    assert!(content.starts_with("{\n  \"properties\""));
}

#[test]
fn missing_catalog_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    command(dir.path())
        .arg("nothing-here.json")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn schema_flag_prints_config_schema() {
    let dir = TempDir::new().unwrap();
    let output = command(dir.path()).arg("--schema").output().unwrap();
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["format"], "toml");
    assert!(response["schema"].is_object());
}
