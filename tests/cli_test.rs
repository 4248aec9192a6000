//! CLI integration tests for shortcut-discovery binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("shortcut-discovery"))
}

fn fixture() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/openapi.json")
        .to_str()
        .unwrap()
        .to_string()
}

// Helper to create a temp file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

mod discover_command {
    use super::*;

    #[test]
    fn prints_catalog() {
        let output = cmd()
            .args(["discover", "--spec", fixture().as_str()])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let catalog: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let streams = catalog["streams"].as_array().unwrap();
        assert_eq!(streams.len(), 12);
        assert_eq!(streams[0]["name"], "categories");
        assert_eq!(streams[0]["method"], "get");
        assert_eq!(streams[0]["primary_keys"], serde_json::json!(["id"]));
    }

    #[test]
    fn with_pretty() {
        cmd()
            .args(["discover", "--spec", fixture().as_str(), "--pretty"])
            .assert()
            .success()
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn with_output_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("catalog.json");

        cmd()
            .args([
                "discover",
                "--spec",
                fixture().as_str(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains(r#""name":"project_stories""#));
        assert!(content.contains(r#""parent":"projects""#));
    }

    #[test]
    fn with_valid_config() {
        let dir = TempDir::new().unwrap();
        let config = write_temp_file(&dir, "config.json", r#"{"token": "abc"}"#);

        cmd()
            .args([
                "discover",
                "--spec",
                fixture().as_str(),
                "--config",
                config.to_str().unwrap(),
            ])
            .assert()
            .success();
    }

    #[test]
    fn config_without_token_fails() {
        let dir = TempDir::new().unwrap();
        let config = write_temp_file(&dir, "config.json", "{}");

        cmd()
            .args([
                "discover",
                "--spec",
                fixture().as_str(),
                "--config",
                config.to_str().unwrap(),
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("token"));
    }

    #[test]
    fn runs_without_config() {
        cmd()
            .args(["discover", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("runs without credentials"));

        cmd()
            .args(["discover", "--spec", fixture().as_str()])
            .assert()
            .success()
            .stderr(predicate::str::contains("token").not());
    }

    #[test]
    fn spec_not_found_exit_code_3() {
        cmd()
            .args(["discover", "--spec", "/nonexistent/openapi.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn invalid_spec_exit_code_2() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", "not json");

        cmd()
            .args(["discover", "--spec", spec.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }

    #[test]
    fn missing_resource_path_exit_code_2() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", r#"{"paths": {}, "definitions": {}}"#);

        cmd()
            .args(["discover", "--spec", spec.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("no schema for GET /api/v3/categories"));
    }

    #[test]
    fn from_url() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/shortcut.swagger.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(fs::read_to_string(fixture()).unwrap())
            .create();

        cmd()
            .args([
                "discover",
                "--spec",
                format!("{}/shortcut.swagger.json", server.url()).as_str(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""name":"workflows""#));
    }
}

mod schema_command {
    use super::*;

    #[test]
    fn prints_final_schema() {
        cmd()
            .args(["schema", "members", "--spec", fixture().as_str()])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#""replaced_by":{"type":["string","null"],"format":"uuid"}"#,
            ))
            .stdout(predicate::str::contains("x-nullable").not())
            .stdout(predicate::str::contains("$ref").not());
    }

    #[test]
    fn unknown_stream() {
        cmd()
            .args(["schema", "stories", "--spec", fixture().as_str()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unknown resource: stories"));
    }
}

mod validate_command {
    use super::*;

    #[test]
    fn valid_json_array() {
        let dir = TempDir::new().unwrap();
        let records = write_temp_file(
            &dir,
            "records.json",
            r##"[
                {"id": 1, "name": "bug", "color": null},
                {"id": 2, "name": "feature", "color": "#ff0000"}
            ]"##,
        );

        cmd()
            .args([
                "validate",
                "labels",
                records.to_str().unwrap(),
                "--spec",
                fixture().as_str(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid (2 records)"));
    }

    #[test]
    fn valid_json_lines() {
        let dir = TempDir::new().unwrap();
        let records = write_temp_file(
            &dir,
            "records.jsonl",
            "{\"id\": 1, \"name\": \"Web\", \"description\": null}\n{\"id\": 2, \"name\": \"API\"}\n",
        );

        cmd()
            .args([
                "validate",
                "projects",
                records.to_str().unwrap(),
                "--spec",
                fixture().as_str(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid (2 records)"));
    }

    #[test]
    fn invalid_record_exit_code_1() {
        let dir = TempDir::new().unwrap();
        let records = write_temp_file(&dir, "records.json", r#"[{"id": "one", "name": "Web"}]"#);

        cmd()
            .args([
                "validate",
                "projects",
                records.to_str().unwrap(),
                "--spec",
                fixture().as_str(),
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("record 0: /id"));
    }

    #[test]
    fn json_output() {
        let dir = TempDir::new().unwrap();
        let records = write_temp_file(&dir, "records.json", r#"[{"id": "one", "name": "Web"}]"#);

        let output = cmd()
            .args([
                "validate",
                "projects",
                records.to_str().unwrap(),
                "--spec",
                fixture().as_str(),
                "--json",
            ])
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();

        let result: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(result["valid"], false);
        assert_eq!(result["records"], 1);
        assert_eq!(result["failed"][0]["record"], 0);
        assert_eq!(result["failed"][0]["errors"][0]["path"], "/id");
    }

    #[test]
    fn unreadable_records() {
        cmd()
            .args([
                "validate",
                "projects",
                "/nonexistent/records.json",
                "--spec",
                fixture().as_str(),
                "--json",
            ])
            .assert()
            .code(2)
            .stdout(predicate::str::contains(r#""valid":false"#));
    }
}

mod update_spec_command {
    use super::*;

    #[test]
    fn writes_snapshot() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/shortcut.swagger.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"swagger":"2.0","paths":{},"definitions":{}}"#)
            .create();

        let dir = TempDir::new().unwrap();
        let output = dir.path().join("openapi.json");

        cmd()
            .args([
                "update-spec",
                "--url",
                format!("{}/shortcut.swagger.json", server.url()).as_str(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("{\n  \"swagger\": \"2.0\""));
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn http_error_exit_code_3() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/shortcut.swagger.json")
            .with_status(500)
            .create();

        let dir = TempDir::new().unwrap();
        let output = dir.path().join("openapi.json");

        cmd()
            .args([
                "update-spec",
                "--url",
                format!("{}/shortcut.swagger.json", server.url()).as_str(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .code(3);

        assert!(!output.exists());
    }

    #[test]
    fn rejects_document_without_paths() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/shortcut.swagger.json")
            .with_status(200)
            .with_body(r#"{"swagger":"2.0"}"#)
            .create();

        let dir = TempDir::new().unwrap();
        let output = dir.path().join("openapi.json");

        cmd()
            .args([
                "update-spec",
                "--url",
                format!("{}/shortcut.swagger.json", server.url()).as_str(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .code(2);

        assert!(!output.exists());
    }
}
