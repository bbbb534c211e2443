use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Writes a schema document for `apps:create` into `dir`.
fn write_apps_schema(dir: &TempDir) -> PathBuf {
    let yaml = r#"
topic: apps
command: create
description: Create a new app
flags:
  - name: region
    char: r
    has_value: true
    required: true
    description: region to create in
    transform: { kind: choice, options: [us, eu] }
  - name: size
    char: s
    transform: { kind: integer }
  - name: json
    char: j
  - name: verbose
    char: v
    hidden: true
args:
  - name: app
  - name: dyno
    optional: true
"#;
    let path = dir.path().join("apps.yml");
    fs::write(&path, yaml).expect("failed to write schema");
    path
}

fn argspec(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argspec"))
        .args(args)
        .env_remove("ARGSPEC_LOG")
        .output()
        .expect("failed to run argspec")
}

fn resolve(schema: &PathBuf, tokens: &[&str]) -> Output {
    let mut args = vec!["resolve", "--schema", schema.to_str().unwrap(), "--"];
    args.extend_from_slice(tokens);
    argspec(&args)
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

#[test]
fn resolve_prints_json_output() {
    let dir = TempDir::new().unwrap();
    let schema = write_apps_schema(&dir);

    let output = resolve(&schema, &["-jv", "--region=eu", "-s", "2", "myapp"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "flags": {"json": true, "verbose": true, "region": "eu", "size": 2},
            "argv": ["myapp"],
            "args": {"app": "myapp"}
        })
    );
}

#[test]
fn resolve_yaml_format() {
    let dir = TempDir::new().unwrap();
    let schema = write_apps_schema(&dir);

    let output = argspec(&[
        "resolve",
        "--schema",
        schema.to_str().unwrap(),
        "--format",
        "yaml",
        "--",
        "-r",
        "us",
        "myapp",
        "web",
    ]);
    assert!(output.status.success());

    let value: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(value["args"]["dyno"], serde_yaml::Value::from("web"));
    assert_eq!(value["flags"]["region"], serde_yaml::Value::from("us"));
}

#[test]
fn resolve_usage_error_exits_with_two() {
    let dir = TempDir::new().unwrap();
    let schema = write_apps_schema(&dir);

    let output = resolve(&schema, &["-r", "eu", "a", "b", "c"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr).trim(),
        "error: Unexpected argument c"
    );
}

#[test]
fn resolve_missing_required_flag() {
    let dir = TempDir::new().unwrap();
    let schema = write_apps_schema(&dir);

    let output = resolve(&schema, &["myapp"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Missing required flag --region"));
}

#[test]
fn resolve_transform_failure_exits_with_one() {
    let dir = TempDir::new().unwrap();
    let schema = write_apps_schema(&dir);

    let output = resolve(&schema, &["--region", "ap", "myapp"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("Expected --region=one of: us, eu but received: ap")
    );
}

#[test]
fn resolve_missing_schema_file() {
    let dir = TempDir::new().unwrap();
    let output = resolve(&dir.path().join("nope.yml"), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_good_schema() {
    let dir = TempDir::new().unwrap();
    let schema = write_apps_schema(&dir);

    let output = argspec(&["validate", schema.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Validated 1 schema document(s)."));
}

#[test]
fn validate_reports_duplicate_short_flag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    let json = serde_json::json!({
        "topic": "apps",
        "flags": [
            {"name": "verbose", "char": "v"},
            {"name": "version", "char": "v"}
        ]
    });
    fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();

    let output = argspec(&["validate", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate short flag: -v"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// usage
// ---------------------------------------------------------------------------

#[test]
fn usage_renders_visible_flags() {
    let dir = TempDir::new().unwrap();
    let schema = write_apps_schema(&dir);

    let output = argspec(&["usage", "--schema", schema.to_str().unwrap(), "--bin", "heroku"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Usage: heroku apps:create APP [DYNO]\n"));
    assert!(stdout.contains("-r, --region REGION"));
    assert!(stdout.contains("(required) region to create in"));
    assert!(stdout.contains("-s, --size SIZE"));
    assert!(!stdout.contains("--verbose"));
}
