use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn permission_names(manifest: &Value) -> Vec<String> {
    manifest["manifest"]["uses-permission"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["$"]["android:name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn mobile_permissions_patches_manifest_and_plist_once() {
    let dir = TempDir::new().unwrap();
    let manifest = write_json(
        &dir,
        "AndroidManifest.json",
        &json!({
            "manifest": {
                "uses-permission": [
                    {"$": {"android:name": "android.permission.INTERNET"}}
                ]
            }
        }),
    );
    let plist = write_json(
        &dir,
        "Info.json",
        &json!({"NSCameraUsageDescription": "We need the camera"}),
    );

    Command::cargo_bin("console")
        .unwrap()
        .args(["mobile", "permissions", "--manifest"])
        .arg(&manifest)
        .arg("--info-plist")
        .arg(&plist)
        .assert()
        .success()
        .stdout(predicate::str::contains("added android.permission.CAMERA"))
        .stdout(predicate::str::contains("added NSMicrophoneUsageDescription"));

    let patched = read_json(&manifest);
    let names = permission_names(&patched);
    assert_eq!(names.len(), 6);
    assert_eq!(names[0], "android.permission.INTERNET");
    assert_eq!(
        read_json(&plist)["NSCameraUsageDescription"],
        "We need the camera"
    );

    Command::cargo_bin("console")
        .unwrap()
        .args(["mobile", "permissions", "--manifest"])
        .arg(&manifest)
        .arg("--info-plist")
        .arg(&plist)
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"))
        .stdout(predicate::str::contains("added").not());

    assert_eq!(read_json(&manifest), patched);
}

#[test]
fn mobile_permissions_fails_on_malformed_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = write_json(&dir, "AndroidManifest.json", &json!({"application": {}}));

    Command::cargo_bin("console")
        .unwrap()
        .args(["mobile", "permissions", "--manifest"])
        .arg(&manifest)
        .assert()
        .failure();
}

#[test]
fn search_rejects_invalid_pattern_before_connecting() {
    Command::cargo_bin("console")
        .unwrap()
        .args(["users", "search", "--pattern", "(unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pattern"));
}

#[test]
fn reset_from_missing_file_fails() {
    Command::cargo_bin("console")
        .unwrap()
        .args(["users", "reset-from-file", "--file", "/nonexistent/passwords.yaml"])
        .assert()
        .failure();
}

#[test]
fn ai_ping_without_key_fails() {
    Command::cargo_bin("console")
        .unwrap()
        .args(["ai", "ping"])
        .env_remove("GEMINI_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn ai_ping_does_not_need_configuration_file() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("console")
        .unwrap()
        .current_dir(dir.path())
        .args(["ai", "ping"])
        .env_remove("GEMINI_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"))
        .stderr(predicate::str::contains("configuration").not());
}
