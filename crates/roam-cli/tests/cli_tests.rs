use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn roam_cmd(data_file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("roam").expect("Failed to find roam binary");
    cmd.arg("--no-color")
        .arg("--data-file")
        .arg(data_file);
    cmd
}

fn create_kyoto(data_file: &Path) {
    roam_cmd(data_file)
        .args([
            "create",
            "Kyoto",
            "--region",
            "Kansai",
            "--start-date",
            "2024-03-01",
            "--days",
            "3",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_create_trip_success() {
    let temp_dir = create_cli_test_environment();
    let data_file = temp_dir.path().join("trips.json");

    roam_cmd(&data_file)
        .args([
            "create",
            "Kyoto",
            "--region",
            "Kansai",
            "--start-date",
            "2024-03-01",
            "--days",
            "3",
            "--types",
            "temple,food",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created trip with ID: 1"))
        .stdout(predicate::str::contains("# 1. Kyoto"))
        .stdout(predicate::str::contains("- Interests: temple, food"))
        .stdout(predicate::str::contains("### Day 3 (2024-03-03)"));

    assert!(data_file.exists());
}

#[test]
fn test_cli_list_empty_trips() {
    let temp_dir = create_cli_test_environment();
    let data_file = temp_dir.path().join("trips.json");

    roam_cmd(&data_file)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_no_subcommand_lists_trips() {
    let temp_dir = create_cli_test_environment();
    let data_file = temp_dir.path().join("trips.json");
    create_kyoto(&data_file);

    roam_cmd(&data_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Trips"))
        .stdout(predicate::str::contains("## Kyoto (ID: 1)"));
}

#[test]
fn test_cli_update_plan_and_show() {
    let temp_dir = create_cli_test_environment();
    let data_file = temp_dir.path().join("trips.json");
    create_kyoto(&data_file);

    roam_cmd(&data_file)
        .args([
            "update",
            "1",
            r#"{"plan": [{"day_index": 2, "items": [{"id": "a", "title": "Lunch", "time": "12:00"}]}]}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated trip with ID: 1"))
        .stdout(predicate::str::contains("Changes made:\n- plan"));

    roam_cmd(&data_file)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "### Day 2 (2024-03-02)\n\n- **12:00** Lunch `a`",
        ))
        .stdout(predicate::str::contains("- Region: Kansai"));
}

#[test]
fn test_cli_update_from_stdin() {
    let temp_dir = create_cli_test_environment();
    let data_file = temp_dir.path().join("trips.json");
    create_kyoto(&data_file);

    roam_cmd(&data_file)
        .args(["update", "1", "-"])
        .write_stdin(r#"{"name": "Kyoto in spring", "budget_twd": 42000}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Kyoto in spring"))
        .stdout(predicate::str::contains("- Budget: 42000"));
}

#[test]
fn test_cli_json_output() {
    let temp_dir = create_cli_test_environment();
    let data_file = temp_dir.path().join("trips.json");
    create_kyoto(&data_file);

    let output = roam_cmd(&data_file)
        .args(["--json", "show", "1"])
        .output()
        .expect("Failed to run roam");
    assert!(output.status.success());

    let trip: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output is not JSON");
    assert_eq!(trip["id"], 1);
    assert_eq!(trip["start_date"], "2024-03-01");
    assert_eq!(trip["plan"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_cli_create_from_json_file() {
    let temp_dir = create_cli_test_environment();
    let data_file = temp_dir.path().join("trips.json");
    let body = temp_dir.path().join("trip.json");
    std::fs::write(
        &body,
        r#"{"name": "Taroko", "start_date": "2024-10-01", "days": 2, "plan": [{"day_index": 2, "items": [{"title": "Gorge walk"}]}]}"#,
    )
    .unwrap();

    roam_cmd(&data_file)
        .args(["create", "--from-json", body.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Taroko"))
        .stdout(predicate::str::contains("Gorge walk `2-1`"));
}

#[test]
fn test_cli_delete_then_show_fails() {
    let temp_dir = create_cli_test_environment();
    let data_file = temp_dir.path().join("trips.json");
    create_kyoto(&data_file);

    roam_cmd(&data_file)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted trip 'Kyoto' (ID: 1)"));

    roam_cmd(&data_file)
        .args(["show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Trip with ID 1 not found"));
}

#[test]
fn test_cli_rejects_invalid_input() {
    let temp_dir = create_cli_test_environment();
    let data_file = temp_dir.path().join("trips.json");

    roam_cmd(&data_file)
        .args(["create", "Nowhere", "--start-date", "2024-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));

    roam_cmd(&data_file)
        .args(["create", "Nowhere", "--start-date", "2024-02-01", "--days", "-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("days"));

    create_kyoto(&data_file);
    roam_cmd(&data_file)
        .args(["update", "1", "[1, 2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a JSON object"));
}

#[test]
fn test_cli_sqlite_backend_with_realign() {
    let temp_dir = create_cli_test_environment();
    let data_file = temp_dir.path().join("trips.db");

    let sqlite = |args: &[&str]| {
        let mut cmd = roam_cmd(&data_file);
        cmd.args(["--backend", "sqlite", "--plan-policy", "realign"])
            .args(args);
        cmd
    };

    sqlite(&["create", "Kinmen", "--start-date", "2024-05-01", "--days", "2"])
        .assert()
        .success();
    sqlite(&[
        "update",
        "1",
        r#"{"plan": [{"day_index": 1, "items": [{"title": "Forts"}]}]}"#,
    ])
    .assert()
    .success();

    sqlite(&["update", "1", r#"{"start_date": "2024-05-10", "days": 3}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Day 1 (2024-05-10)\n\n- Forts"))
        .stdout(predicate::str::contains("### Day 3 (2024-05-12)"));
}
