//! Integration tests for the build and neighbors commands.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_build_json_summary() {
    let mut cmd = cargo_bin_cmd!("gridgraph");
    let output = cmd
        .args(["build", "--extents", "2,2", "--diagonal", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should be valid JSON");
    assert_eq!(json["nodes"], 4);
    assert_eq!(json["edges"], 6);
    assert_eq!(
        json["unique_directions"]
            .as_array()
            .expect("Should have 'unique_directions' array")
            .len(),
        4
    );
}

#[test]
fn test_build_text_summary() {
    let mut cmd = cargo_bin_cmd!("gridgraph");
    cmd.args(["build", "--extents", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nodes:"))
        .stdout(predicate::str::contains("3"))
        .stdout(predicate::str::contains("(1,)"));
}

#[test]
fn test_build_rejects_zero_extent() {
    let mut cmd = cargo_bin_cmd!("gridgraph");
    cmd.args(["build", "--extents", "2,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid extent"));
}

#[test]
fn test_neighbors_json_of_a_corner() {
    let mut cmd = cargo_bin_cmd!("gridgraph");
    let output = cmd
        .args([
            "neighbors", "0,0", "--extents", "2,2", "--diagonal", "--format", "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should be valid JSON");
    assert_eq!(json["node"], "(0, 0)");
    // Two axis neighbors plus the one reachable diagonal.
    assert_eq!(json["count"], 3);
}

#[test]
fn test_neighbors_exact_direction_filter() {
    let mut cmd = cargo_bin_cmd!("gridgraph");
    let output = cmd
        .args([
            "neighbors",
            "0,0",
            "--extents",
            "2,2",
            "--diagonal",
            "--direction",
            "1,1",
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should be valid JSON");
    assert_eq!(json["count"], 1);
    assert_eq!(json["neighbors"][0]["name"], "(1, 1)");
    assert_eq!(json["neighbors"][0]["direction"], serde_json::json!([1, 1]));
}

#[test]
fn test_neighbors_of_unknown_coordinate_fails() {
    let mut cmd = cargo_bin_cmd!("gridgraph");
    cmd.args(["neighbors", "5,5", "--extents", "2,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
