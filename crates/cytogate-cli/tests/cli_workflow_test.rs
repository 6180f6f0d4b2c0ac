//! Integration tests for the cytogate binary
//!
//! These tests drive a full import, gate, dye and toggle cycle against a
//! temporary session store and check the JSON output of each step.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const MEASUREMENTS: &str = "\
CD45-KrO,CD19-PB,SS INT LIN,FS INT LIN
300,100,300,12
350,800,320,14
900,150,900,11
not-a-number,10,10,10
";

// Plot A square from data (250, 250) to (400, 400) in frame pixels
const SQUARE_CLICKS: [&str; 5] = ["61.25,282.5", "125,282.5", "125,230", "61.25,230", "63,281"];

fn cytogate(store: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cytogate"))
        .args(args)
        .arg("--store")
        .arg(store)
        .env_remove("CYTOGATE_STORE_PATH")
        .env_remove("CYTOGATE_CLOSURE_THRESHOLD")
        .env_remove("CYTOGATE_DEFAULT_COLOR")
        .env("CYTOGATE_DYE_DELAY_MS", "0")
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute cytogate")
}

fn json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("Output should be valid JSON")
}

fn setup() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("sample.csv");
    std::fs::write(&csv, MEASUREMENTS).unwrap();
    let store = dir.path().join("saves.json");

    let imported = json(&cytogate(&store, &["import", csv.to_str().unwrap(), "--session", "lab", "--json"]));
    assert_eq!(imported["data"]["point_count"], 3);
    assert_eq!(imported["data"]["dropped_rows"], 1);

    (dir, store)
}

fn draw_square(store: &Path, name: &str) -> serde_json::Value {
    let mut args = vec!["gate", "--session", "lab", "--plot", "A", "--name", name, "--json"];
    for click in SQUARE_CLICKS {
        args.push("--click");
        args.push(click);
    }
    json(&cytogate(store, &args))
}

#[test]
fn test_gate_dye_toggle_cycle() {
    let (_dir, store) = setup();

    let gate = draw_square(&store, "Lymph");
    assert_eq!(gate["data"]["gate"]["name"], "Lymph");
    assert_eq!(gate["data"]["gate"]["points"].as_array().unwrap().len(), 5);

    let dyed = json(&cytogate(&store, &["dye", "--session", "lab", "--gate", "Lymph", "--json"]));
    assert_eq!(dyed["data"]["matched"], 2);
    assert_eq!(dyed["data"]["total"], 3);

    let shown = json(&cytogate(&store, &["show", "--session", "lab", "--json"]));
    assert_eq!(shown["data"]["gates"].as_array().unwrap().len(), 0);
    assert_eq!(shown["data"]["unclassified_count"], 1);
    assert_eq!(shown["data"]["groups"][0]["name"], "Lymph");
    assert_eq!(shown["data"]["groups"][0]["count"], 2);
    assert_eq!(shown["data"]["groups"][0]["visible"], true);

    let toggled = json(&cytogate(&store, &["toggle", "--session", "lab", "--group", "Lymph", "--json"]));
    assert_eq!(toggled["data"]["visible"], false);

    let shown = json(&cytogate(&store, &["show", "--session", "lab", "--points", "--json"]));
    assert_eq!(shown["data"]["points"][0]["group"], "Lymph");
    assert_eq!(shown["data"]["points"][0]["display_color"], "gray");
}

#[test]
fn test_duplicate_gate_name_fails() {
    let (_dir, store) = setup();
    draw_square(&store, "Lymph");

    let mut args = vec!["gate", "--session", "lab", "--plot", "A", "--name", "Lymph"];
    for click in SQUARE_CLICKS {
        args.push("--click");
        args.push(click);
    }
    let output = cytogate(&store, &args);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
}

#[test]
fn test_unclosed_gate_fails() {
    let (_dir, store) = setup();

    let output = cytogate(
        &store,
        &["gate", "--session", "lab", "--plot", "A", "--name", "Open", "--click", "61.25,282.5", "--click", "125,282.5"],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not closed"));
}

#[test]
fn test_sessions_and_delete() {
    let (_dir, store) = setup();

    let listed = json(&cytogate(&store, &["sessions", "--json"]));
    assert_eq!(listed["data"]["sessions"][0]["name"], "lab");

    let deleted = json(&cytogate(&store, &["delete", "--session", "lab", "--json"]));
    assert_eq!(deleted["data"]["deleted"], true);

    let missing = cytogate(&store, &["show", "--session", "lab"]);
    assert!(!missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stderr).contains("Session not found"));
}

#[test]
fn test_scratch_log_keeps_dyed_gates() {
    let (_dir, store) = setup();
    draw_square(&store, "Lymph");
    json(&cytogate(&store, &["dye", "--session", "lab", "--gate", "Lymph", "--json"]));

    let scratch = json(&cytogate(&store, &["sessions", "--scratch", "--json"]));
    let entries = scratch["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["gate"], "Lymph");
    assert_eq!(entries[0]["plot"], "A");
}
