// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the `icyhider` binary against temporary source trees.

use std::path::Path;
use std::process::{Command, Output};

use icyhider_test_utils::{ManifestBuilder, SourceTree};

/// Lay out a host manifest, an aggregate source and one directory unit, plus
/// a config file pointing at them.
fn populated_tree() -> SourceTree {
    let host = ManifestBuilder::new()
        .qualifying("KSampler")
        .qualifying("LoadImage")
        .bare("Note")
        .render();
    let aggregate = ManifestBuilder::new()
        .namespace("WAS_Node_Suite", "1.0.0")
        .qualifying("Image Blend")
        .input_only("Text Concat")
        .render();
    let unit = ManifestBuilder::new().qualifying("Mask Grow").render();

    let tree = SourceTree::new()
        .with_file("comfy-core.toml", &host)
        .with_file("was-ns/WAS_Node_Suite.toml", &aggregate)
        .with_file("was-extras/nodes/masks.toml", &unit);
    let config = config_text(tree.path());
    tree.write("icyhider.toml", &config);
    tree
}

fn config_text(base: &Path) -> String {
    format!(
        "[log]\nlevel = \"debug\"\n\n[host]\nmanifest = {:?}\n\n[sources]\nbase_path = {:?}\n",
        base.join("comfy-core.toml").display().to_string(),
        base.display().to_string(),
    )
}

fn icyhider(tree: &SourceTree, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_icyhider"))
        .arg("--config")
        .arg(tree.path().join("icyhider.toml"))
        .args(args)
        .env_remove("RUST_LOG")
        .current_dir(tree.path())
        .output()
        .expect("run icyhider")
}

#[test]
fn build_prints_per_source_summary() {
    let tree = populated_tree();
    let output = icyhider(&tree, &["build"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("host"));
    assert!(stdout.contains("WAS Node Suite"));
    assert!(stdout.contains("was-extras/masks"));
    assert!(stdout.contains("directory total: 1"));
    assert!(stdout.contains("total: 4"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("total nodes wrapped"));
}

#[test]
fn build_json_reports_stage_statuses() {
    let tree = populated_tree();
    let output = icyhider(&tree, &["build", "--json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total"], 4);
    assert_eq!(report["stages"][0]["kind"], "host");
    assert_eq!(report["stages"][0]["status"], "processed");
    assert_eq!(report["stages"][0]["count"], 2);
}

#[test]
fn list_prints_ids_in_order() {
    let tree = populated_tree();
    let output = icyhider(&tree, &["list"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let ids: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.split('\t').next())
        .collect();
    assert_eq!(
        ids,
        vec!["IcyImage Blend", "IcyKSampler", "IcyLoadImage", "IcyMask Grow"]
    );
    assert!(stdout.contains("IcyLoadImage\tIcy LoadImage\tIcyHider\n"));
    assert!(stdout.contains("IcyMask Grow\tIcy Mask Grow\tIcyHider was-extras/masks\n"));
}

#[test]
fn export_writes_mappings_to_file() {
    let tree = populated_tree();
    let out_path = tree.path().join("registry.json");
    let output = icyhider(&tree, &["export", "--output", out_path.to_str().unwrap()]);
    assert!(output.status.success());

    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(
        exported["node_display_name_mappings"]["IcyKSampler"],
        "Icy KSampler"
    );
    assert_eq!(
        exported["node_class_mappings"]["IcyImage Blend"]["category"],
        "IcyHider WAS Node Suite"
    );
}

#[test]
fn missing_sources_still_succeed() {
    let host = ManifestBuilder::new().qualifying("KSampler").render();
    let tree = SourceTree::new().with_file("comfy-core.toml", &host);
    let config = config_text(tree.path());
    tree.write("icyhider.toml", &config);

    let output = icyhider(&tree, &["build"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("not found"));
    assert!(stdout.contains("total: 1"));
}

#[test]
fn missing_host_manifest_fails() {
    let tree = SourceTree::new();
    let config = config_text(tree.path());
    tree.write("icyhider.toml", &config);

    let output = icyhider(&tree, &["build"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error"));
}

#[test]
fn invalid_config_exits_with_diagnostic() {
    let tree = SourceTree::new().with_file("icyhider.toml", "[host]\nmanifset = \"x.toml\"\n");
    let output = icyhider(&tree, &["build"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("manifest"));
}

#[test]
fn env_overrides_apply_on_top_of_config_file() {
    let tree = populated_tree();
    let output = Command::new(env!("CARGO_BIN_EXE_icyhider"))
        .arg("--config")
        .arg(tree.path().join("icyhider.toml"))
        .arg("build")
        .env_remove("RUST_LOG")
        .env("ICYHIDER_LOG_LEVEL", "warn")
        .env("ICYHIDER_SOURCES_AGGREGATE_ENABLED", "false")
        .current_dir(tree.path())
        .output()
        .expect("run icyhider");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("disabled"));
    assert!(stdout.contains("total: 3"));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("total nodes wrapped"));
}
