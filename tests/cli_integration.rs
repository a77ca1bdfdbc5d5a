use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SEED: &str = r#"{
    "categories": [
        {"id": "plant", "name": "Plant", "children": ["boiler"],
         "custom_attributes": [{"attribute_id": "asset-tag", "is_enabled": true, "order": 1}]},
        {"id": "boiler", "name": "Boiler", "parent_id": "plant", "children": ["combi"],
         "system_attributes": [{"attribute_id": "sys-1", "is_enabled": true, "order": 0}]},
        {"id": "combi", "name": "Combi Boiler", "parent_id": "boiler"},
        {"id": "stray", "name": "Stray", "parent_id": "gone"}
    ],
    "global_attributes": [
        {"id": "reference", "label": "Reference", "type": "text", "section": "asset-info", "is_required": true},
        {"id": "manufacturer", "label": "Manufacturer", "type": "search", "section": "asset-info"},
        {"id": "end-of-life", "label": "End of Life", "type": "date", "section": "dates"}
    ],
    "system_catalog": {
        "boiler": [{"id": "sys-1", "label": "Flue Type", "type": "text", "is_system": true}]
    },
    "custom_catalog": {
        "plant": [{"id": "asset-tag", "label": "Asset Tag", "type": "text", "suffix": "tag"}]
    }
}"#;

fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("seed.json"), SEED).unwrap();
    temp
}

fn cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("assetschema").unwrap();
    cmd.env("ASSETSCHEMA_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("ASSETSCHEMA_LOG");
    cmd
}

#[test]
fn tree_lists_reachable_and_unreachable_categories() {
    let temp = setup();
    cmd(temp.path())
        .args(["--seed", "seed.json", "tree"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Combi Boiler"))
        .stdout(predicate::str::contains("Unreachable"))
        .stdout(predicate::str::contains("Stray"));
}

#[test]
fn path_prints_root_to_leaf() {
    let temp = setup();
    cmd(temp.path())
        .args(["--seed", "seed.json", "path", "combi"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Plant › Boiler › Combi Boiler"));
}

#[test]
fn inherited_lists_ancestor_attributes() {
    let temp = setup();
    cmd(temp.path())
        .args(["--seed", "seed.json", "inherited", "combi"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Flue Type"))
        .stdout(predicate::str::contains("from Boiler"))
        .stdout(predicate::str::contains("from Plant"));
}

#[test]
fn inherited_unknown_category_fails() {
    let temp = setup();
    cmd(temp.path())
        .args(["--seed", "seed.json", "inherited", "ghost"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category not found: ghost"));
}

#[test]
fn form_json_has_buckets_and_sources() {
    let temp = setup();
    let output = cmd(temp.path())
        .args(["--seed", "seed.json", "form", "boiler", "--json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let form: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(form["asset_info"][0]["id"], "reference");
    assert_eq!(form["manufacturer"][0]["id"], "manufacturer");
    assert_eq!(form["warranty"][0]["id"], "end-of-life");
    assert_eq!(form["attributes"][0]["id"], "sys-1");
    assert_eq!(form["attributes"][0]["source"]["kind"], "category-system");
    assert_eq!(form["attributes"][1]["id"], "asset-tag");
    assert_eq!(form["attributes"][1]["source"]["kind"], "inherited");
    assert_eq!(form["attributes"][1]["units"], "tag");
}

#[test]
fn form_without_category_or_field_is_empty() {
    let temp = setup();
    cmd(temp.path())
        .args(["--seed", "seed.json", "form"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to show."));
}

#[test]
fn globals_filtered_by_section() {
    let temp = setup();
    cmd(temp.path())
        .args(["--seed", "seed.json", "globals", "--section", "dates"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("End of Life"))
        .stdout(predicate::str::contains("Reference").not());
}

#[test]
fn doctor_reports_orphans() {
    let temp = setup();
    cmd(temp.path())
        .args(["--seed", "seed.json", "doctor"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Category stray points at a parent"));
}

#[test]
fn config_seed_file_is_used_when_flag_absent() {
    let temp = setup();
    let seed = temp.path().join("seed.json");

    cmd(temp.path())
        .args(["config", "seed-file", seed.to_str().unwrap()])
        .assert()
        .success();
    assert!(temp.path().join("config.json").exists());

    cmd(temp.path())
        .args(["path", "boiler"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plant › Boiler"));
}

#[test]
fn missing_seed_is_an_error() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .arg("tree")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No catalog given"));
}

#[test]
fn rust_log_is_honoured_without_assetschema_log() {
    let temp = setup();
    cmd(temp.path())
        .env("RUST_LOG", "assetschema=debug")
        .args(["--seed", "seed.json", "tree"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("seed loaded"));
}

#[test]
fn tree_lists_categories_caught_in_a_cycle() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("loop.json"),
        r#"{"categories": [
            {"id": "x", "name": "Loop X", "parent_id": "y", "children": ["y"]},
            {"id": "y", "name": "Loop Y", "parent_id": "x", "children": ["x"]}
        ]}"#,
    )
    .unwrap();

    cmd(temp.path())
        .args(["--seed", "loop.json", "tree"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Unreachable (missing parent or cycle):"))
        .stdout(predicate::str::contains("Loop X"))
        .stdout(predicate::str::contains("Loop Y"));
}
