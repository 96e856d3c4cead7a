use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use std::path::Path;

fn deckz(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("deckz").unwrap();
    cmd.current_dir(dir)
        .env("DECKZ_HOME", dir.join("global"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_create_and_list() {
    let temp_dir = tempfile::tempdir().unwrap();

    deckz(temp_dir.path())
        .args(["create", "Quarterly Review", "--theme", "midnight"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deck created: Quarterly Review"));

    deckz(temp_dir.path())
        .args(["create", "Kickoff"])
        .assert()
        .success();

    // Newest first
    deckz(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Kickoff"))
        .stdout(predicate::str::contains("2. Quarterly Review"));

    // Global scope is a separate store
    deckz(temp_dir.path())
        .args(["--global", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No decks found."));
}

#[test]
fn test_outline_import_and_move() {
    let temp_dir = tempfile::tempdir().unwrap();
    deckz(temp_dir.path()).args(["create", "Pitch"]).assert().success();

    let generated = temp_dir.path().join("outline.json");
    std::fs::write(
        &generated,
        r#"Sure! Here is your outline:
        {"outlines": ["Problem", "Solution", "Market"]}"#,
    )
    .unwrap();

    deckz(temp_dir.path())
        .args(["outline", "import"])
        .arg(&generated)
        .assert()
        .success();

    deckz(temp_dir.path())
        .args(["outline", "mv", "3", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Market"))
        .stdout(predicate::str::contains("2. Problem"))
        .stdout(predicate::str::contains("3. Solution"));

    deckz(temp_dir.path())
        .args(["outline", "rename", "9", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_ingest_and_show() {
    let temp_dir = tempfile::tempdir().unwrap();
    deckz(temp_dir.path()).args(["create", "Demo"]).assert().success();

    let layouts = r#"{"layouts": [
        {"slideName": "Welcome", "content": {"id": "root", "type": "column", "name": "Column",
            "content": [{"id": "body", "type": "text", "name": "Text", "content": "Hello there"}]}}
    ]}"#;

    deckz(temp_dir.path())
        .args(["ingest", "-"])
        .write_stdin(layouts)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ingested 1 slides"))
        .stdout(predicate::str::contains("Welcome"));

    // Title repair puts a title block first
    deckz(temp_dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("title Welcome"))
        .stdout(predicate::str::contains("text Hello there"))
        .stdout(predicate::str::contains("drop").not());

    deckz(temp_dir.path())
        .args(["show", "--edit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("drop root@"));
}

#[test]
fn test_content_set() {
    let temp_dir = tempfile::tempdir().unwrap();
    deckz(temp_dir.path()).args(["create", "Demo"]).assert().success();

    let slide = r#"{"slideName": "Agenda", "content": {"id": "root", "type": "column",
        "content": [{"id": "items", "type": "bulletedList", "content": ["one"]}]}}"#;
    deckz(temp_dir.path())
        .args(["slides", "insert", "-"])
        .write_stdin(slide)
        .assert()
        .success();

    deckz(temp_dir.path())
        .args(["content", "set", "1", "items", "alpha", "beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated items"));

    deckz(temp_dir.path())
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("• alpha"))
        .stdout(predicate::str::contains("• beta"));

    deckz(temp_dir.path())
        .args(["content", "set", "1", "ghost", "x"])
        .assert()
        .failure();
}

#[test]
fn test_config_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();

    deckz(temp_dir.path())
        .args(["config", "default_theme", "forest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_theme set to Forest"));

    deckz(temp_dir.path())
        .args(["config", "default_theme", "neon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("neon"));

    deckz(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_theme = Forest"))
        .stdout(predicate::str::contains("repair_titles = true"));
}
