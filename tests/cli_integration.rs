//! CLI integration tests for Checkmark
//!
//! These tests run the binary against real files in a temp directory and
//! check both the rewritten documents and the printed report.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command instance for the checkmark binary
fn checkmark_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("checkmark"));
    cmd.env_remove("CHECKMARK_STRICT");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

/// Two documents describing the same work in different styles
fn setup_documents() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "status.md",
        "# Project\n\n## Features\n- ✅ Implement caching\n- ❌ Search\n",
    );
    write(
        dir.path(),
        "progress.md",
        "## Backend\n- Caching implementation: ⚠️\n- ⚠️ Search\n",
    );
    dir
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_config() {
    let dir = TempDir::new().unwrap();

    checkmark_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized checkmark workspace"));

    assert!(dir.path().join(".checkmark/config.toml").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    checkmark_cmd().arg("init").arg(dir.path()).assert().success();
    checkmark_cmd().arg("init").arg(dir.path()).assert().success();
}

#[test]
fn test_init_with_documents_then_sync() {
    let dir = setup_documents();

    checkmark_cmd()
        .arg("init")
        .arg(dir.path())
        .args(["-d", "status.md", "-d", "progress.md"])
        .assert()
        .success();

    let config = read(dir.path(), ".checkmark/config.toml");
    assert!(config.contains("status.md"));
    assert!(config.contains("progress.md"));

    checkmark_cmd()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("== status.md =="))
        .stdout(predicate::str::contains("== progress.md =="));

    assert!(read(dir.path(), "status.md").contains("- ⚠️ Search"));
}

// =============================================================================
// Sync Tests
// =============================================================================

#[test]
fn test_sync_merges_across_documents() {
    let dir = setup_documents();

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["sync", "status.md", "progress.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 1 line(s)"))
        .stdout(predicate::str::contains("== Overall =="))
        .stdout(predicate::str::contains("2 unique task(s) across 2 document(s)"));

    assert_eq!(
        read(dir.path(), "status.md"),
        "# Project\n\n## Features\n- ✅ Implement caching\n- ⚠️ Search\n"
    );
    assert_eq!(
        read(dir.path(), "progress.md"),
        "## Backend\n- Caching implementation: ✅\n- ⚠️ Search\n"
    );
}

#[test]
fn test_sync_is_idempotent() {
    let dir = setup_documents();

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["sync", "status.md", "progress.md"])
        .assert()
        .success();
    let first = (read(dir.path(), "status.md"), read(dir.path(), "progress.md"));

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["sync", "status.md", "progress.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated").not());
    let second = (read(dir.path(), "status.md"), read(dir.path(), "progress.md"));

    assert_eq!(first, second);
}

#[test]
fn test_sync_dry_run_does_not_write() {
    let dir = setup_documents();
    let before = read(dir.path(), "status.md");

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["sync", "--dry-run", "status.md", "progress.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would update 1 line(s):"))
        .stdout(predicate::str::contains("- ❌ Search"))
        .stdout(predicate::str::contains("- ⚠️ Search"));

    assert_eq!(read(dir.path(), "status.md"), before);
}

#[test]
fn test_sync_checkbox_and_crlf() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.md", "## Work\r\n- [ ] Login\r\n- ❌ Deploy\r\n");
    write(dir.path(), "b.md", "## Done\n- ✅ Login\n- ✅ Deploy\n");

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["sync", "a.md", "b.md"])
        .assert()
        .success();

    assert_eq!(read(dir.path(), "a.md"), "## Work\r\n- [x] Login\r\n- ✅ Deploy\r\n");
}

#[test]
fn test_sync_leaves_legend_untouched() {
    let dir = TempDir::new().unwrap();
    let legend = "## Status Legend\n- ✅ Completed\n- ⚠️ In progress\n- ❌ Not started\n";
    write(dir.path(), "status.md", &format!("## Work\n- ❌ Login\n\n{}", legend));
    write(dir.path(), "other.md", "## Done\n- ✅ Login\n");

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["sync", "status.md", "other.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status Legend").not());

    assert_eq!(
        read(dir.path(), "status.md"),
        format!("## Work\n- ✅ Login\n\n{}", legend)
    );
}

#[test]
fn test_sync_read_only_documents_are_not_written() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".checkmark")).unwrap();
    write(
        dir.path(),
        ".checkmark/config.toml",
        "documents = [\"status.md\"]\nread_only = [\"tasks.md\"]\n",
    );
    write(dir.path(), "status.md", "## Work\n- ❌ Login\n- ✅ Deploy\n");
    write(dir.path(), "tasks.md", "## Tasks\n- [x] Login\n- [ ] Deploy\n");

    checkmark_cmd()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("== tasks.md (read-only) =="));

    assert_eq!(read(dir.path(), "status.md"), "## Work\n- ✅ Login\n- ✅ Deploy\n");
    assert_eq!(read(dir.path(), "tasks.md"), "## Tasks\n- [x] Login\n- [ ] Deploy\n");
}

// =============================================================================
// Missing Documents and Failures
// =============================================================================

#[test]
fn test_missing_document_warns_and_succeeds() {
    let dir = setup_documents();

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["sync", "status.md", "gone.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: Document not found: gone.md"))
        .stdout(predicate::str::contains("== gone.md (missing) =="));
}

#[test]
fn test_missing_document_fails_in_strict_mode() {
    let dir = setup_documents();

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["sync", "--strict", "status.md", "gone.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode"))
        .stderr(predicate::str::contains("gone.md"));
}

#[test]
fn test_strict_from_config() {
    let dir = setup_documents();
    fs::create_dir_all(dir.path().join(".checkmark")).unwrap();
    write(
        dir.path(),
        ".checkmark/config.toml",
        "documents = [\"status.md\", \"gone.md\"]\nstrict = true\n",
    );

    checkmark_cmd()
        .current_dir(dir.path())
        .arg("report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("gone.md"));
}

#[test]
fn test_write_failure_is_reported() {
    let dir = setup_documents();
    // A directory where the temp file would go makes the write fail
    fs::create_dir(dir.path().join("status.md.tmp")).unwrap();

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["sync", "status.md", "progress.md"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("== Overall =="))
        .stderr(predicate::str::contains("Write failures:"))
        .stderr(predicate::str::contains("Failed to write 1 document(s)"));

    // The other document is still written
    assert!(read(dir.path(), "progress.md").contains("Caching implementation: ✅"));
}

#[test]
fn test_sync_without_workspace_or_paths_fails() {
    let dir = TempDir::new().unwrap();

    checkmark_cmd()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a checkmark workspace"));
}

#[test]
fn test_unknown_set_fails() {
    let dir = setup_documents();
    checkmark_cmd().arg("init").arg(dir.path()).assert().success();

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["report", "--set", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown document set 'nope'"));
}

// =============================================================================
// Report Tests
// =============================================================================

#[test]
fn test_report_does_not_write() {
    let dir = setup_documents();
    let before = read(dir.path(), "status.md");

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["report", "status.md", "progress.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("⚠️ Search"))
        .stdout(predicate::str::contains("Total: 2 tasks"));

    assert_eq!(read(dir.path(), "status.md"), before);
}

#[test]
fn test_report_incomplete_only() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "status.md",
        "## Features\n### Auth\n- ✅ Login\n### Search\n- ⚠️ Indexing\n- ✅ Ranking\n",
    );

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["report", "--incomplete", "status.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexing"))
        .stdout(predicate::str::contains("Auth").not())
        .stdout(predicate::str::contains("Ranking").not())
        .stdout(predicate::str::contains("Total: 3 tasks"));
}

#[test]
fn test_report_without_sections() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "notes.md", "Just some prose.\n");

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["report", "notes.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sections found"));
}

#[test]
fn test_report_sections_without_tasks() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "notes.md", "## Notes\nNothing to do yet.\n");

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["report", "notes.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sections found"))
        .stdout(predicate::str::contains("No tasks found").not())
        .stdout(predicate::str::contains("Total:").not());
}

#[test]
fn test_report_json() {
    let dir = setup_documents();

    let out = checkmark_cmd()
        .current_dir(dir.path())
        .args(["--format", "json", "report", "status.md", "progress.md", "gone.md"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["mode"], "report");
    assert!(json["generated_at"].is_string());
    assert_eq!(json["overall"]["unique_tasks"], 2);
    assert_eq!(json["overall"]["metrics"]["completed"], 1);
    assert_eq!(json["overall"]["metrics"]["in_progress"], 1);
    assert_eq!(json["missing"][0], "gone.md");
    assert_eq!(json["documents"][0]["changed"], true);
    assert_eq!(json["documents"][0]["written"], false);
    assert_eq!(json["documents"][2]["missing"], true);
    assert!(json["write_failures"].as_array().unwrap().is_empty());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = setup_documents();

    checkmark_cmd()
        .current_dir(dir.path())
        .args(["-v", "report", "status.md", "progress.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:merge]"))
        .stdout(predicate::str::contains("[verbose").not());
}

// =============================================================================
// Key Tests
// =============================================================================

fn key_output(text: &str) -> String {
    let out = checkmark_cmd().args(["key", text]).output().unwrap();
    assert!(out.status.success());
    String::from_utf8(out.stdout).unwrap()
}

#[test]
fn test_key_matches_reworded_tasks() {
    let a = key_output("Implement caching");
    let b = key_output("Caching implementation");

    let key_line = |s: &str| s.lines().next().unwrap().to_string();
    assert!(a.starts_with("Key:"));
    assert_eq!(key_line(&a), key_line(&b));
}

#[test]
fn test_key_for_task_line() {
    checkmark_cmd()
        .args(["key", "- Search: ⚠️"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In Progress"))
        .stdout(predicate::str::contains("SuffixColon"));
}

#[test]
fn test_key_rejects_bare_symbol() {
    checkmark_cmd().args(["key", "✅"]).assert().failure();
}
