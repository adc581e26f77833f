use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Library and config directories for one test run.
struct Env {
    library: TempDir,
    config: TempDir,
    files: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            library: TempDir::new().unwrap(),
            config: TempDir::new().unwrap(),
            files: TempDir::new().unwrap(),
        }
    }

    /// Helper: get a Command for the assetdesk binary bound to this library.
    fn assetdesk(&self) -> Command {
        let mut cmd = Command::cargo_bin("assetdesk").expect("assetdesk binary not found");
        cmd.env("XDG_CONFIG_HOME", self.config.path())
            .env_remove("RUST_LOG")
            .arg("--library")
            .arg(self.library.path());
        cmd
    }

    fn create_file(&self, name: &str) -> PathBuf {
        let path = self.files.path().join(name);
        fs::write(&path, b"course media").unwrap();
        path
    }

    fn import(&self, names: &[&str]) {
        let mut cmd = self.assetdesk();
        cmd.arg("import");
        for name in names {
            cmd.arg(self.create_file(name));
        }
        cmd.assert().success();
    }
}

fn id_for(name: &str) -> String {
    format!("asset-v1:demo+type@asset+block@{}", name)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Import
// ============================================================================
#[test]
fn test_import_prints_asset_ids() {
    let env = Env::new();
    let file = env.create_file("diagram.png");

    env.assetdesk()
        .args(["import", path_str(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains(id_for("diagram.png")));

    assert!(env.library.path().join("library.json").exists());
}

#[test]
fn test_import_missing_file_shows_hint() {
    let env = Env::new();
    let missing = env.files.path().join("nope.png");

    env.assetdesk()
        .args(["import", path_str(&missing)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_import_twice_is_rejected() {
    let env = Env::new();
    env.import(&["a.png"]);

    let file = env.create_file("a.png");
    env.assetdesk()
        .args(["import", path_str(&file)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Asset already exists"));
}

// ============================================================================
// List
// ============================================================================
#[test]
fn test_list_empty_library() {
    let env = Env::new();
    env.assetdesk()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No assets"));
}

#[test]
fn test_list_sorted_by_name() {
    let env = Env::new();
    env.import(&["zebra.png", "apple.pdf", "Mango.mp3"]);

    let output = env
        .assetdesk()
        .args(["list", "--sort", "name", "--direction", "asc"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let apple = stdout.find("apple.pdf").unwrap();
    let mango = stdout.find("Mango.mp3").unwrap();
    let zebra = stdout.find("zebra.png").unwrap();
    assert!(apple < mango && mango < zebra, "unexpected order:\n{}", stdout);
}

#[test]
fn test_list_type_filter() {
    let env = Env::new();
    env.import(&["photo.jpg", "syllabus.pdf", "lecture.mp4"]);

    env.assetdesk()
        .args(["list", "--type", "images", "--type", "video"])
        .assert()
        .success()
        .stdout(predicate::str::contains("photo.jpg"))
        .stdout(predicate::str::contains("lecture.mp4"))
        .stdout(predicate::str::contains("syllabus.pdf").not());
}

#[test]
fn test_list_rejects_unknown_sort() {
    let env = Env::new();
    env.assetdesk()
        .args(["list", "--sort", "size"])
        .assert()
        .failure();
}

// ============================================================================
// Delete and lock
// ============================================================================
#[test]
fn test_delete_removes_asset() {
    let env = Env::new();
    env.import(&["a.png", "b.png"]);

    env.assetdesk()
        .args(["delete", &id_for("a.png")])
        .assert()
        .success()
        .stderr(predicate::str::contains("a.png has been deleted."));

    env.assetdesk()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("b.png"))
        .stdout(predicate::str::contains("a.png").not());
}

#[test]
fn test_delete_unknown_id_shows_hint() {
    let env = Env::new();
    env.assetdesk()
        .args(["delete", "asset-v1:demo+type@asset+block@ghost.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Asset not found"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_lock_toggles() {
    let env = Env::new();
    env.import(&["a.png"]);

    env.assetdesk()
        .args(["lock", &id_for("a.png")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Locked a.png"));

    env.assetdesk()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("yes"));

    env.assetdesk()
        .args(["lock", &id_for("a.png")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unlocked a.png"));
}

#[test]
fn test_quiet_suppresses_confirmation() {
    let env = Env::new();
    env.import(&["a.png"]);

    env.assetdesk()
        .args(["-q", "lock", &id_for("a.png")])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ============================================================================
// Config and completions
// ============================================================================
#[test]
fn test_config_prints_defaults() {
    let env = Env::new();
    env.assetdesk()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("dispatch_timeout_secs = 30"))
        .stdout(predicate::str::contains("[course]"));
}

#[test]
fn test_config_reads_course_from_file() {
    let env = Env::new();
    let dir = env.config.path().join("assetdesk");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.toml"),
        "[course]\nid = \"physics-101\"\nname = \"Physics\"\n",
    )
    .unwrap();

    env.assetdesk()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("physics-101"));

    let file = env.create_file("slides.pdf");
    env.assetdesk()
        .args(["import", path_str(&file)])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "asset-v1:physics-101+type@asset+block@slides.pdf",
        ));
}

#[test]
fn test_invalid_config_shows_hint() {
    let env = Env::new();
    let dir = env.config.path().join("assetdesk");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "dispatch_timeout_secs = \"soon\"\n").unwrap();

    env.assetdesk()
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.toml"));
}

#[test]
fn test_completions_bash() {
    let env = Env::new();
    env.assetdesk()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("assetdesk"));
}
