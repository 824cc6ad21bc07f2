//! Tests for the refwatch binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// refwatch with config, logs and working directory isolated in `home`
fn refwatch(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("refwatch").expect("binary should build");
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"));
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let home = TempDir::new().unwrap();

    refwatch(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("watch").and(predicate::str::contains("list")));
}

#[test]
fn test_watch_without_repositories_fails() {
    let home = TempDir::new().unwrap();

    refwatch(home.path())
        .arg("watch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No repositories to watch"));
}

#[test]
fn test_watch_rejects_zero_interval() {
    let home = TempDir::new().unwrap();

    refwatch(home.path())
        .args(["watch", "--repo", "app=/nonexistent", "--interval-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_watch_rejects_duplicate_config_names() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("refwatch.yml");
    std::fs::write(
        &config,
        "repos:\n  - name: app\n    path: /a\n  - name: app\n    path: /b\n",
    )
    .unwrap();

    refwatch(home.path())
        .arg("--config")
        .arg(&config)
        .arg("watch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("used more than once"));
}

#[test]
fn test_watch_exits_when_every_watcher_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("missing");

    refwatch(home.path())
        .arg("watch")
        .arg("--repo")
        .arg(format!("gone={}", missing.display()))
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(predicate::str::contains("gone"));
}

#[test]
fn test_list_outside_repository_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("missing");

    refwatch(home.path())
        .arg("list")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list references"));
}

#[test]
fn test_list_json_output() {
    if std::process::Command::new("git").arg("--version").output().is_err() {
        return;
    }
    let home = TempDir::new().unwrap();
    let repo = home.path().join("repo");
    std::fs::create_dir(&repo).unwrap();
    for args in [
        vec!["init", "-q"],
        vec!["symbolic-ref", "HEAD", "refs/heads/main"],
        vec![
            "-c",
            "user.name=refwatch",
            "-c",
            "user.email=refwatch@example.com",
            "-c",
            "commit.gpgsign=false",
            "commit",
            "-q",
            "--allow-empty",
            "-m",
            "initial",
        ],
    ] {
        let status = std::process::Command::new("git").args(&args).current_dir(&repo).status().unwrap();
        assert!(status.success());
    }

    refwatch(home.path())
        .args(["list", "--format", "json"])
        .arg(&repo)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""ref_name":"refs/heads/main""#).and(predicate::str::contains(r#""checked_out":true"#)));
}
