use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn shotstage_cmd() -> Command {
    Command::cargo_bin("shotstage").expect("binary exists")
}

#[test]
fn shotstage_help_prints_usage() {
    shotstage_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Terminal screenshot picker and staging extension",
        ));
}

#[test]
fn list_scans_the_env_fallback_directory() {
    let temp = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("Screenshot 2024-01-30 at 10.00.00.png"),
        b"png",
    )
    .unwrap();
    std::fs::write(temp.path().join("notes.txt"), b"text").unwrap();

    shotstage_cmd()
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("SHOTSTAGE_DIR", temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Screenshot 2024-01-30 at 10.00.00.png",
        ))
        .stdout(predicate::str::contains("notes.txt").not());
}

#[test]
fn sources_reports_the_env_origin() {
    let temp = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();

    shotstage_cmd()
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("SHOTSTAGE_DIR", temp.path())
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("$SHOTSTAGE_DIR"))
        .stdout(predicate::str::contains(temp.path().display().to_string()));
}

#[test]
fn sources_prefer_the_config_file() {
    let config_home = TempDir::new().unwrap();
    let config_dir = config_home.path().join("shotstage");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[sources]\npaths = [\"/configured/shots\"]\n",
    )
    .unwrap();

    shotstage_cmd()
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("SHOTSTAGE_DIR", "/env/ignored")
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("from config"))
        .stdout(predicate::str::contains("/configured/shots"));
}

#[test]
fn sync_script_requires_a_host() {
    let config_home = TempDir::new().unwrap();

    shotstage_cmd()
        .env("XDG_CONFIG_HOME", config_home.path())
        .arg("sync-script")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No remote host"));
}

#[test]
fn sync_script_embeds_host_and_directories() {
    let config_home = TempDir::new().unwrap();

    shotstage_cmd()
        .env("XDG_CONFIG_HOME", config_home.path())
        .args(["sync-script", "--host", "dev@mac.local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#!/usr/bin/env bash"))
        .stdout(predicate::str::contains("dev@mac.local"))
        .stdout(predicate::str::contains("~/Desktop/ss"));
}

#[test]
fn init_config_writes_once() {
    let config_home = TempDir::new().unwrap();

    shotstage_cmd()
        .env("XDG_CONFIG_HOME", config_home.path())
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    // Second run refuses to overwrite.
    shotstage_cmd()
        .env("XDG_CONFIG_HOME", config_home.path())
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
