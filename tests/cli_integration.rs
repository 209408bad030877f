mod common;

use assert_cmd::Command;
use common::TestEnvironment;
use predicates::prelude::*;
use std::fs;

/// Command isolated from the user's real config and environment.
fn grimoire(env: &TestEnvironment) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_grimoire"));
    cmd.env("HOME", env.root_dir())
        .env("XDG_CONFIG_HOME", env.root_dir().join("xdg"))
        .env_remove("GRIMOIRE_NOTES_PATH")
        .env_remove("GRIMOIRE_RESOURCES_PATH")
        .env_remove("GRIMOIRE_SOURCES_PATH")
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

fn write_config(env: &TestEnvironment, extra: &str) {
    let config = format!(
        "[paths]\nnotes = '{}'\nsources = '{}'\n{extra}",
        env.root("notes").display(),
        env.root("sources").display()
    );
    fs::write(env.root_dir().join(".grimoire.toml"), config).unwrap();
}

fn fixture() -> TestEnvironment {
    let env = TestEnvironment::new();
    env.create_file("notes", "a.md", "intro\nTODO: fix bug\nend\n");
    env.create_file("notes", "b.md", "nothing here\nanother todo\n");
    env.create_file("sources", "main.cpp", "int main() {}\n// todo: tests\n");
    write_config(&env, "");
    env
}

#[test]
fn detail_view_shows_context() {
    let env = fixture();
    grimoire(&env)
        .args(["todo", "-n", "-c", "1", "-C", "1", "--limit", "a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Line: 2"))
        .stdout(predicate::str::contains("  | intro"))
        .stdout(predicate::str::contains("  > TODO: fix bug"))
        .stdout(predicate::str::contains("  | end"));
}

#[test]
fn context_hidden_when_not_requested() {
    let env = fixture();
    grimoire(&env)
        .args(["todo", "-n", "--limit", "a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  > TODO: fix bug"))
        .stdout(predicate::str::contains("intro").not());
}

#[test]
fn summary_view_counts_per_file() {
    let env = fixture();
    grimoire(&env)
        .args(["todo", "-n", "-s", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Search Result Summary:"))
        .stdout(predicate::str::contains("Lines: 2"))
        .stdout(predicate::str::contains("Total: 3 files with 3 matches"));
}

#[test]
fn line_view_without_pattern() {
    let env = fixture();
    grimoire(&env)
        .args(["-n", "-L", "3", "--limit", "a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Line: 3"))
        .stdout(predicate::str::contains("  > end"));

    grimoire(&env)
        .args(["todo", "-n", "-L", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Line 40 not found in search results."));
}

#[test]
fn no_matches_is_not_an_error() {
    let env = fixture();
    grimoire(&env)
        .args(["zzz-not-present", "-n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches found."));
}

#[test]
fn json_output_is_parseable() {
    let env = fixture();
    let output = grimoire(&env)
        .args(["todo", "-s", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["line_number"], 2);
    assert_eq!(value[0]["line_content"], "// todo: tests");
}

#[test]
fn location_flag_is_required() {
    let env = fixture();
    grimoire(&env).arg("todo").assert().failure();
}

#[test]
fn unconfigured_root_reports_configuration_error() {
    let env = fixture();
    grimoire(&env)
        .args(["todo", "-r"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration errors:"))
        .stderr(predicate::str::contains("'resources' is not configured"));
}

#[test]
fn invalid_extension_in_config_is_reported() {
    let env = fixture();
    write_config(&env, "[filetypes]\nextensions = ['md']\n");
    grimoire(&env)
        .args(["todo", "-n"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File type must start with '.': md"));
}

#[test]
fn invalid_pattern_fails_search() {
    let env = fixture();
    grimoire(&env)
        .args(["todo(", "-n"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error during search:"));
}

#[test]
fn environment_supplies_roots_without_config_file() {
    let env = TestEnvironment::new();
    env.create_file("notes", "a.md", "env driven todo\n");
    grimoire(&env)
        .env("GRIMOIRE_NOTES_PATH", env.root("notes"))
        .args(["todo", "-n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("env driven todo"));
}

#[test]
fn broken_config_file_falls_back_with_warning() {
    let env = TestEnvironment::new();
    env.create_file("notes", "a.md", "todo\n");
    fs::write(env.root_dir().join(".grimoire.toml"), "[paths\n").unwrap();
    grimoire(&env)
        .env("GRIMOIRE_NOTES_PATH", env.root("notes"))
        .args(["todo", "-n"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Error reading config file"));
}

#[test]
fn log_and_metrics_options() {
    let env = fixture();
    let log_path = env.root_dir().join("logs/search.log");
    grimoire(&env)
        .args(["todo", "-n", "--verbose", "--metrics", "--log"])
        .arg(&log_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("files_scanned 2"));

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Searching"));
}
