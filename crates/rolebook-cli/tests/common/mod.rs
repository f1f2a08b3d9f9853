//! Shared E2E test helpers for `rolebook` binary tests.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::Path;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Environment variables the config loader reads.
const ROLEBOOK_ENV_VARS: &[&str] = &[
    "ROLEBOOK_DEBUG",
    "ROLEBOOK_BIND_MODE",
    "ROLEBOOK_REPORT_FORMAT",
    "ROLEBOOK_LOG_LEVEL",
    "RUST_LOG",
];

fn strip_env(cmd: &mut assert_cmd::Command) {
    for var in ROLEBOOK_ENV_VARS {
        cmd.env_remove(var);
    }
}

/// Build a Command rooted at `dir`, with no global config and a clean env.
///
/// The project config is read from `<dir>/.rolebook/config.toml` if present.
pub fn rolebook_cmd_in(dir: &Path) -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("rolebook");
    cmd.timeout(TIMEOUT_BASIC);
    strip_env(&mut cmd);
    cmd.env("HOME", dir);
    cmd.arg("-C").arg(dir);
    cmd.arg("--config").arg(dir.join("no-global.toml"));
    cmd
}

/// Build a Command in a fresh temp directory.
///
/// Returns (command, _guard) — keep the guard alive for the test's duration.
pub fn rolebook_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let cmd = rolebook_cmd_in(tmp.path());
    (cmd, tmp)
}

/// Writes `<dir>/.rolebook/config.toml`.
pub fn write_project_config(dir: &Path, content: &str) {
    let config_dir = dir.join(".rolebook");
    std::fs::create_dir_all(&config_dir).expect("create .rolebook dir");
    std::fs::write(config_dir.join("config.toml"), content).expect("write project config");
}
