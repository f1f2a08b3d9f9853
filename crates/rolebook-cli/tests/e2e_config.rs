//! E2E tests for layered configuration.

mod common;

use common::{rolebook_cmd, rolebook_cmd_in, write_project_config};
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn project_role_table_replaces_builtins() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    write_project_config(
        tmp.path(),
        r#"
[roles.auditor.permission]
login = true
query = true
del = false
"#,
    );

    rolebook_cmd_in(tmp.path())
        .arg("roles")
        .assert()
        .success()
        .stdout("auditor: login=true query=true del=false\n");

    rolebook_cmd_in(tmp.path())
        .args(["report", "-r", "auditor", "-n", "Ines"])
        .assert()
        .success()
        .stdout("user Ines has permission: login\nuser Ines has permission: query\n");

    rolebook_cmd_in(tmp.path())
        .args(["report", "-r", "admin", "-n", "Hazard"])
        .assert()
        .failure()
        .stderr(contains("unknown role 'admin'"));
}

#[test]
fn project_config_sets_json_format() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    write_project_config(tmp.path(), "[report]\nformat = \"json\"\n");

    rolebook_cmd_in(tmp.path())
        .args(["report", "-r", "guest", "-n", "Kante"])
        .assert()
        .success()
        .stdout(contains("\"granted\""));
}

#[test]
fn malformed_role_table_fails() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    write_project_config(tmp.path(), "[roles.broken.permission]\nlogin = \"yes\"\n");

    rolebook_cmd_in(tmp.path())
        .arg("roles")
        .assert()
        .failure()
        .stderr(contains("config error"));
}

#[test]
fn env_overrides_bind_mode() {
    let (mut cmd, _guard) = rolebook_cmd();
    cmd.env("ROLEBOOK_BIND_MODE", "copy")
        .args(["report", "-r", "guest", "-n", "Kante", "--json"])
        .assert()
        .success()
        .stdout(contains("\"mode\": \"copy\""));
}

#[test]
fn invalid_env_value_fails() {
    let (mut cmd, _guard) = rolebook_cmd();
    cmd.env("ROLEBOOK_REPORT_FORMAT", "yaml")
        .arg("roles")
        .assert()
        .failure()
        .stderr(contains("ROLEBOOK_REPORT_FORMAT"));
}

#[test]
fn config_prints_effective_toml() {
    let (mut cmd, _guard) = rolebook_cmd();
    cmd.args(["config"])
        .assert()
        .success()
        .stdout(contains("[bind]"))
        .stdout(contains("mode = \"shared\""))
        .stdout(contains("[roles").not());
}

#[test]
fn debug_flag_logs_to_stderr_only() {
    let (mut cmd, _guard) = rolebook_cmd();
    cmd.args(["-d", "report", "-r", "guest", "-n", "Kante"])
        .assert()
        .success()
        .stdout(
            "user Kante has permission: login\n\
             user Kante has permission: query\n",
        )
        .stderr(contains("DEBUG"));
}

#[test]
fn project_config_restores_defaults_over_global() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        tmp.path().join("no-global.toml"),
        "debug = true\n\n[bind]\nmode = \"copy\"\n\n[report]\nformat = \"json\"\n",
    )
    .expect("write global config");
    write_project_config(
        tmp.path(),
        "debug = false\n\n[bind]\nmode = \"shared\"\n\n[report]\nformat = \"text\"\n",
    );

    rolebook_cmd_in(tmp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(contains("debug = false"))
        .stdout(contains("mode = \"shared\""))
        .stdout(contains("format = \"text\""));
}

#[test]
fn cli_flags_select_shared_and_text() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    write_project_config(tmp.path(), "[bind]\nmode = \"copy\"\n\n[report]\nformat = \"json\"\n");

    rolebook_cmd_in(tmp.path())
        .args(["report", "-r", "guest", "-n", "Kante", "--shared", "--text"])
        .assert()
        .success()
        .stdout(
            "user Kante has permission: login\n\
             user Kante has permission: query\n",
        );

    rolebook_cmd_in(tmp.path())
        .args(["report", "-r", "guest", "-n", "Kante", "--shared"])
        .assert()
        .success()
        .stdout(contains("\"mode\": \"shared\""));
}
