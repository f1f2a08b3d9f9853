//! E2E tests for `rolebook report` and `rolebook roles`.

mod common;

use common::rolebook_cmd;
use predicates::prelude::*;
use predicates::str::contains;

// ─── report ──────────────────────────────────────────────────────

#[test]
fn admin_report_lists_every_capability() {
    let (mut cmd, _guard) = rolebook_cmd();
    cmd.args(["report", "--role", "admin", "--name", "Hazard"])
        .assert()
        .success()
        .stdout(
            "user Hazard has permission: login\n\
             user Hazard has permission: add\n\
             user Hazard has permission: del\n\
             user Hazard has permission: query\n",
        );
}

#[test]
fn guest_report_lists_login_and_query() {
    let (mut cmd, _guard) = rolebook_cmd();
    cmd.args(["report", "-r", "guest", "-n", "Kante", "--attr", "age=26"])
        .assert()
        .success()
        .stdout(
            "user Kante has permission: login\n\
             user Kante has permission: query\n",
        );
}

#[test]
fn copy_mode_reports_the_same() {
    let (mut cmd, _guard) = rolebook_cmd();
    cmd.args(["report", "-r", "guest", "-n", "Kante", "--copy"])
        .assert()
        .success()
        .stdout(contains("user Kante has permission: query"))
        .stdout(contains("del").not());
}

#[test]
fn json_report() {
    let (mut cmd, _guard) = rolebook_cmd();
    let output = cmd
        .args([
            "report", "-r", "guest", "-n", "Kante", "--attr", "sex=male", "--copy", "--json",
        ])
        .output()
        .expect("run rolebook");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["subject"], "Kante");
    assert_eq!(value["role"], "guest");
    assert_eq!(value["mode"], "copy");
    assert_eq!(value["attributes"]["sex"], "male");
    assert_eq!(value["granted"], serde_json::json!(["login", "query"]));
}

#[test]
fn unknown_role_fails() {
    let (mut cmd, _guard) = rolebook_cmd();
    cmd.args(["report", "--role", "superadmin", "--name", "Baddie"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicates::str::is_empty())
        .stderr(contains("unknown role 'superadmin'"));
}

#[test]
fn malformed_attr_is_a_usage_error() {
    let (mut cmd, _guard) = rolebook_cmd();
    cmd.args(["report", "-r", "guest", "-n", "Kante", "--attr", "age"])
        .assert()
        .failure()
        .stderr(contains("expected KEY=VALUE"));
}

// ─── roles ───────────────────────────────────────────────────────

#[test]
fn roles_lists_builtin_table() {
    let (mut cmd, _guard) = rolebook_cmd();
    cmd.arg("roles").assert().success().stdout(
        "admin: login=true add=true del=true query=true\n\
         guest: login=true add=false del=false query=true\n",
    );
}

#[test]
fn roles_json() {
    let (mut cmd, _guard) = rolebook_cmd();
    let output = cmd.args(["roles", "--json"]).output().expect("run rolebook");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value[0]["role"], "admin");
    assert_eq!(value[1]["role"], "guest");
    assert_eq!(value[1]["permission"]["add"], false);
}
