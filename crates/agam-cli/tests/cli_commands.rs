use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn base_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agam"));
    cmd.env("HOME", home)
        .env_remove("AGAM_API_URL")
        .env_remove("AGAM_SESSION_STORE");
    cmd
}

fn write_session(home: &Path, token: &str, user_id: &str) {
    let dir = home.join(".agam");
    fs::create_dir_all(&dir).expect("session dir");
    let session = json!({ "auth_token": token, "user_id": user_id });
    fs::write(dir.join("session.json"), session.to_string()).expect("write session");
}

#[test]
fn help_lists_usage() {
    let home_dir = tempdir().expect("tempdir");
    base_cmd(home_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn vault_list_without_session_points_at_login() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    let vaults = server.mock("GET", "/vaults").match_query(Matcher::Any).expect(0).create();

    base_cmd(home_dir.path())
        .args(["--api-url", &server.url(), "vault", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("agam login"))
        .stderr(predicate::str::contains("not signed in"));
    vaults.assert();
}

#[test]
fn half_written_session_is_not_signed_in() {
    let home_dir = tempdir().expect("tempdir");
    let dir = home_dir.path().join(".agam");
    fs::create_dir_all(&dir).expect("session dir");
    fs::write(dir.join("session.json"), r#"{ "auth_token": "tok" }"#).expect("write");

    base_cmd(home_dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""authenticated": false"#));
}

#[test]
fn login_persists_session_used_by_later_commands() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Json(json!({
            "email": "ada@example.com",
            "password": "secret"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"OTP sent to your email","user_id":7}"#)
        .create();
    server
        .mock("POST", "/auth/verify-otp")
        .match_body(Matcher::Json(json!({
            "email": "ada@example.com",
            "otp": "123456"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"tok-7","user_id":7,"email":"ada@example.com","name":"Ada"}"#)
        .create();

    base_cmd(home_dir.path())
        .args([
            "--api-url",
            &server.url(),
            "login",
            "--email",
            "ada@example.com",
            "--password",
            "secret",
            "--otp",
            "123456",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Ada"));

    let stored = fs::read_to_string(home_dir.path().join(".agam/session.json")).expect("session");
    let stored: serde_json::Value = serde_json::from_str(&stored).expect("session json");
    assert_eq!(stored["auth_token"], "tok-7");
    assert_eq!(stored["user_id"], "7");

    let list = server
        .mock("GET", "/vaults")
        .match_query(Matcher::UrlEncoded("user_id".into(), "7".into()))
        .match_header("authorization", "Bearer tok-7")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{
                "id": "v1",
                "name": "Memories",
                "type": "images",
                "user_id": 7,
                "created_timestamp": "2024-05-01T10:00:00Z"
            }])
            .to_string(),
        )
        .expect(1)
        .create();

    base_cmd(home_dir.path())
        .args(["--api-url", &server.url(), "vault", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Memories"));
    list.assert();
}

#[test]
fn logout_clears_stored_session() {
    let home_dir = tempdir().expect("tempdir");
    write_session(home_dir.path(), "tok", "7");

    base_cmd(home_dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""authenticated": true"#));

    base_cmd(home_dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"))
        .stderr(predicate::str::contains("agam login"));

    base_cmd(home_dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""authenticated": false"#));
}

#[test]
fn server_error_text_is_reported() {
    let home_dir = tempdir().expect("tempdir");
    write_session(home_dir.path(), "tok", "7");
    let mut server = Server::new();
    server
        .mock("GET", "/thumbnail")
        .match_query(Matcher::UrlEncoded("vault_id".into(), "missing".into()))
        .with_status(404)
        .with_body("vault not found")
        .create();

    base_cmd(home_dir.path())
        .args(["--api-url", &server.url(), "vault", "files", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("vault not found"));
}

#[test]
fn vault_create_rejects_unknown_type() {
    let home_dir = tempdir().expect("tempdir");
    base_cmd(home_dir.path())
        .args(["vault", "create", "--name", "Stuff", "--type", "music"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid vault_type value: music"));
}

#[test]
fn config_set_and_show_round_trip() {
    let home_dir = tempdir().expect("tempdir");
    base_cmd(home_dir.path())
        .args([
            "config",
            "set",
            "--api-url",
            "https://files.example.com/",
            "--session-store",
            "keyring",
        ])
        .assert()
        .success();

    base_cmd(home_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""api_url": "https://files.example.com""#))
        .stdout(predicate::str::contains(r#""session_store": "keyring""#));

    base_cmd(home_dir.path())
        .args(["config", "unset", "--session-store"])
        .assert()
        .success();

    base_cmd(home_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("session_store").not());
}
