use assert_cmd::prelude::*;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const ENV_VARS: &[&str] = &[
    "RAGAMAYA_BASE_API",
    "RAGAMAYA_CLIENT_ORIGIN",
    "RAGAMAYA_CONFIG",
    "RAGAMAYA_SESSION",
    "RAGAMAYA_FORMAT",
    "RAGAMAYA_DEBUG",
    "RAGAMAYA_PASSWORD",
];

fn token(exp_offset_secs: i64) -> String {
    let encode = |v: serde_json::Value| URL_SAFE_NO_PAD.encode(v.to_string());
    let header = encode(serde_json::json!({ "alg": "HS256", "typ": "JWT" }));
    let payload = encode(serde_json::json!({
        "sub": "admin-1",
        "name": "Admin Raga",
        "email": "admin@ragamaya.test",
        "role": "admin",
        "exp": Utc::now().timestamp() + exp_offset_secs,
    }));
    format!("{}.{}.sig", header, payload)
}

fn write_session(dir: &Path, token: &str) -> PathBuf {
    let path = dir.join("session.yaml");
    let contents = format!(
        "cookies:\n  access_token:\n    value: {token}\n  refresh_token:\n    value: refresh\n"
    );
    fs::write(&path, contents).expect("failed to write session");
    path
}

fn write_config(dir: &Path, base_api: Option<&str>) -> PathBuf {
    let path = dir.join("config.yaml");
    let contents = match base_api {
        Some(base) => format!("base_api: {base}\n"),
        None => "preferences: {}\n".to_string(),
    };
    fs::write(&path, contents).expect("failed to write config");
    path
}

/// Command isolated from the caller's environment and home directory
fn ragamaya(config: &Path, session: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ragamaya"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--config")
        .arg(config)
        .arg("--session")
        .arg(session);
    cmd
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn route_protected_without_session_redirects_to_login() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);
    let session = temp.path().join("session.yaml");

    let output = ragamaya(&config, &session)
        .args(["route", "/quiz", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let report = json_stdout(&output);
    assert_eq!(report["data"]["decision"], "redirect to /login");
    assert_eq!(report["data"]["redirect"], "/login");
    assert_eq!(report["data"]["session_cleared"], false);
    Ok(())
}

#[test]
fn route_login_with_valid_session_redirects_home() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);
    let session = write_session(temp.path(), &token(3600));

    let output = ragamaya(&config, &session)
        .args(["route", "/login", "--format", "json"])
        .args(["--client-origin", "https://admin.ragamaya.test"])
        .output()?;

    assert!(output.status.success());
    let report = json_stdout(&output);
    assert_eq!(report["data"]["decision"], "redirect to /");
    assert_eq!(report["data"]["redirect"], "https://admin.ragamaya.test/");
    Ok(())
}

#[test]
fn route_with_expired_session_clears_cookies() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);
    let session = write_session(temp.path(), &token(-60));

    let output = ragamaya(&config, &session)
        .args(["route", "/withdraw", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let report = json_stdout(&output);
    assert_eq!(report["data"]["decision"], "redirect to /login");
    assert_eq!(report["data"]["session_cleared"], true);

    let jar = fs::read_to_string(&session)?;
    assert!(!jar.contains("access_token"));
    assert!(!jar.contains("refresh_token"));
    Ok(())
}

#[test]
fn route_skips_static_assets() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);
    let session = temp.path().join("session.yaml");

    ragamaya(&config, &session)
        .args(["route", "/_next/static/app.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not guarded"));
    Ok(())
}

#[test]
fn logout_clears_session_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);
    let session = write_session(temp.path(), &token(3600));

    ragamaya(&config, &session)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    let jar = fs::read_to_string(&session)?;
    assert!(!jar.contains("access_token"));
    assert!(!jar.contains("refresh_token"));
    Ok(())
}

#[test]
fn whoami_reads_identity_from_token() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);
    let session = write_session(temp.path(), &token(3600));

    let output = ragamaya(&config, &session)
        .args(["whoami", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let identity = json_stdout(&output);
    assert_eq!(identity["data"]["name"], "Admin Raga");
    assert_eq!(identity["data"]["email"], "admin@ragamaya.test");
    assert_eq!(identity["data"]["id"], "admin-1");
    Ok(())
}

#[test]
fn whoami_without_session_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);
    let session = temp.path().join("session.yaml");

    ragamaya(&config, &session)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Not signed in"));
    Ok(())
}

#[test]
fn protected_command_without_session_makes_no_request() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    // Unroutable origin: reaching the network would fail differently
    let config = write_config(temp.path(), Some("http://127.0.0.1:1"));
    let session = temp.path().join("session.yaml");

    ragamaya(&config, &session)
        .args(["payout", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
    Ok(())
}

#[test]
fn api_without_session_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), Some("http://127.0.0.1:1"));
    let session = temp.path().join("session.yaml");

    ragamaya(&config, &session)
        .args(["api", "/analytic/getall"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
    Ok(())
}

#[test]
fn missing_base_api_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), None);
    let session = write_session(temp.path(), &token(3600));

    ragamaya(&config, &session)
        .arg("analytics")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Base API origin is not configured"));
    Ok(())
}

#[test]
fn status_reports_paths_and_session() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), Some("https://api.ragamaya.test"));
    let session = temp.path().join("session.yaml");

    let output = ragamaya(&config, &session)
        .args(["status", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let status = json_stdout(&output);
    assert_eq!(status["data"]["base_api"], "https://api.ragamaya.test");
    assert_eq!(status["data"]["session"]["state"], "signed_out");
    assert_eq!(
        status["data"]["config_file"],
        config.to_string_lossy().to_string()
    );
    Ok(())
}

#[test]
fn config_set_then_show() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = temp.path().join("nested").join("config.yaml");
    let session = temp.path().join("session.yaml");

    ragamaya(&config, &session)
        .args(["config", "set", "base-api", "https://api.ragamaya.test/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved"));

    ragamaya(&config, &session)
        .args(["config", "set", "format", "table"])
        .assert()
        .success();

    let output = ragamaya(&config, &session)
        .args(["config", "show", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let shown = json_stdout(&output);
    assert_eq!(shown["data"]["base_api"], "https://api.ragamaya.test");
    assert_eq!(shown["data"]["format"], "json");

    let saved = fs::read_to_string(&config)?;
    assert!(saved.contains("table"));
    Ok(())
}

#[test]
fn config_set_rejects_bad_origin() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = temp.path().join("config.yaml");
    let session = temp.path().join("session.yaml");

    ragamaya(&config, &session)
        .args(["config", "set", "client-origin", "admin.ragamaya.test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with http://"));
    Ok(())
}

#[test]
fn env_base_api_overrides_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), Some("https://file.ragamaya.test"));
    let session = temp.path().join("session.yaml");

    let output = ragamaya(&config, &session)
        .env("RAGAMAYA_BASE_API", "https://env.ragamaya.test")
        .args(["config", "show", "--format", "json"])
        .output()?;

    let shown = json_stdout(&output);
    assert_eq!(shown["data"]["base_api"], "https://env.ragamaya.test");
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn login_stores_token_from_response() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let issued = token(3600);

    let _login = server
        .mock("POST", "/auth/login")
        .match_header("x-http-method-override", "POST")
        .with_status(200)
        .with_body(format!(r#"{{"status":200,"body":"{}"}}"#, issued))
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), Some(&server.url()));
    let session = temp.path().join("session.yaml");

    ragamaya(&config, &session)
        .args(["login", "--username", "admin", "--password", "secret123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as"));

    let jar = fs::read_to_string(&session)?;
    assert!(jar.contains(&issued));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn article_list_sends_bearer_and_renders_rows() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let session_token = token(3600);

    let _articles = server
        .mock("GET", "/article/search")
        .match_header("authorization", format!("Bearer {}", session_token).as_str())
        .with_status(200)
        .with_body(
            r#"{"status":200,"body":[
                {"uuid":"a-1","slug":"tari-saman","title":"Tari Saman dari Aceh",
                 "created_at":"2025-02-01T00:00:00Z","category":{"uuid":"c-1","name":"Budaya"}},
                {"uuid":"a-2","slug":"rendang","title":"Resep Rendang Padang",
                 "created_at":"2025-03-01T00:00:00Z","category":{"uuid":"c-2","name":"Kuliner"}}
            ]}"#,
        )
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), Some(&server.url()));
    let session = write_session(temp.path(), &session_token);

    let output = ragamaya(&config, &session)
        .args(["article", "list", "--format", "json"])
        .output()?;

    assert!(output.status.success());
    let listed = json_stdout(&output);
    assert_eq!(listed["data"][0]["slug"], "rendang");
    assert_eq!(listed["data"][1]["slug"], "tari-saman");
    assert_eq!(listed["meta"]["count"], 2);
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn server_error_message_is_surfaced() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _quizzes = server
        .mock("GET", "/quiz/search")
        .with_status(500)
        .with_body(r#"{"message":"Database sedang dalam perawatan"}"#)
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), Some(&server.url()));
    let session = write_session(temp.path(), &token(3600));

    ragamaya(&config, &session)
        .args(["quiz", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Database sedang dalam perawatan",
        ));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn api_override_patch_sends_post_with_header() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _profile = server
        .mock("POST", "/user/profile")
        .match_header("x-http-method-override", "PATCH")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(serde_json::json!({ "name": "Raga" })))
        .with_status(200)
        .with_body(r#"{"status":200,"message":"Profil diperbarui"}"#)
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), Some(&server.url()));
    let session = write_session(temp.path(), &token(3600));

    ragamaya(&config, &session)
        .args(["api", "/user/profile", "-X", "put", "--override-patch"])
        .args(["--data", r#"{"name":"Raga"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profil diperbarui"));
    Ok(())
}
