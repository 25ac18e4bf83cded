//! Tests for the compiled binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[allow(clippy::expect_used)]
fn checker(workdir: &Path, base_url: &str) -> Command {
    let mut cmd =
        Command::cargo_bin("workshop-collection-checker").expect("binary should be built");
    cmd.current_dir(workdir)
        .env("WORKSHOP_BASE_URL", base_url)
        .env_remove("RUST_LOG");
    cmd
}

async fn serve_fixture() -> MockServer {
    let server = MockServer::start().await;
    let html = fs::read_to_string(fixture_path("collection.html")).unwrap();
    Mock::given(method("GET"))
        .and(path("/sharedfiles/filedetails/"))
        .and(query_param("id", "999"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;
    server
}

/// Run the binary off the async workers so the mock server keeps serving.
async fn run_blocking<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap();
}

#[test]
fn test_missing_collection_id_prints_usage() {
    let dir = TempDir::new().unwrap();
    checker(dir.path(), "http://127.0.0.1:9/")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required argument"))
        .stderr(predicate::str::contains("Usage"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_named_list_with_settings_file() {
    let server = serve_fixture().await;
    let base_url = format!("{}/sharedfiles/filedetails/", server.uri());
    let dir = TempDir::new().unwrap();
    fs::copy(fixture_path("appSettings.json"), dir.path().join("appSettings.json")).unwrap();

    run_blocking(move || {
        checker(dir.path(), &base_url)
            .args(["999", "Banned"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Gathering addons list from workshop collection: 999",
            ))
            .stdout(predicate::str::contains("Found 2 collection items"))
            .stdout(predicate::str::contains(
                "If 'sv_test' is set to '1' then it can cause issues",
            ))
            .stdout(predicate::str::contains("Done!"))
            .stderr(predicate::str::contains("Conflict found: Bad Addon (111)"))
            .stderr(predicate::str::contains("Alternative: Use This Instead"))
            .stderr(predicate::str::contains("222").not());
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_default_list_from_settings() {
    let server = serve_fixture().await;
    let base_url = format!("{}/sharedfiles/filedetails/", server.uri());
    let dir = TempDir::new().unwrap();
    fs::copy(fixture_path("appSettings.json"), dir.path().join("appSettings.json")).unwrap();

    run_blocking(move || {
        checker(dir.path(), &base_url)
            .arg("999")
            .assert()
            .success()
            .stdout(predicate::str::contains("Checking list: Banned"))
            .stdout(predicate::str::contains("Checking list: Outdated").not());
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_explicit_yaml_config() {
    let server = serve_fixture().await;
    let base_url = format!("{}/sharedfiles/filedetails/", server.uri());
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("lists.yaml");
    fs::write(&config, "Broken:\n  \"222\": Breaks the map vote\n").unwrap();

    run_blocking(move || {
        checker(dir.path(), &base_url)
            .args(["999", "all", "--config"])
            .arg(&config)
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Conflict found: Breaks the map vote (222)",
            ));
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_without_settings_file() {
    let server = serve_fixture().await;
    let base_url = format!("{}/sharedfiles/filedetails/", server.uri());
    let dir = TempDir::new().unwrap();

    run_blocking(move || {
        checker(dir.path(), &base_url)
            .arg("999")
            .assert()
            .success()
            .stdout(predicate::str::contains("Done!"))
            .stderr(predicate::str::contains("Conflict").not());
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_failure_exits_non_zero() {
    let server = serve_fixture().await;
    let base_url = format!("{}/sharedfiles/filedetails/", server.uri());
    let dir = TempDir::new().unwrap();

    run_blocking(move || {
        checker(dir.path(), &base_url)
            .arg("404404")
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "Failed to fetch workshop collection 404404",
            ))
            .stdout(predicate::str::contains("Done!").not());
    })
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_convars_exits_non_zero() {
    let server = serve_fixture().await;
    let base_url = format!("{}/sharedfiles/filedetails/", server.uri());
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("appSettings.json"),
        r#"{ "ConVars": { "111": { "Conflicts": [] } } }"#,
    )
    .unwrap();

    run_blocking(move || {
        checker(dir.path(), &base_url)
            .arg("999")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid entry '111' in section 'ConVars'"));
    })
    .await;
}
