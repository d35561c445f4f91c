//! Tests for failures that must stop the run before the command starts.

use crate::support::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_secrets_file() {
    let t = Test::start().await;

    let output = t.run(&["sh", "-c", ECHO_LAUNCHED]);
    assert_single_error(&output, "failed to read secrets file");
    assert_stderr_contains(&output, "secrets.txt");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_line() {
    let t = Test::with_secrets(&[("db/creds", json!({"password": "s3cr3t"}))]).await;
    t.write_secrets(&["DB_PASS=db/creds#password", "NAME=no/separator"]);

    let output = t.run(&["sh", "-c", ECHO_LAUNCHED]);
    assert_single_error(&output, "path does not contain '#' separator: no/separator");
    assert_stderr_contains(&output, "line 2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_key() {
    let t = Test::with_secrets(&[("db/creds", json!({"password": "s3cr3t"}))]).await;
    t.write_secrets(&["DB_PASS=db/creds#password", "db/creds#username"]);

    let output = t.run(&["sh", "-c", ECHO_LAUNCHED]);
    assert_single_error(&output, "key 'username' not found in secret path 'db/creds'");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_duplicate_secret_names() {
    let t = Test::with_secrets(&[
        ("a", json!({"k": "1"})),
        ("b", json!({"k": "2"})),
    ])
    .await;
    t.write_secrets(&["SAME=a#k", "SAME=b#k"]);

    let output = t.run_isolated(&["/bin/sh", "-c", ECHO_LAUNCHED]);
    assert_single_error(&output, "duplicate environment variable: SAME");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_secret_clashes_with_inherited_var() {
    let t = Test::with_secrets(&[("a", json!({"k": "1"}))]).await;
    t.write_secrets(&["CLASHING=a#k"]);

    let output = t
        .cmd()
        .env("CLASHING", "from-parent")
        .args(["sh", "-c", ECHO_LAUNCHED])
        .output()
        .unwrap();
    assert_single_error(&output, "duplicate environment variable: CLASHING");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_command_not_found() {
    let t = Test::with_secrets(&[("a", json!({"k": "1"}))]).await;
    t.write_secrets(&["a#k"]);

    let output = t.run(&["/nonexistent/vaultrun-missing-command"]);
    assert_single_error(&output, "failed to execute /nonexistent/vaultrun-missing-command");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_forbidden_is_one_line_after_all_retries() {
    let t = Test::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/denied"))
        .respond_with(ResponseTemplate::new(403))
        .expect(10)
        .mount(&t.server)
        .await;
    t.write_secrets(&["V=denied#k"]);

    let output = t
        .cmd()
        .args(["--retry-base-delay-ms", "1"])
        .args(["sh", "-c", ECHO_LAUNCHED])
        .output()
        .unwrap();
    assert_single_error(&output, "access forbidden");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_body_in_message() {
    let t = Test::start().await;
    t.mount_status("broken", 500, "{\"errors\":[\"storage offline\"]}")
        .await;
    t.write_secrets(&["V=broken#k"]);

    let output = t
        .cmd()
        .args(["--retry-base-delay-ms", "1"])
        .args(["sh", "-c", ECHO_LAUNCHED])
        .output()
        .unwrap();
    assert_single_error(
        &output,
        "internal server error: {\"errors\":[\"storage offline\"]}",
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_reports_path() {
    let t = Test::start().await;
    t.mount_status("gone", 404, "").await;
    t.write_secrets(&["V=gone#k"]);

    let output = t
        .cmd()
        .args(["--retry-base-delay-ms", "1", "--max-attempts", "2"])
        .args(["sh", "-c", ECHO_LAUNCHED])
        .output()
        .unwrap();
    assert_single_error(&output, "secret not found: gone");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_one_failing_path_blocks_the_rest() {
    let t = Test::with_secrets(&[("ok", json!({"k": "fine"}))]).await;
    t.mount_status("sealed", 503, "Vault is sealed").await;
    t.write_secrets(&["GOOD=ok#k", "BAD=sealed#k"]);

    let output = t
        .cmd()
        .args(["--retry-base-delay-ms", "1"])
        .args(["sh", "-c", "echo \"${GOOD:-no-good} vaultrun-launched\""])
        .output()
        .unwrap();
    assert_single_error(&output, "server unavailable: Vault is sealed");
    assert!(!stdout(&output).contains("fine"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_retries_are_logged_only_when_verbose() {
    let t = Test::start().await;
    t.mount_status("denied", 403, "").await;
    t.write_secrets(&["V=denied#k"]);

    let output = t
        .cmd()
        .args(["--verbose", "--retry-base-delay-ms", "1", "--max-attempts", "3"])
        .args(["sh", "-c", ECHO_LAUNCHED])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_eq!(stderr(&output).matches("request failed, retrying").count(), 2);
    assert_stderr_contains(&output, "✗ access forbidden");
}
