//! End-to-end runs against a local Gemini-style server.

mod common;

use common::{TestContext, candidate_body, comment_exploder_args};
use predicates::prelude::*;
use serde_json::json;

const ENDPOINT: &str = "/v1beta/models/test-model:generateContent";

#[test]
fn run_sends_one_request_and_renders_reply() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    ctx.write_backend_config(&server.url());

    let reply = "```json\n{\"summary\": \"They need a routine\", \"replyScripts\": [\"Start with 10 minutes\", {\"text\": \"odd\"}, 7]}\n```";
    let mock = server
        .mock("POST", ENDPOINT)
        .match_header("x-goog-api-key", "test-key")
        .match_body(mockito::Matcher::Regex("fitness coaching".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidate_body(reply))
        .expect(1)
        .create();

    let mut args = comment_exploder_args();
    args.push("--json");
    let output = ctx.cli().args(&args).env("GEMINI_API_KEY", "test-key").output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"], "They need a routine");
    assert_eq!(value["replyScripts"], json!(["Start with 10 minutes", "{\"text\":\"odd\"}"]));
    assert!(value["contentIdeas"].as_array().is_some_and(|items| !items.is_empty()));

    mock.assert();
    ctx.assert_trial_consumed(true);
}

#[test]
fn gated_run_never_reaches_server() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    ctx.write_backend_config(&server.url());

    let mock = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(candidate_body("{}"))
        .expect(1)
        .create();

    ctx.cli().args(comment_exploder_args()).env("GEMINI_API_KEY", "test-key").assert().success();
    ctx.cli().args(comment_exploder_args()).env("GEMINI_API_KEY", "test-key").assert().code(2);

    mock.assert();
}

#[test]
fn server_error_surfaces_message_and_keeps_trial() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    ctx.write_backend_config(&server.url());

    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(503)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "The model is overloaded"}}"#)
        .create();

    ctx.cli()
        .args(comment_exploder_args())
        .env("GEMINI_API_KEY", "test-key")
        .assert()
        .failure()
        .stderr(predicate::str::contains("The model is overloaded"));

    ctx.assert_trial_consumed(false);
}

#[test]
fn non_json_reply_renders_fallback_and_spends_trial() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    ctx.write_backend_config(&server.url());

    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidate_body("I'd rather not answer in JSON."))
        .create();

    ctx.cli()
        .args(comment_exploder_args())
        .env("GEMINI_API_KEY", "test-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary"))
        .stdout(predicate::str::contains("Engagement Questions"));

    ctx.assert_trial_consumed(true);
}
