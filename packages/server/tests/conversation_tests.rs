//! Integration tests for /verify and /ask.

mod common;

use crate::common::TestHarness;
use axum::http::StatusCode;
use sanity_core::kernel::{MockChatModel, MockClassifier};
use serde_json::json;

#[tokio::test]
async fn verify_returns_parsed_verdict_and_raw_body() {
    let chat = MockChatModel::new().with_response("Prediction: Real\nReasoning: It cites named officials.");
    let ctx = TestHarness::with(MockClassifier::confident_real(), chat);

    let (status, body) = ctx
        .client
        .post("/verify", json!({ "article_text": "Minister opens bridge." }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "Real");
    assert_eq!(body["reasoning"], "It cites named officials.");
    assert_eq!(body["raw"]["id"], "mock-completion");
    assert_eq!(ctx.chat.call_count(), 1);
}

#[tokio::test]
async fn verify_rejects_empty_article_without_remote_call() {
    let ctx = TestHarness::new();

    let (status, body) = ctx.client.post("/verify", json!({ "article_text": "" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "article_text is required");
    assert_eq!(ctx.chat.call_count(), 0);
}

#[tokio::test]
async fn verify_without_api_key_is_unavailable() {
    let ctx = TestHarness::with(MockClassifier::confident_real(), MockChatModel::without_api_key());

    let (status, body) = ctx.client.post("/verify", json!({ "article_text": "Story" })).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("GROQ_API_KEY"));
}

#[tokio::test]
async fn verify_upstream_failure_is_bad_gateway() {
    let ctx = TestHarness::with(
        MockClassifier::confident_real(),
        MockChatModel::failing_with_status(500, "upstream exploded"),
    );

    let (status, _) = ctx.client.post("/verify", json!({ "article_text": "Story" })).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn ask_uses_stored_context_from_predict() {
    let chat = MockChatModel::new().with_default_response("- The council voted 7 to 2.");
    let ctx = TestHarness::with(MockClassifier::confident_real(), chat);

    let (_, predicted) = ctx
        .client
        .post("/predict", json!({ "text": "The council voted 7 to 2 on transit." }))
        .await;
    let context_id = predicted["context_id"].as_str().unwrap().to_string();

    let (status, body) = ctx
        .client
        .post("/ask", json!({ "question": "What was the vote?", "context_id": context_id }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "- The council voted 7 to 2.");

    let calls = ctx.chat.calls();
    let prompt = &calls.last().unwrap()[1].content;
    assert!(prompt.starts_with("Article Content:\nThe council voted 7 to 2 on transit.\n"));
    assert!(prompt.contains("Original Prediction: Real\n"));
    assert!(prompt.contains("Verification Summary (if available): Not available\n"));
    assert!(prompt.contains("What was the vote?"));
}

#[tokio::test]
async fn ask_with_inline_article() {
    let ctx = TestHarness::new();

    let (status, _) = ctx
        .client
        .post(
            "/ask",
            json!({
                "question": "Who is quoted?",
                "article_text": "The mayor said hello.",
                "model_prediction": "Fake"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let prompt = &ctx.chat.calls()[0][1].content;
    assert!(prompt.contains("Article Content:\nThe mayor said hello."));
    assert!(prompt.contains("Original Prediction: Fake"));
}

#[tokio::test]
async fn ask_with_unknown_context_falls_back_to_direct_question() {
    let ctx = TestHarness::new();

    let (status, _) = ctx
        .client
        .post("/ask", json!({ "question": "Is the moon hollow?", "context_id": "nope" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    let prompt = &ctx.chat.calls()[0][1].content;
    assert!(prompt.starts_with("User question:\nIs the moon hollow?"));
}

#[tokio::test]
async fn ask_requires_question() {
    let ctx = TestHarness::new();

    let (status, body) = ctx.client.post("/ask", json!({ "question": "  " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "question is required");
    assert_eq!(ctx.chat.call_count(), 0);
}

#[tokio::test]
async fn verify_body_without_content_type_is_still_json() {
    let ctx = TestHarness::new();

    let (status, body) = ctx
        .client
        .post_raw("/verify", None, r#"{"article_text":""}"#)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "article_text is required");
    assert_eq!(ctx.chat.call_count(), 0);
}

#[tokio::test]
async fn null_body_is_treated_as_empty_request() {
    let ctx = TestHarness::new();

    let (status, body) = ctx
        .client
        .post_raw("/verify", Some("application/json"), "null")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "article_text is required");

    let (status, body) = ctx.client.post_raw("/ask", None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "question is required");
}

#[tokio::test]
async fn mistyped_field_is_json_bad_request() {
    let ctx = TestHarness::new();

    let (status, body) = ctx
        .client
        .post_raw("/ask", Some("application/json"), r#"{"question":5}"#)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    assert_eq!(ctx.chat.call_count(), 0);
}
