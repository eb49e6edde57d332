use httpmock::Method::POST;
use serde_json::json;

use crate::common::{TestApp, routes, sample_pdf};

const GENERATE: &str = "/v1beta/models/gemini-1.5-pro:generateContent";
const EMBED: &str = "/v1beta/models/embedding-001:batchEmbedContents";

mod summarize {
    use super::*;

    #[tokio::test]
    async fn returns_model_summary() {
        let app = TestApp::spawn().await;
        let mock = app
            .llm
            .mock_async(|when, then| {
                when.method(POST)
                    .path(GENERATE)
                    .header("x-goog-api-key", "test-key")
                    .body_contains("Provide a summary for the following text:");
                then.status(200).json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": "A short summary."}]}}]
                }));
            })
            .await;

        let res = app
            .post(routes::SUMMARIZE, &json!({"text": "A very long text..."}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body, json!({"summary": "A short summary."}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn provider_failure_is_500_with_provider_text() {
        let app = TestApp::spawn().await;
        app.llm
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE);
                then.status(429)
                    .json_body(json!({"error": {"message": "Resource has been exhausted"}}));
            })
            .await;

        let res = app.post(routes::SUMMARIZE, &json!({"text": "hi"})).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "UPSTREAM_ERROR");
        assert!(res.text.contains("Resource has been exhausted"), "{}", res.text);
    }

    #[tokio::test]
    async fn missing_text_is_422() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::SUMMARIZE, &json!({})).await;
        assert_eq!(res.status, 422);
    }
}

mod question_answering {
    use super::*;

    #[tokio::test]
    async fn answers_from_the_uploaded_document() {
        let app = TestApp::spawn().await;
        let embed = app
            .llm
            .mock_async(|when, then| {
                when.method(POST).path(EMBED);
                then.status(200)
                    .json_body(json!({"embeddings": [{"values": [1.0, 0.0]}]}));
            })
            .await;
        let generate = app
            .llm
            .mock_async(|when, then| {
                when.method(POST)
                    .path(GENERATE)
                    .body_contains("Total due: 120 EUR")
                    .body_contains("Question: What is the total?");
                then.status(200).json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": "120 EUR"}]}}]
                }));
            })
            .await;

        let id = app
            .upload("invoice.pdf", sample_pdf(&["Total due: 120 EUR"]))
            .await
            .id();

        let res = app
            .post(&routes::qa(id), &json!({"question": "What is the total?"}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body, json!("120 EUR"));
        assert_eq!(embed.hits_async().await, 2);
        generate.assert_async().await;
    }

    #[tokio::test]
    async fn missing_record_is_404_without_provider_calls() {
        let app = TestApp::spawn().await;
        let any = app
            .llm
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        let res = app
            .post(&routes::qa(777), &json!({"question": "Anything?"}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(any.hits_async().await, 0);
    }

    #[tokio::test]
    async fn unreadable_reference_is_500() {
        let app = TestApp::spawn().await;
        let id = app
            .create_pdf("ghost", false, "/nonexistent/ghost.pdf")
            .await;

        let res = app
            .post(&routes::qa(id), &json!({"question": "Anything?"}))
            .await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "UPSTREAM_ERROR");
    }
}
