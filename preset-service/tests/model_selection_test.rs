mod common;

use common::{TEST_PASSWORD, TestApp, requests_to};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const FLASH_PATH: &str = "/models/gemini-1.5-flash:generateContent";
const PRO_PATH: &str = "/models/gemini-pro:generateContent";

fn model_listing() -> serde_json::Value {
    json!({
        "models": [
            { "name": "models/gemini-pro", "supportedGenerationMethods": ["generateContent"] },
            { "name": "models/gemini-1.5-flash", "supportedGenerationMethods": ["generateContent"] }
        ]
    })
}

fn candidate_body(text: &str) -> serde_json::Value {
    json!({ "candidates": [ { "content": { "parts": [ { "text": text } ] } } ] })
}

#[tokio::test]
async fn discovery_prefers_flash_over_pro() {
    let app = TestApp::spawn_with_discovery().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_listing()))
        .mount(&app.gemini)
        .await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("{\"AMP\": 4}")))
        .mount(&app.gemini)
        .await;

    let response = app.post_generate(TEST_PASSWORD, "Back in Black").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(requests_to(&app.gemini, FLASH_PATH).await, 1);
    assert_eq!(requests_to(&app.gemini, PRO_PATH).await, 0);
}

#[tokio::test]
async fn generation_falls_back_to_next_model_once() {
    let app = TestApp::spawn_with_discovery().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_listing()))
        .mount(&app.gemini)
        .await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "message": "flash tier overloaded", "code": 503 }
        })))
        .mount(&app.gemini)
        .await;
    Mock::given(method("POST"))
        .and(path(PRO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("{\"DST\": 8}")))
        .mount(&app.gemini)
        .await;

    let response = app.post_generate(TEST_PASSWORD, "Thunderstruck").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["json"], "{\"DST\": 8}");
    assert_eq!(requests_to(&app.gemini, FLASH_PATH).await, 1);
    assert_eq!(requests_to(&app.gemini, PRO_PATH).await, 1);
}

#[tokio::test]
async fn fallback_error_is_surfaced_verbatim() {
    let app = TestApp::spawn_with_discovery().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_listing()))
        .mount(&app.gemini)
        .await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "message": "flash tier overloaded", "code": 503 }
        })))
        .mount(&app.gemini)
        .await;
    Mock::given(method("POST"))
        .and(path(PRO_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "pro quota exhausted", "code": 429 }
        })))
        .mount(&app.gemini)
        .await;

    let response = app.post_generate(TEST_PASSWORD, "Thunderstruck").await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(
        body["error"]
            .as_str()
            .expect("error should be a string")
            .contains("pro quota exhausted")
    );
}

#[tokio::test]
async fn no_usable_models_is_an_error() {
    let app = TestApp::spawn_with_discovery().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                { "name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"] }
            ]
        })))
        .mount(&app.gemini)
        .await;

    let response = app.post_generate(TEST_PASSWORD, "Back in Black").await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(
        body["error"]
            .as_str()
            .expect("error should be a string")
            .contains("no usable AI models")
    );
}

#[tokio::test]
async fn listing_failure_is_an_error() {
    let app = TestApp::spawn_with_discovery().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.gemini)
        .await;

    let response = app.post_generate(TEST_PASSWORD, "Back in Black").await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(
        body["error"]
            .as_str()
            .expect("error should be a string")
            .contains("model listing failed")
    );
}

#[tokio::test]
async fn fixed_model_skips_discovery() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("{\"CAB\": 2}")))
        .mount(&app.gemini)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.sheet)
        .await;

    let response = app.post_generate(TEST_PASSWORD, "Back in Black").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(requests_to(&app.gemini, "/models").await, 0);
    assert_eq!(requests_to(&app.gemini, FLASH_PATH).await, 1);
}
