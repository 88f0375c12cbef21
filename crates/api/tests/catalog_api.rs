mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};

#[tokio::test]
async fn lists_supported_models() {
    let app = build_test_app();
    let response = get(app.router, "/api/models").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let models = json["models"].as_array().unwrap();
    assert_eq!(json["count"], models.len());
    assert!(models.iter().any(|m| m == "gpt-2"));
    assert!(models.iter().any(|m| m == "t5-small"));
}

#[tokio::test]
async fn lists_attack_categories() {
    let app = build_test_app();
    let json = body_json(get(app.router, "/api/attack-categories").await).await;

    assert_eq!(
        json["categories"],
        serde_json::json!([
            "Phishing",
            "Prompt Injection",
            "Jailbreaking",
            "Data Extraction"
        ])
    );
    assert_eq!(json["count"], 4);
}

#[tokio::test]
async fn lists_defenses() {
    let app = build_test_app();
    let json = body_json(get(app.router, "/api/defenses").await).await;

    let defenses = json["defenses"].as_array().unwrap();
    assert_eq!(json["count"], defenses.len());
    assert!(defenses.iter().any(|d| d == "SmoothLLM"));
}
