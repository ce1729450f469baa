mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

async fn post_form(app: axum::Router, body: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_health_check_without_model() {
    let (status, json) = get_json(common::heuristic_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model_available"], false);
}

#[tokio::test]
async fn test_predict_high_risk_applicant() {
    let body = "cibil=550&fraud_info=1&income_source=Business&tax_paid=No\
                &timely_paid=No&loan_amount=400000&loan_interest=13.5";
    let (status, json) = post_form(common::heuristic_app(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["prob"], 100);
    assert_eq!(json["probability"], 1.0);
    assert_eq!(json["label"], 1);
    assert_eq!(json["label_name"], "fraud");
    assert_eq!(json["source"], "heuristic");
    // Echoed inputs
    assert_eq!(json["cibil"], 550.0);
    assert_eq!(json["fraud_info"], 1);
    assert_eq!(json["income_source"], "Business");
    assert_eq!(json["tax_paid"], "No");
    assert_eq!(json["timely_paid"], "No");
    assert_eq!(json["loan_amount"], 400000.0);
    assert_eq!(json["loan_interest"], 13.5);
    assert_eq!(json["rules"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_predict_clean_applicant() {
    let body = "cibil=750&fraud_info=0&income_source=Salary&tax_paid=Yes\
                &timely_paid=Yes&loan_amount=100000&loan_interest=9";
    let (status, json) = post_form(common::heuristic_app(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["prob"], 0);
    assert_eq!(json["label"], 0);
    assert_eq!(json["label_name"], "no_fraud");
    assert!(json["rules"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_predict_echoes_submitted_values() {
    let body = "cibil=750&tax_paid=no&timely_paid=maybe&fraud_info=2";
    let (status, json) = post_form(common::heuristic_app(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tax_paid"], "no");
    assert_eq!(json["timely_paid"], "maybe");
    assert_eq!(json["fraud_info"], 2);
    // None of those values is negative for scoring.
    assert_eq!(json["prob"], 0);
    assert!(json["rules"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_predict_repeated_field_uses_first_value() {
    let body = "cibil=650&cibil=800&tax_paid=No&tax_paid=Yes";
    let (status, json) = post_form(common::heuristic_app(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cibil"], 650.0);
    assert_eq!(json["tax_paid"], "No");
    assert_eq!(json["rules"], serde_json::json!(["fair_credit", "tax_not_paid"]));
}

#[tokio::test]
async fn test_predict_empty_form_uses_defaults() {
    // cibil defaults to 0, which is poor credit.
    let (status, json) = post_form(common::heuristic_app(), "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cibil"], 0.0);
    assert_eq!(json["fraud_info"], 0);
    assert_eq!(json["income_source"], "Salary");
    assert_eq!(json["tax_paid"], "Yes");
    assert_eq!(json["timely_paid"], "Yes");
    assert_eq!(json["prob"], 25);
    assert_eq!(json["label"], 0);
    assert_eq!(json["rules"], serde_json::json!(["poor_credit"]));
}

#[tokio::test]
async fn test_predict_garbage_numbers_default() {
    let body = "cibil=abc&fraud_info=maybe&loan_amount=lots&income_source=investments";
    let (status, json) = post_form(common::heuristic_app(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cibil"], 0.0);
    assert_eq!(json["fraud_info"], 0);
    assert_eq!(json["loan_amount"], 0.0);
    assert_eq!(json["prob"], 25);
}

#[tokio::test]
async fn test_predict_wrong_content_type_is_bad_request() {
    let resp = common::heuristic_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_predict_with_logistic_model() {
    // z = 0.5 * loan_interest - 5
    let (_dir, path) = common::write_model(
        r#"{"kind":"logistic","weights":[0.0,0.0,0.0,0.5],"intercept":-5.0}"#,
    );
    let app = common::build_app(common::test_config(path));

    let (status, json) = post_form(app, "cibil=800&loan_interest=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "model");
    assert_eq!(json["prob"], 50);
    assert_eq!(json["label"], 1);
    assert!(json["rules"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_predict_with_classification_only_model() {
    let (_dir, path) = common::write_model(
        r#"{"kind":"threshold","feature_index":1,"threshold":1.0,"expected_features":4}"#,
    );
    let app = common::build_app(common::test_config(path));

    let (_, flagged) = post_form(app.clone(), "cibil=800&fraud_info=1").await;
    assert_eq!(flagged["source"], "model");
    assert_eq!(flagged["prob"], 90);
    assert_eq!(flagged["label"], 1);

    let (_, clean) = post_form(app, "cibil=800&fraud_info=0").await;
    assert_eq!(clean["prob"], 10);
    assert_eq!(clean["label"], 0);
}

#[tokio::test]
async fn test_predict_shape_mismatched_model_falls_back() {
    let (_dir, path) = common::write_model(
        r#"{"kind":"logistic","weights":[1.0,1.0],"intercept":0.0}"#,
    );
    let app = common::build_app(common::test_config(path));

    let (status, json) = post_form(app, "cibil=650&income_source=Salary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "heuristic");
    assert_eq!(json["prob"], 10);
}

#[tokio::test]
async fn test_model_status_reports_loaded_model() {
    let (_dir, path) = common::write_model(
        r#"{"kind":"logistic","weights":[-0.01,3.0,0.000001,0.05],"intercept":4.5}"#,
    );
    let app = common::build_app(common::test_config(path.clone()));

    let (status, json) = get_json(app, "/api/model").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["available"], true);
    assert_eq!(json["kind"], "logistic");
    assert_eq!(json["expected_features"], 4);
    assert_eq!(json["loaded_from"], path.display().to_string());
    assert!(json["loaded_at"].is_string());
    assert_eq!(json["confidence_proxy"]["fraud"], 0.9);
}

#[tokio::test]
async fn test_model_status_reports_unavailable() {
    let (status, json) = get_json(common::heuristic_app(), "/api/model").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["available"], false);
    assert!(json["kind"].is_null());
    assert!(json["unavailable_reason"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_disabled_model_is_not_loaded() {
    let (_dir, path) = common::write_model(
        r#"{"kind":"threshold","feature_index":0,"threshold":0.0,"expected_features":4}"#,
    );
    let mut config = common::test_config(path);
    config.model_enabled = false;
    let app = common::build_app(config);

    let (_, json) = post_form(app, "cibil=800").await;
    assert_eq!(json["source"], "heuristic");
    assert_eq!(json["prob"], 0);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let resp = common::heuristic_app()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()["content-type"],
        "text/plain; version=0.0.4"
    );
}
