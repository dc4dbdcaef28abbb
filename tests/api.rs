use std::sync::Arc;

use ae_triage::{
    api::{router, types::ErrorBody, AppState},
    data::StaticCorpus,
    model::{AdverseEventReport, AnalysisResult, RiskLevel},
    nlp::DictionaryExtractor,
    FuzzyMatcher, RiskAnalyzer, RiskScorer,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

fn app() -> Router {
    let corpus = Arc::new(StaticCorpus::new(vec![AdverseEventReport::new(
        "1001",
        "aspirin",
        true,
        ["high fever", "rash"],
    )]));
    let analyzer = RiskAnalyzer::new(corpus, FuzzyMatcher::default(), RiskScorer::default(), 5);
    router(AppState {
        analyzer,
        extractor: Arc::new(DictionaryExtractor),
    })
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json<T: DeserializeOwned>(resp: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let resp = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn transcript_is_analysed() {
    let resp = app()
        .oneshot(post_json(
            "/api/analyze",
            r#"{"patientName":"Jane Doe","transcription":"Chest pain and a high fever since yesterday."}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let result: AnalysisResult = read_json(resp).await;
    assert_eq!(result.patient_name, "Jane Doe");
    assert_eq!(result.high_risk_conditions, vec!["chest pain", "high fever"]);
    assert_eq!(result.risk_score, 60);
    assert_eq!(result.risk_level, RiskLevel::Moderate);
    assert_eq!(result.fda_matches.len(), 1);
    assert_eq!(result.fda_matches[0].report_id, "1001");
}

#[tokio::test]
async fn missing_transcript_is_bad_request() {
    let resp = app()
        .oneshot(post_json("/api/analyze", r#"{"patientName":"Jane Doe"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = read_json(resp).await;
    assert!(body.error.contains("no transcription"));
}

#[tokio::test]
async fn entity_list_is_analysed_directly() {
    let resp = app()
        .oneshot(post_json(
            "/api/analyze/entities",
            r#"{"patientName":"P","entities":[{"text":"Rash","category":"MEDICAL_CONDITION"},{"text":"rash","category":"ANATOMY"}]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let result: AnalysisResult = read_json(resp).await;
    assert_eq!(result.extracted_entities.len(), 1);
    assert_eq!(result.risk_level, RiskLevel::Minimal);
    assert_eq!(result.fda_matches[0].reaction, "rash");
}

#[tokio::test]
async fn empty_entity_list_is_bad_request() {
    let resp = app()
        .oneshot(post_json(
            "/api/analyze/entities",
            r#"{"patientName":"P","entities":[]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = read_json(resp).await;
    assert!(body.error.contains("no entities"));
}

#[tokio::test]
async fn missing_entity_list_is_bad_request() {
    let resp = app()
        .oneshot(post_json("/api/analyze/entities", r#"{"patientName":"P"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = read_json(resp).await;
    assert!(body.error.contains("no entities"));
}
