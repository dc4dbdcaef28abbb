use std::collections::HashMap;

use ae_triage::{
    config::Settings,
    data::{load_corpus, openfda::parse_event_response, ReactionCorpusSource},
};
use axum::{extract::Query, http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

const BODY: &str = r#"{
  "meta": {"results": {"skip": 0, "limit": 2, "total": 2}},
  "results": [
    {
      "safetyreportid": "5801206-7",
      "serious": "1",
      "patient": {
        "drug": [{"medicinalproduct": "DURAGESIC-100"}, {"medicinalproduct": "ASPIRIN"}],
        "reaction": [{"reactionmeddrapt": "Drug administration error"}, {"reactionmeddrapt": "Overdose"}]
      }
    },
    {
      "serious": "2",
      "patient": {"reaction": [{"reactionmeddrapt": "Nausea"}]}
    }
  ]
}"#;

#[test]
fn reports_map_openfda_fields() {
    let reports = parse_event_response(BODY).unwrap();
    assert_eq!(reports.len(), 2);

    let first = &reports[0];
    assert_eq!(first.report_id, "5801206-7");
    assert_eq!(first.drug, "duragesic-100");
    assert!(first.serious);
    let reactions: Vec<_> = first.reactions.iter().map(String::as_str).collect();
    assert_eq!(reactions, vec!["Drug administration error", "Overdose"]);

    let second = &reports[1];
    assert_eq!(second.report_id, "unidentified-1");
    assert_eq!(second.drug, "unknown");
    assert!(!second.serious);
}

#[test]
fn missing_results_is_empty_and_garbage_is_an_error() {
    assert!(parse_event_response("{}").unwrap().is_empty());
    assert!(parse_event_response("<html>").is_err());
}

const SEARCH: &str = r#"patient.drug.medicinalproduct:"aspirin""#;

/// Local stand-in for openFDA: answers `BODY` only to the configured search,
/// and 404 ("no matches") to anything else.
async fn spawn_openfda_stub() -> String {
    async fn events(Query(params): Query<HashMap<String, String>>) -> (StatusCode, String) {
        match params.get("search").map(String::as_str) {
            Some(SEARCH) => (StatusCode::OK, BODY.to_string()),
            _ => (StatusCode::NOT_FOUND, r#"{"error":{"code":"NOT_FOUND"}}"#.to_string()),
        }
    }
    let app = Router::new().route("/drug/event.json", get(events));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn configured_search_reaches_openfda() {
    let base = spawn_openfda_stub().await;
    let settings = Settings {
        openfda_base_url: base.clone(),
        openfda_search: Some(SEARCH.to_string()),
        ..Settings::default()
    };
    let reports = load_corpus(&settings).unwrap().fetch(5).await.unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].report_id, "5801206-7");

    let unfiltered = Settings {
        openfda_base_url: base,
        ..Settings::default()
    };
    let reports = load_corpus(&unfiltered).unwrap().fetch(5).await.unwrap();
    assert!(reports.is_empty());
}
