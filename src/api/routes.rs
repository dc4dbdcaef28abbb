//! HTTP route handlers for Axum.

use axum::{extract::State, http::StatusCode, Json};
use tracing::warn;

use crate::{
    api::types::{EntitiesRequest, ErrorBody, HealthDto, TranscriptRequest},
    error::AnalysisError,
    model::AnalysisResult,
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn analyze_transcript(
    State(state): State<AppState>,
    Json(req): Json<TranscriptRequest>,
) -> ApiResult<AnalysisResult> {
    let transcript = req.transcription.unwrap_or_default();
    state
        .analyzer
        .analyze_transcript(state.extractor.as_ref(), &req.patient_name, &transcript)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn analyze_entities(
    State(state): State<AppState>,
    Json(req): Json<EntitiesRequest>,
) -> ApiResult<AnalysisResult> {
    if req.entities.is_empty() {
        return Err(error_response(AnalysisError::Input(
            "no entities provided".into(),
        )));
    }
    let result = state.analyzer.analyze(&req.patient_name, req.entities).await;
    Ok(Json(result))
}

fn error_response(err: AnalysisError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &err {
        AnalysisError::Input(_) => StatusCode::BAD_REQUEST,
        AnalysisError::Extraction(_) => StatusCode::BAD_GATEWAY,
    };
    warn!(%err, %status, "analysis request failed");
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}
