//! Request and error DTOs for the JSON API.

use serde::{Deserialize, Serialize};

use crate::model::MedicalEntity;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRequest {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub transcription: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitiesRequest {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub entities: Vec<MedicalEntity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub version: &'static str,
}
