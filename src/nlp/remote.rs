//! HTTP client for an external medical NER service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{
    error::ExtractionError,
    model::{EntityCategory, MedicalEntity},
    nlp::ner::EntityExtractor,
};

/// Posts `{"text": ...}` to a configured endpoint and expects
/// `{"entities": [{"text": ..., "category": ...}]}` back.
#[derive(Debug, Clone)]
pub struct RemoteExtractor {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    entities: Vec<RawEntity>,
}

/// Entity as sent upstream; the category stays a free-form tag until mapped.
#[derive(Debug, Deserialize)]
struct RawEntity {
    text: String,
    category: String,
}

/// Decode an extractor response body.
///
/// Entities tagged with a category outside [`EntityCategory`] (e.g.
/// `PROTECTED_HEALTH_INFORMATION`, `TIME_EXPRESSION`) are skipped.
pub fn decode_entities(body: &str) -> Result<Vec<MedicalEntity>, ExtractionError> {
    let payload: ExtractResponse =
        serde_json::from_str(body).map_err(|e| ExtractionError::Decode(e.to_string()))?;
    let mut entities = Vec::with_capacity(payload.entities.len());
    for raw in payload.entities {
        match EntityCategory::from_tag(&raw.category) {
            Some(category) => entities.push(MedicalEntity::new(raw.text, category)),
            None => warn!(category = %raw.category, "skipping entity with unsupported category"),
        }
    }
    Ok(entities)
}

impl RemoteExtractor {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ExtractionError> {
        let client = Client::builder()
            .user_agent("ae-triage/0.1")
            .timeout(timeout)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl EntityExtractor for RemoteExtractor {
    #[instrument(skip(self, text), fields(endpoint = %self.endpoint, chars = text.len()))]
    async fn extract(&self, text: &str) -> Result<Vec<MedicalEntity>, ExtractionError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&ExtractRequest { text })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ExtractionError::Status(resp.status()));
        }
        let body = resp.text().await?;
        let entities = decode_entities(&body)?;
        debug!(entities = entities.len(), "remote extraction complete");
        Ok(entities)
    }
}
