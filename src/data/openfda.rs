//! openFDA drug adverse event client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{info, instrument};
use urlencoding::encode;

use crate::{data::corpus::ReactionCorpusSource, error::CorpusError, model::AdverseEventReport};

pub const DEFAULT_BASE_URL: &str = "https://api.fda.gov";

/// Reads FAERS reports through the openFDA `drug/event` endpoint.
#[derive(Debug, Clone)]
pub struct OpenFdaSource {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    search: Option<String>,
}

impl OpenFdaSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CorpusError> {
        let client = Client::builder()
            .user_agent("ae-triage/0.1")
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            search: None,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Restrict results with an openFDA search expression,
    /// e.g. `patient.drug.medicinalproduct:"aspirin"`.
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    fn url(&self, limit: usize) -> String {
        let mut url = format!("{base}/drug/event.json?limit={limit}", base = self.base_url);
        if let Some(search) = &self.search {
            url.push_str("&search=");
            url.push_str(&encode(search));
        }
        if let Some(key) = &self.api_key {
            url.push_str("&api_key=");
            url.push_str(&encode(key));
        }
        url
    }
}

#[async_trait]
impl ReactionCorpusSource for OpenFdaSource {
    #[instrument(skip(self))]
    async fn fetch(&self, limit: usize) -> Result<Vec<AdverseEventReport>, CorpusError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let resp = self.client.get(self.url(limit)).send().await?;
        // openFDA answers 404 when a search has no hits
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !resp.status().is_success() {
            return Err(CorpusError::Status(resp.status()));
        }
        let body = resp.text().await?;
        let reports = parse_event_response(&body)?;
        info!(reports = reports.len(), "fetched openFDA reports");
        Ok(reports)
    }
}

/// Decode an openFDA `drug/event.json` body into reports.
pub fn parse_event_response(body: &str) -> Result<Vec<AdverseEventReport>, CorpusError> {
    let payload: EventResponse = serde_json::from_str(body)?;
    Ok(payload
        .results
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| raw.into_report(idx))
        .collect())
}

#[derive(Debug, Deserialize)]
struct EventResponse {
    #[serde(default)]
    results: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    safetyreportid: Option<String>,
    serious: Option<String>,
    patient: Option<RawPatient>,
}

#[derive(Debug, Deserialize)]
struct RawPatient {
    #[serde(default)]
    drug: Vec<RawDrug>,
    #[serde(default)]
    reaction: Vec<RawReaction>,
}

#[derive(Debug, Deserialize)]
struct RawDrug {
    medicinalproduct: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReaction {
    reactionmeddrapt: Option<String>,
}

impl RawEvent {
    fn into_report(self, idx: usize) -> AdverseEventReport {
        let report_id = self
            .safetyreportid
            .unwrap_or_else(|| format!("unidentified-{idx}"));
        let serious = self.serious.as_deref() == Some("1");
        let (drug, reactions) = match self.patient {
            Some(patient) => {
                let drug = patient
                    .drug
                    .into_iter()
                    .next()
                    .and_then(|d| d.medicinalproduct)
                    .unwrap_or_else(|| "unknown".to_string());
                let reactions: Vec<String> = patient
                    .reaction
                    .into_iter()
                    .filter_map(|r| r.reactionmeddrapt)
                    .collect();
                (drug, reactions)
            }
            None => ("unknown".to_string(), Vec::new()),
        };
        AdverseEventReport::new(report_id, drug.to_lowercase(), serious, reactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_search_and_key() {
        let source = OpenFdaSource::new("https://api.fda.gov/", Duration::from_secs(1))
            .unwrap()
            .with_search(Some("patient.drug.medicinalproduct:\"aspirin\"".into()))
            .with_api_key(Some("k".into()));
        let url = source.url(5);
        assert!(url.starts_with("https://api.fda.gov/drug/event.json?limit=5&search="));
        assert!(url.contains("aspirin"));
        assert!(url.ends_with("&api_key=k"));
    }
}
