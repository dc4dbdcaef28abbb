//! Error taxonomy for the triage core and its upstream collaborators.

use thiserror::Error;

/// Request-level failures surfaced to the caller of the analyzer.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    Input(String),
    #[error("entity extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Failures raised by an [`EntityExtractor`](crate::nlp::ner::EntityExtractor).
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("extractor request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("extractor returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("extractor payload could not be decoded: {0}")]
    Decode(String),
}

/// Failures raised by a [`ReactionCorpusSource`](crate::data::corpus::ReactionCorpusSource).
///
/// These never abort an analysis; the corpus adapter swaps them for an empty
/// snapshot.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("corpus returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("corpus payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("corpus file unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("corpus unavailable: {0}")]
    Unavailable(String),
}
