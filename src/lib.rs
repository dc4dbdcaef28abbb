//! Adverse event triage: entity normalisation, FAERS reaction matching and
//! risk scoring behind a small HTTP/CLI surface.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod model;
pub mod nlp;
pub mod triage;

pub use error::{AnalysisError, CorpusError, ExtractionError};
pub use model::{
    AdverseEventReport, AnalysisResult, EntityCategory, Match, MedicalEntity, RiskAssessment,
    RiskLevel,
};
pub use triage::{run_pipeline, FuzzyMatcher, RiskAnalyzer, RiskScorer};
