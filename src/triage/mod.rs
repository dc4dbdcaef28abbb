//! Adverse event triage pipeline: normalise, match, score, assemble.

pub mod assemble;
pub mod matcher;
pub mod risk;
pub mod similarity;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    data::corpus::{self, ReactionCorpusSource},
    error::AnalysisError,
    model::{AdverseEventReport, AnalysisResult, MedicalEntity},
    nlp::{ner::EntityExtractor, normalize::normalize_entities},
};

pub use matcher::FuzzyMatcher;
pub use risk::RiskScorer;
pub use similarity::{MatchStrategy, SimilarityStrategy};

/// Run the stateless pipeline over one entity list and one corpus snapshot.
pub fn run_pipeline(
    patient_name: &str,
    entities: Vec<MedicalEntity>,
    reports: &[AdverseEventReport],
    matcher: &FuzzyMatcher,
    scorer: &RiskScorer,
) -> AnalysisResult {
    let entities = normalize_entities(entities);
    let matches = matcher.find_matches(&entities, reports);
    let risk = scorer.assess(&entities);
    assemble::assemble(patient_name, entities, matches, risk)
}

/// Entry point used by the HTTP and CLI layers.
///
/// Holds no per-request state, so one instance can be shared across
/// concurrent requests.
#[derive(Clone)]
pub struct RiskAnalyzer {
    corpus: Arc<dyn ReactionCorpusSource>,
    matcher: FuzzyMatcher,
    scorer: RiskScorer,
    fetch_limit: usize,
}

impl RiskAnalyzer {
    pub fn new(
        corpus: Arc<dyn ReactionCorpusSource>,
        matcher: FuzzyMatcher,
        scorer: RiskScorer,
        fetch_limit: usize,
    ) -> Self {
        Self {
            corpus,
            matcher,
            scorer,
            fetch_limit,
        }
    }

    /// Wire an analyzer from configuration around the given corpus.
    pub fn from_settings(settings: &Settings, corpus: Arc<dyn ReactionCorpusSource>) -> Self {
        let matcher = FuzzyMatcher::new(settings.match_strategy.build(), settings.match_threshold);
        let scorer = RiskScorer::new(&settings.high_risk_conditions);
        Self::new(corpus, matcher, scorer, settings.fda_fetch_limit)
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    /// Analyse an already extracted entity list. An empty list is valid and
    /// yields a minimal-risk result.
    #[instrument(skip(self, entities), fields(entities = entities.len()))]
    pub async fn analyze(
        &self,
        patient_name: &str,
        entities: Vec<MedicalEntity>,
    ) -> AnalysisResult {
        let reports = corpus::snapshot(self.corpus.as_ref(), self.fetch_limit).await;
        let result = run_pipeline(patient_name, entities, &reports, &self.matcher, &self.scorer);
        info!(
            score = result.risk_score,
            risk_level = %result.risk_level,
            matches = result.fda_matches.len(),
            "analysis complete"
        );
        result
    }

    /// Extract entities from a transcript and analyse them. Extraction and
    /// the corpus fetch run concurrently.
    #[instrument(skip(self, extractor, transcript), fields(chars = transcript.len()))]
    pub async fn analyze_transcript(
        &self,
        extractor: &dyn EntityExtractor,
        patient_name: &str,
        transcript: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        if transcript.trim().is_empty() {
            return Err(AnalysisError::Input("no transcription provided".into()));
        }
        let (extracted, reports) = futures::join!(
            extractor.extract(transcript),
            corpus::snapshot(self.corpus.as_ref(), self.fetch_limit)
        );
        let entities = extracted?;
        let result = run_pipeline(patient_name, entities, &reports, &self.matcher, &self.scorer);
        info!(
            score = result.risk_score,
            risk_level = %result.risk_level,
            matches = result.fda_matches.len(),
            "transcript analysis complete"
        );
        Ok(result)
    }
}

/// Build a fully wired analyzer and extractor from settings.
pub fn build(settings: &Settings) -> Result<(RiskAnalyzer, Arc<dyn EntityExtractor>)> {
    let corpus = crate::data::load_corpus(settings)?;
    let extractor = crate::nlp::load_extractor(settings)?;
    Ok((RiskAnalyzer::from_settings(settings, corpus), extractor))
}
