//! Approximate matching of entities against corpus reaction terms.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    model::{AdverseEventReport, Match, MedicalEntity},
    triage::similarity::{Levenshtein, SimilarityStrategy},
};

/// Default maximum normalised distance for a reaction to qualify.
pub const DEFAULT_THRESHOLD: f64 = 0.2;

/// Finds, per entity and per report, the best qualifying reaction term.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    strategy: Arc<dyn SimilarityStrategy>,
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(Arc::new(Levenshtein), DEFAULT_THRESHOLD)
    }
}

impl FuzzyMatcher {
    /// `threshold` is clamped into `[0, 1]`.
    pub fn new(strategy: Arc<dyn SimilarityStrategy>, threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self {
            strategy,
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// One match per (entity, report) pair that clears the threshold, in
    /// entity order then report order.
    pub fn find_matches(
        &self,
        entities: &[MedicalEntity],
        reports: &[AdverseEventReport],
    ) -> Vec<Match> {
        let mut matches = Vec::new();
        for entity in entities {
            for report in reports {
                if let Some(reaction) = self.best_reaction(&entity.text, report) {
                    trace!(
                        symptom = %entity.text,
                        reaction,
                        report = %report.report_id,
                        "reaction matched"
                    );
                    matches.push(Match {
                        symptom: entity.text.clone(),
                        category: entity.category,
                        drug: report.drug.clone(),
                        report_id: report.report_id.clone(),
                        serious: report.serious,
                        reaction: reaction.to_string(),
                    });
                }
            }
        }
        debug!(
            entities = entities.len(),
            reports = reports.len(),
            matches = matches.len(),
            "fuzzy matching complete"
        );
        matches
    }

    /// Lowest-distance qualifying reaction in `report`; ties keep the first
    /// in stored order.
    pub fn best_reaction<'r>(
        &self,
        text: &str,
        report: &'r AdverseEventReport,
    ) -> Option<&'r str> {
        let mut best: Option<(f64, &str)> = None;
        for reaction in &report.reactions {
            let distance = self.strategy.distance(text, reaction);
            if distance > self.threshold {
                continue;
            }
            match best {
                Some((current, _)) if distance >= current => {}
                _ => best = Some((distance, reaction.as_str())),
            }
        }
        best.map(|(_, reaction)| reaction)
    }
}
