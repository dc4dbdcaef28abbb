//! Risk classification from the static high-risk vocabulary.

use indexmap::IndexSet;
use tracing::debug;

use crate::{
    model::{MedicalEntity, RiskAssessment, RiskLevel},
    nlp::normalize::fold,
};

/// Condition phrases considered urgent regardless of corpus matches.
pub const DEFAULT_HIGH_RISK_CONDITIONS: &[&str] = &[
    "breathing difficulty",
    "chest pain",
    "unconsciousness",
    "severe allergic reaction",
    "high fever",
    "low oxygen levels",
    "severe headache",
    "severe dehydration",
];

/// Score per high-risk hit count; counts past the end use the last entry.
const SCORE_STAIRCASE: [u8; 6] = [0, 30, 60, 70, 80, 100];

/// Map the number of high-risk hits to a score.
pub fn score_for_count(count: usize) -> u8 {
    SCORE_STAIRCASE[count.min(SCORE_STAIRCASE.len() - 1)]
}

/// Map a score to its band, highest band first.
///
/// Three or more high-risk hits (score 70 and up) already rate as `High`.
pub fn level_for_score(score: u8) -> RiskLevel {
    if score >= 70 {
        RiskLevel::High
    } else if score >= 60 {
        RiskLevel::Moderate
    } else if score >= 30 {
        RiskLevel::Low
    } else {
        RiskLevel::Minimal
    }
}

#[derive(Debug, Clone)]
pub struct RiskScorer {
    vocabulary: IndexSet<String>,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_RISK_CONDITIONS.iter().copied())
    }
}

impl RiskScorer {
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vocabulary = vocabulary
            .into_iter()
            .map(|term| fold(term.as_ref()))
            .filter(|term| !term.is_empty())
            .collect();
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(String::as_str)
    }

    /// Classify normalised entities. Membership is exact on folded text.
    pub fn assess(&self, entities: &[MedicalEntity]) -> RiskAssessment {
        let high_risk_conditions: Vec<String> = entities
            .iter()
            .filter(|e| self.vocabulary.contains(e.text.as_str()))
            .map(|e| e.text.clone())
            .collect();
        let score = score_for_count(high_risk_conditions.len());
        let level = level_for_score(score);
        debug!(hits = high_risk_conditions.len(), score, risk_level = %level, "risk assessed");
        RiskAssessment {
            high_risk_conditions,
            score,
            level,
        }
    }
}
