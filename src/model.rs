//! Shared domain types flowing through the triage pipeline.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Coarse category tag attached to an extracted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityCategory {
    MedicalCondition,
    Medication,
    TestTreatmentProcedure,
    Anatomy,
}

impl EntityCategory {
    /// Parse an upstream category tag; `None` for tags outside the four known ones.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "MEDICAL_CONDITION" => Some(Self::MedicalCondition),
            "MEDICATION" => Some(Self::Medication),
            "TEST_TREATMENT_PROCEDURE" => Some(Self::TestTreatmentProcedure),
            "ANATOMY" => Some(Self::Anatomy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MedicalCondition => "MEDICAL_CONDITION",
            Self::Medication => "MEDICATION",
            Self::TestTreatmentProcedure => "TEST_TREATMENT_PROCEDURE",
            Self::Anatomy => "ANATOMY",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A span of clinically relevant text tagged with a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalEntity {
    pub text: String,
    pub category: EntityCategory,
}

impl MedicalEntity {
    pub fn new(text: impl Into<String>, category: EntityCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// One adverse event report pulled from the reaction corpus.
///
/// `reactions` keeps insertion order; that order is the tie-break order used
/// by the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdverseEventReport {
    pub report_id: String,
    pub drug: String,
    pub serious: bool,
    pub reactions: IndexSet<String>,
}

impl AdverseEventReport {
    pub fn new<I, S>(
        report_id: impl Into<String>,
        drug: impl Into<String>,
        serious: bool,
        reactions: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            report_id: report_id.into(),
            drug: drug.into(),
            serious,
            reactions: reactions.into_iter().map(Into::into).collect(),
        }
    }
}

/// An entity that approximately matched a reaction term of one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub symptom: String,
    pub category: EntityCategory,
    pub drug: String,
    pub report_id: String,
    pub serious: bool,
    pub reaction: String,
}

/// Discrete risk band derived from the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Minimal,
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub high_risk_conditions: Vec<String>,
    pub score: u8,
    pub level: RiskLevel,
}

/// Response payload handed back to API and CLI callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub patient_name: String,
    pub extracted_entities: Vec<MedicalEntity>,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub high_risk_conditions: Vec<String>,
    pub fda_matches: Vec<Match>,
}
