//! Entity extraction seam plus a dictionary-based fallback extractor.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::ExtractionError,
    model::{EntityCategory, MedicalEntity},
};

/// Upstream medical NER collaborator.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<MedicalEntity>, ExtractionError>;
}

/// Matched term with its byte offset in the source text.
#[derive(Debug, Clone)]
struct Span {
    start: usize,
    end: usize,
    category: EntityCategory,
}

static CONDITION_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "breathing difficulty",
        "shortness of breath",
        "chest pain",
        "unconsciousness",
        "severe allergic reaction",
        "high fever",
        "fever",
        "low oxygen levels",
        "severe headache",
        "headache",
        "severe dehydration",
        "dehydration",
        "nausea",
        "vomiting",
        "dizziness",
        "rash",
        "fatigue",
        "sepsis",
        "diarrhoea",
        "diarrhea",
        "hypotension",
        "anaphylaxis",
    ]
});

static MEDICATION_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "aspirin",
        "ibuprofen",
        "acetaminophen",
        "paracetamol",
        "amoxicillin",
        "penicillin",
        "metformin",
        "lisinopril",
        "atorvastatin",
        "warfarin",
        "insulin",
        "prednisone",
    ]
});

static PROCEDURE_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "blood test",
        "x-ray",
        "ct scan",
        "mri",
        "ecg",
        "ekg",
        "biopsy",
        "surgery",
        "chest x-ray",
    ]
});

static ANATOMY_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "chest", "head", "heart", "lung", "lungs", "stomach", "abdomen", "throat", "skin",
        "liver", "kidney",
    ]
});

static PATTERNS: Lazy<Vec<(EntityCategory, Regex)>> = Lazy::new(|| {
    let groups: [(EntityCategory, &Lazy<Vec<&'static str>>); 4] = [
        (EntityCategory::MedicalCondition, &CONDITION_TERMS),
        (EntityCategory::Medication, &MEDICATION_TERMS),
        (EntityCategory::TestTreatmentProcedure, &PROCEDURE_TERMS),
        (EntityCategory::Anatomy, &ANATOMY_TERMS),
    ];
    groups
        .into_iter()
        .map(|(category, terms)| {
            // longest first so "chest x-ray" wins over "chest" inside one alternation
            let mut sorted: Vec<&str> = terms.iter().copied().collect();
            sorted.sort_by_key(|t| std::cmp::Reverse(t.len()));
            let alternation = sorted
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
                .expect("escaped term alternation compiles");
            (category, pattern)
        })
        .collect()
});

/// Dictionary-backed extractor used when no remote NER service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DictionaryExtractor;

impl DictionaryExtractor {
    /// Scan `text` for known terms, returning entities in order of appearance.
    pub fn scan(&self, text: &str) -> Vec<MedicalEntity> {
        let mut spans = Vec::new();
        for (category, pattern) in PATTERNS.iter() {
            spans.extend(find_terms(text, pattern, *category));
        }
        spans.sort_by_key(|s| (s.start, std::cmp::Reverse(s.end)));

        // drop spans nested in an earlier, longer span ("chest" inside "chest pain")
        let mut out = Vec::new();
        let mut covered_to = 0usize;
        for span in spans {
            if span.start < covered_to {
                continue;
            }
            covered_to = span.end;
            out.push(MedicalEntity::new(&text[span.start..span.end], span.category));
        }
        out
    }
}

#[async_trait]
impl EntityExtractor for DictionaryExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<MedicalEntity>, ExtractionError> {
        Ok(self.scan(text))
    }
}

fn find_terms(text: &str, pattern: &Regex, category: EntityCategory) -> Vec<Span> {
    pattern
        .find_iter(text)
        .map(|m| Span {
            start: m.start(),
            end: m.end(),
            category,
        })
        .collect()
}
