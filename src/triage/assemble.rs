use crate::model::{AnalysisResult, Match, MedicalEntity, RiskAssessment};

/// Merge pipeline outputs into the response payload.
pub fn assemble(
    patient_name: &str,
    entities: Vec<MedicalEntity>,
    matches: Vec<Match>,
    risk: RiskAssessment,
) -> AnalysisResult {
    AnalysisResult {
        patient_name: patient_name.to_string(),
        extracted_entities: entities,
        risk_score: risk.score,
        risk_level: risk.level,
        high_risk_conditions: risk.high_risk_conditions,
        fda_matches: matches,
    }
}
