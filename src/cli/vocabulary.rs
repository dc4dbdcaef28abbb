//! CLI entry-point listing the high-risk vocabulary in effect.

use anyhow::Result;
use tracing::instrument;

use crate::{config::Settings, triage::RiskScorer};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let scorer = RiskScorer::new(&settings.high_risk_conditions);
    for term in scorer.vocabulary() {
        println!("{term}");
    }
    Ok(())
}
