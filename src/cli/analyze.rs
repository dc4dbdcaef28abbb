//! CLI entry-point for a single offline or online analysis.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    config::Settings,
    data::{self, ReactionCorpusSource, StaticCorpus},
    error::AnalysisError,
    model::MedicalEntity,
    nlp,
    triage::{MatchStrategy, RiskAnalyzer},
};

/// Args for the `analyze` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Patient name echoed in the result.
    #[arg(long, default_value = "")]
    pub patient: String,
    /// Plain-text transcript to extract entities from.
    #[arg(long, conflicts_with = "entities", required_unless_present = "entities")]
    pub transcript: Option<PathBuf>,
    /// JSON array of `{text, category}` entities.
    #[arg(long)]
    pub entities: Option<PathBuf>,
    /// JSON array of reports to use instead of the configured corpus.
    #[arg(long)]
    pub corpus: Option<PathBuf>,
    /// Override the configured similarity strategy.
    #[arg(long, value_enum)]
    pub strategy: Option<MatchStrategy>,
    /// Override the configured match threshold.
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, mut settings: Settings) -> Result<()> {
    if let Some(strategy) = args.strategy {
        settings.match_strategy = strategy;
    }
    if let Some(threshold) = args.threshold {
        anyhow::ensure!(
            (0.0..=1.0).contains(&threshold),
            "--threshold must lie in [0, 1]"
        );
        settings.match_threshold = threshold;
    }

    let corpus: Arc<dyn ReactionCorpusSource> = match &args.corpus {
        Some(path) => Arc::new(
            StaticCorpus::from_path(path)
                .with_context(|| format!("load corpus {}", path.display()))?,
        ),
        None => data::load_corpus(&settings)?,
    };
    let analyzer = RiskAnalyzer::from_settings(&settings, corpus);

    let result = match (&args.transcript, &args.entities) {
        (Some(path), _) => {
            let transcript = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("read transcript {}", path.display()))?;
            let extractor = nlp::load_extractor(&settings)?;
            analyzer
                .analyze_transcript(extractor.as_ref(), &args.patient, &transcript)
                .await?
        }
        (None, Some(path)) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("read entities {}", path.display()))?;
            let entities: Vec<MedicalEntity> =
                serde_json::from_str(&raw).context("parse entities json")?;
            if entities.is_empty() {
                return Err(AnalysisError::Input(format!(
                    "no entities provided in {}",
                    path.display()
                ))
                .into());
            }
            analyzer.analyze(&args.patient, entities).await
        }
        (None, None) => anyhow::bail!("one of --transcript or --entities is required"),
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
