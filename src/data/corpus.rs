//! Reaction corpus seam and the adapter that snapshots it per request.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::{error::CorpusError, model::AdverseEventReport, nlp::normalize::fold};

/// Upstream feed of adverse event reports.
#[async_trait]
pub trait ReactionCorpusSource: Send + Sync {
    async fn fetch(&self, limit: usize) -> Result<Vec<AdverseEventReport>, CorpusError>;
}

/// Fetch a bounded snapshot with case-folded reaction terms, degrading to an
/// empty list when the source fails.
#[instrument(skip(source))]
pub async fn snapshot(
    source: &dyn ReactionCorpusSource,
    limit: usize,
) -> Vec<AdverseEventReport> {
    match source.fetch(limit).await {
        Ok(reports) => {
            let reports: Vec<_> = reports.into_iter().take(limit).map(fold_report).collect();
            debug!(reports = reports.len(), "corpus snapshot ready");
            reports
        }
        Err(err) => {
            warn!(%err, "reaction corpus unavailable; continuing without matches");
            Vec::new()
        }
    }
}

fn fold_report(report: AdverseEventReport) -> AdverseEventReport {
    AdverseEventReport {
        report_id: report.report_id,
        drug: report.drug,
        serious: report.serious,
        reactions: report
            .reactions
            .iter()
            .map(|r| fold(r))
            .filter(|r| !r.is_empty())
            .collect(),
    }
}

/// Fixed, in-memory corpus. Useful offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCorpus {
    reports: Vec<AdverseEventReport>,
}

impl StaticCorpus {
    pub fn new(reports: Vec<AdverseEventReport>) -> Self {
        Self { reports }
    }

    /// Load a JSON array of reports from disk.
    pub fn from_path(path: &Path) -> Result<Self, CorpusError> {
        let raw = std::fs::read_to_string(path)?;
        let reports: Vec<AdverseEventReport> = serde_json::from_str(&raw)?;
        Ok(Self { reports })
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[async_trait]
impl ReactionCorpusSource for StaticCorpus {
    async fn fetch(&self, limit: usize) -> Result<Vec<AdverseEventReport>, CorpusError> {
        Ok(self.reports.iter().take(limit).cloned().collect())
    }
}
