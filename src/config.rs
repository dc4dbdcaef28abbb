//! Runtime configuration utilities for ae-triage.

use std::{env, path::PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::{
    data::openfda::DEFAULT_BASE_URL,
    triage::{
        matcher::DEFAULT_THRESHOLD, risk::DEFAULT_HIGH_RISK_CONDITIONS, similarity::MatchStrategy,
    },
};

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// openFDA API root.
    pub openfda_base_url: String,
    /// Optional openFDA API key for higher rate limits.
    pub openfda_api_key: Option<String>,
    /// openFDA search expression narrowing the reports fetched.
    pub openfda_search: Option<String>,
    /// Reports fetched per analysis.
    pub fda_fetch_limit: usize,
    /// Maximum normalised distance for a reaction match.
    pub match_threshold: f64,
    pub match_strategy: MatchStrategy,
    /// High-risk condition vocabulary.
    pub high_risk_conditions: Vec<String>,
    /// Remote NER endpoint; the dictionary extractor is used when unset.
    pub extractor_url: Option<String>,
    /// Local JSON corpus used instead of openFDA when set.
    pub corpus_file: Option<PathBuf>,
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openfda_base_url: DEFAULT_BASE_URL.to_string(),
            openfda_api_key: None,
            openfda_search: None,
            fda_fetch_limit: 5,
            match_threshold: DEFAULT_THRESHOLD,
            match_strategy: MatchStrategy::default(),
            high_risk_conditions: DEFAULT_HIGH_RISK_CONDITIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extractor_url: None,
            corpus_file: None,
            http_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openfda_base_url = non_empty("OPENFDA_BASE_URL").unwrap_or(defaults.openfda_base_url);
        let openfda_api_key = non_empty("OPENFDA_API_KEY");
        let openfda_search = non_empty("OPENFDA_SEARCH").map(|v| v.trim().to_string());
        let fda_fetch_limit = match non_empty("FDA_FETCH_LIMIT") {
            Some(v) => v.trim().parse::<usize>().context("parsing FDA_FETCH_LIMIT")?,
            None => defaults.fda_fetch_limit,
        };
        let match_threshold: f64 = match non_empty("MATCH_THRESHOLD") {
            Some(v) => v.trim().parse::<f64>().context("parsing MATCH_THRESHOLD")?,
            None => defaults.match_threshold,
        };
        if !(0.0..=1.0).contains(&match_threshold) {
            bail!("MATCH_THRESHOLD must lie in [0, 1], got {match_threshold}");
        }
        let match_strategy = match non_empty("MATCH_STRATEGY") {
            Some(v) => v
                .trim()
                .parse::<MatchStrategy>()
                .map_err(|e| anyhow::anyhow!("parsing MATCH_STRATEGY: {e}"))?,
            None => defaults.match_strategy,
        };
        let high_risk_conditions = match non_empty("HIGH_RISK_CONDITIONS") {
            Some(v) => v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.high_risk_conditions,
        };
        let extractor_url = non_empty("EXTRACTOR_URL");
        let corpus_file = non_empty("CORPUS_FILE").map(PathBuf::from);
        let http_timeout_secs = match non_empty("HTTP_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().context("parsing HTTP_TIMEOUT_SECS")?,
            None => defaults.http_timeout_secs,
        };

        Ok(Self {
            openfda_base_url,
            openfda_api_key,
            openfda_search,
            fda_fetch_limit,
            match_threshold,
            match_strategy,
            high_risk_conditions,
            extractor_url,
            corpus_file,
            http_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.fda_fetch_limit, 5);
        assert_eq!(settings.match_threshold, 0.2);
        assert_eq!(settings.match_strategy, MatchStrategy::Levenshtein);
        assert_eq!(settings.high_risk_conditions.len(), 8);
        assert!(settings.corpus_file.is_none());
        assert!(settings.openfda_search.is_none());
    }

    #[test]
    fn openfda_search_is_read_and_blank_ignored() {
        let settings = Settings::from_lookup(lookup(&[(
            "OPENFDA_SEARCH",
            " patient.drug.medicinalproduct:\"aspirin\" ",
        )]))
        .unwrap();
        assert_eq!(
            settings.openfda_search.as_deref(),
            Some("patient.drug.medicinalproduct:\"aspirin\"")
        );

        let blank = Settings::from_lookup(lookup(&[("OPENFDA_SEARCH", "   ")])).unwrap();
        assert!(blank.openfda_search.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let settings = Settings::from_lookup(lookup(&[
            ("FDA_FETCH_LIMIT", "10"),
            ("MATCH_THRESHOLD", "0.35"),
            ("MATCH_STRATEGY", "jaro-winkler"),
            ("HIGH_RISK_CONDITIONS", "sepsis, stroke ,,"),
        ]))
        .unwrap();
        assert_eq!(settings.fda_fetch_limit, 10);
        assert_eq!(settings.match_threshold, 0.35);
        assert_eq!(settings.match_strategy, MatchStrategy::JaroWinkler);
        assert_eq!(settings.high_risk_conditions, vec!["sepsis", "stroke"]);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        assert!(Settings::from_lookup(lookup(&[("MATCH_THRESHOLD", "1.5")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("MATCH_STRATEGY", "soundex")])).is_err());
    }
}
