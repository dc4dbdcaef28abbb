//! String similarity strategies used by the reaction matcher.

use std::{fmt, str::FromStr, sync::Arc};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, levenshtein};

/// Normalised distance between two folded terms: 0.0 is identical, 1.0 is
/// nothing in common.
pub trait SimilarityStrategy: Send + Sync + fmt::Debug {
    fn distance(&self, a: &str, b: &str) -> f64;
}

/// Identical strings only.
#[derive(Debug, Default, Clone, Copy)]
pub struct Exact;

impl SimilarityStrategy for Exact {
    fn distance(&self, a: &str, b: &str) -> f64 {
        if a == b {
            0.0
        } else {
            1.0
        }
    }
}

/// Either term contained in the other.
#[derive(Debug, Default, Clone, Copy)]
pub struct Substring;

impl SimilarityStrategy for Substring {
    fn distance(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return if a == b { 0.0 } else { 1.0 };
        }
        if a.contains(b) || b.contains(a) {
            0.0
        } else {
            1.0
        }
    }
}

/// Edit count relative to the longer term, in characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Levenshtein;

impl SimilarityStrategy for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> f64 {
        let longest = a.chars().count().max(b.chars().count());
        if longest == 0 {
            return 0.0;
        }
        levenshtein(a, b) as f64 / longest as f64
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JaroWinkler;

impl SimilarityStrategy for JaroWinkler {
    fn distance(&self, a: &str, b: &str) -> f64 {
        1.0 - jaro_winkler(a, b)
    }
}

/// Configurable choice of built-in strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    Exact,
    Substring,
    #[default]
    Levenshtein,
    JaroWinkler,
}

impl MatchStrategy {
    pub fn build(self) -> Arc<dyn SimilarityStrategy> {
        match self {
            Self::Exact => Arc::new(Exact),
            Self::Substring => Arc::new(Substring),
            Self::Levenshtein => Arc::new(Levenshtein),
            Self::JaroWinkler => Arc::new(JaroWinkler),
        }
    }
}

impl FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_is_relative_to_longer_term() {
        assert_eq!(Levenshtein.distance("sepsis", "sepsis"), 0.0);
        assert!((Levenshtein.distance("sepsis", "sepsiss") - 1.0 / 7.0).abs() < 1e-12);
        assert_eq!(Levenshtein.distance("sepsis", "sepsisxx"), 0.25);
        assert_eq!(Levenshtein.distance("", ""), 0.0);
    }

    #[test]
    fn substring_matches_either_direction() {
        assert_eq!(Substring.distance("pain", "chest pain"), 0.0);
        assert_eq!(Substring.distance("chest pain", "pain"), 0.0);
        assert_eq!(Substring.distance("fever", "rash"), 1.0);
        assert_eq!(Substring.distance("", "rash"), 1.0);
    }

    #[test]
    fn strategy_names_parse() {
        assert_eq!("jaro-winkler".parse::<MatchStrategy>(), Ok(MatchStrategy::JaroWinkler));
        assert_eq!("EXACT".parse::<MatchStrategy>(), Ok(MatchStrategy::Exact));
        assert!("soundex".parse::<MatchStrategy>().is_err());
    }
}
