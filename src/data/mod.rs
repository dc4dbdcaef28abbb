//! Adverse event corpus access.

pub mod corpus;
pub mod openfda;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Settings;

pub use corpus::{snapshot, ReactionCorpusSource, StaticCorpus};
pub use openfda::OpenFdaSource;

/// Build the corpus source named by configuration: a local JSON file when
/// `CORPUS_FILE` is set, openFDA otherwise.
pub fn load_corpus(settings: &Settings) -> Result<Arc<dyn ReactionCorpusSource>> {
    if let Some(path) = &settings.corpus_file {
        let corpus = StaticCorpus::from_path(path)
            .with_context(|| format!("load corpus file {}", path.display()))?;
        info!(path = %path.display(), reports = corpus.len(), "using static corpus");
        return Ok(Arc::new(corpus) as Arc<dyn ReactionCorpusSource>);
    }
    let source = OpenFdaSource::new(
        settings.openfda_base_url.clone(),
        Duration::from_secs(settings.http_timeout_secs),
    )?
    .with_api_key(settings.openfda_api_key.clone())
    .with_search(settings.openfda_search.clone());
    info!(
        base = %settings.openfda_base_url,
        search = settings.openfda_search.as_deref().unwrap_or("-"),
        "using openFDA corpus"
    );
    Ok(Arc::new(source) as Arc<dyn ReactionCorpusSource>)
}
