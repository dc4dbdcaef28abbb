//! Entity extraction and normalisation layer.

pub mod ner;
pub mod normalize;
pub mod remote;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use tracing::info;

use crate::config::Settings;

pub use ner::{DictionaryExtractor, EntityExtractor};
pub use normalize::normalize_entities;
pub use remote::RemoteExtractor;

/// Pick the extractor implementation named by configuration.
pub fn load_extractor(settings: &Settings) -> Result<Arc<dyn EntityExtractor>> {
    match &settings.extractor_url {
        Some(url) => {
            info!(%url, "using remote entity extractor");
            let timeout = Duration::from_secs(settings.http_timeout_secs);
            Ok(Arc::new(RemoteExtractor::new(url.clone(), timeout)?) as Arc<dyn EntityExtractor>)
        }
        None => {
            info!("using dictionary entity extractor");
            Ok(Arc::new(DictionaryExtractor) as Arc<dyn EntityExtractor>)
        }
    }
}
