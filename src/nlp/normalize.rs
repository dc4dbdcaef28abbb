//! Entity normalisation: case folding and first-seen deduplication.

use indexmap::IndexMap;
use tracing::debug;

use crate::model::MedicalEntity;

/// Fold an entity or vocabulary term into its matching key.
pub fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Lower-case and deduplicate entities, keeping first-seen order.
///
/// Entities collapse on folded text alone; when two share text but differ in
/// category the first occurrence wins. Blank entities are dropped.
pub fn normalize_entities<I>(entities: I) -> Vec<MedicalEntity>
where
    I: IntoIterator<Item = MedicalEntity>,
{
    let mut seen: IndexMap<String, MedicalEntity> = IndexMap::new();
    let mut raw = 0usize;
    for entity in entities {
        raw += 1;
        let key = fold(&entity.text);
        if key.is_empty() {
            continue;
        }
        seen.entry(key.clone())
            .or_insert_with(|| MedicalEntity::new(key, entity.category));
    }
    debug!(raw, unique = seen.len(), "normalised entities");
    seen.into_values().collect()
}
