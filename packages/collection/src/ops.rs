//! Pure collection operations. Inputs are never mutated.

use crate::model::{Feature, FeatureCollection, FeatureId};

/// New collection with `feature` appended at the end
pub fn with_appended(collection: &FeatureCollection, feature: Feature) -> FeatureCollection {
    let mut next = collection.clone();
    next.features.push(feature);
    next
}

/// New collection without the feature identified by `id`; an equal copy if
/// no such feature exists
pub fn with_removed(collection: &FeatureCollection, id: &FeatureId) -> FeatureCollection {
    FeatureCollection {
        features: collection
            .features
            .iter()
            .filter(|f| &f.id != id)
            .cloned()
            .collect(),
        foreign_members: collection.foreign_members.clone(),
    }
}
