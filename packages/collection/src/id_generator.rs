//! Feature ids of the form `<seed>-<n>`, where the seed is the crc32 of the
//! source URI. Reloading the same file yields the same ids.

use crc32fast::hash;

use crate::model::FeatureId;

/// Hex crc32 of `source`, with bare paths read as `file://` URIs
pub fn source_seed(source: &str) -> String {
    let checksum = if source.contains("://") {
        hash(source.as_bytes())
    } else {
        hash(format!("file://{source}").as_bytes())
    };
    format!("{checksum:x}")
}

/// Hands out sequential ids for the features of one source
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    issued: u32,
}

impl IdGenerator {
    pub fn new(source: &str) -> Self {
        Self {
            seed: source_seed(source),
            issued: 0,
        }
    }

    pub fn new_id(&mut self) -> FeatureId {
        self.issued += 1;
        FeatureId::new(format!("{}-{}", self.seed, self.issued))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
