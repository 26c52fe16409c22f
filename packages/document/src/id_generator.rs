use crc32fast::Hasher;
use uuid::Uuid;

use crate::Document;

/// Short, stable seed for a storage key (CRC32 of the key).
pub fn get_document_seed(key: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(key.as_bytes());
    format!("{:08x}", hasher.finalize())
}

/// Sequential id generator for content nodes.
///
/// Ids have the shape `{type}-{seed}-{n}`. A generator created with [`IdGenerator::new`]
/// mixes a random nonce into its seed so two sessions over the same key never hand out
/// the same id.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(key: &str) -> Self {
        let nonce = Uuid::new_v4();
        Self {
            seed: get_document_seed(&format!("{}#{}", key, nonce)),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate the next sequential id for a node of `component_type`
    pub fn next_id(&mut self, component_type: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", component_type, self.seed, self.count)
    }

    /// Next id that is not already used by a node in `document`
    pub fn fresh_id(&mut self, component_type: &str, document: &Document) -> String {
        loop {
            let id = self.next_id(component_type);
            if document.find_node(&id).is_none() {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
