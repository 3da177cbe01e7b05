//! Read-through catalog cache.
//!
//! One entry per vocabulary, populated on first use and kept until process
//! restart. Source files are treated as static for the process lifetime,
//! so there is no TTL and no invalidation.
//!
//! Key properties:
//! - Entries are `Arc`s — handing one out never copies the table
//! - Insert-if-absent population: a racing duplicate build is discarded,
//!   callers always see one consistent catalog per vocabulary
//! - No entry ever changes once inserted

use std::collections::HashMap;
use std::sync::Arc;

use crate::pipeline::VocabularyCatalog;
use crate::vocabulary::Vocabulary;

/// Explicit cache mapping vocabulary → built catalog.
pub struct CatalogCache {
    entries: HashMap<Vocabulary, Arc<VocabularyCatalog>>,
}

impl CatalogCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Get a vocabulary's catalog, if already built.
    pub fn get(&self, vocabulary: Vocabulary) -> Option<Arc<VocabularyCatalog>> {
        self.entries.get(&vocabulary).cloned()
    }

    /// Insert `catalog` unless the vocabulary is already cached, and return
    /// the entry the cache holds afterwards. Keeping the existing entry on
    /// conflict makes redundant concurrent builds harmless.
    pub fn insert_if_absent(&mut self, catalog: VocabularyCatalog) -> Arc<VocabularyCatalog> {
        let key = catalog.vocabulary;
        self.entries
            .entry(key)
            .or_insert_with(|| Arc::new(catalog))
            .clone()
    }

    /// Whether a vocabulary's catalog is cached.
    pub fn contains(&self, vocabulary: Vocabulary) -> bool {
        self.entries.contains_key(&vocabulary)
    }

    /// Vocabularies with a cached catalog.
    pub fn cached_vocabularies(&self) -> Vec<Vocabulary> {
        self.entries.keys().copied().collect()
    }

    /// Number of cached catalogs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}
