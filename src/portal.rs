//! Shared portal state.
//!
//! `PortalState` is the single shared state behind every HTTP handler.
//! Wrapped in `Arc` at startup. Uses `RwLock` around the catalog cache
//! so concurrent searches (reads) never block each other; the lock is
//! only taken for writing when a catalog is first built.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::cache::CatalogCache;
use crate::config;
use crate::pipeline::{self, VocabularyCatalog};
use crate::vocabulary::Vocabulary;

// ═══════════════════════════════════════════════════════════
// PortalState — shared by all HTTP handlers
// ═══════════════════════════════════════════════════════════

pub struct PortalState {
    /// Directory containing the vocabulary source files.
    data_dir: PathBuf,
    /// Catalogs built so far, one per vocabulary.
    catalogs: RwLock<CatalogCache>,
}

impl PortalState {
    /// Create portal state over the configured data directory.
    pub fn new() -> Self {
        Self::with_data_dir(config::data_dir())
    }

    /// Create portal state over an explicit data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalogs: RwLock::new(CatalogCache::new()),
        }
    }

    /// Directory the portal loads vocabulary files from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // ── Catalog access (read-through) ───────────────────────

    /// Get the catalog for a vocabulary, building it on first access.
    ///
    /// The build runs without holding the lock, so a slow load never
    /// blocks searches against already-cached vocabularies. If two
    /// requests race on a cold vocabulary, both build and the cache
    /// keeps whichever lands first.
    pub fn catalog(&self, vocabulary: Vocabulary) -> Result<Arc<VocabularyCatalog>, PortalError> {
        {
            let cache = self.catalogs.read().map_err(|_| PortalError::LockPoisoned)?;
            if let Some(catalog) = cache.get(vocabulary) {
                tracing::debug!(vocabulary = %vocabulary, "catalog cache hit");
                return Ok(catalog);
            }
        }

        let built = pipeline::build_catalog(&self.data_dir, vocabulary);

        let mut cache = self.catalogs.write().map_err(|_| PortalError::LockPoisoned)?;
        Ok(cache.insert_if_absent(built))
    }

    /// Whether a vocabulary's catalog is already built.
    pub fn is_cached(&self, vocabulary: Vocabulary) -> bool {
        self.catalogs
            .read()
            .map(|cache| cache.contains(vocabulary))
            .unwrap_or(false)
    }

    /// Vocabularies with a built catalog (for the health endpoint).
    pub fn cached_vocabularies(&self) -> Result<Vec<Vocabulary>, PortalError> {
        let cache = self.catalogs.read().map_err(|_| PortalError::LockPoisoned)?;
        Ok(cache.cached_vocabularies())
    }
}

impl Default for PortalState {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Error types
// ═══════════════════════════════════════════════════════════

/// Errors from PortalState operations.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("Internal lock error")]
    LockPoisoned,
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
