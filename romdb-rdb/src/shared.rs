//! A catalog slot that readers on other threads can query while it is refreshed.

use std::sync::{Arc, PoisonError, RwLock};

use crate::catalog::{Catalog, GameLookup};
use crate::decode::{self, DecodeStats};
use crate::record::GameRecord;

/// Holds the currently published [`Catalog`].
///
/// Publishing replaces the whole `Arc<Catalog>` in one write, so a reader
/// always sees the record list and CRC index from the same decode. Readers
/// that need several lookups against one version should take a
/// [`snapshot`](Self::snapshot).
#[derive(Debug, Default)]
pub struct SharedCatalog {
    current: RwLock<Arc<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog published right now.
    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Publish `catalog`, returning the one it replaced.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Decode `bytes` and publish the result.
    pub fn publish_decoded(&self, bytes: &[u8]) -> DecodeStats {
        let report = decode::decode(bytes);
        log::debug!(
            "publishing catalog with {} records",
            report.catalog.len()
        );
        self.replace(report.catalog);
        report.stats
    }
}

impl GameLookup for SharedCatalog {
    fn find_by_crc(&self, crc32: u32) -> Option<GameRecord> {
        self.snapshot().lookup_crc(crc32).cloned()
    }

    fn record_count(&self) -> usize {
        self.snapshot().len()
    }
}
