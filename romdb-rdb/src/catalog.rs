//! Checksum-indexed game catalog.
//!
//! A [`Catalog`] keeps every decoded record in stream order and a CRC32 index
//! for fast lookups during ROM import. Catalogs are immutable once built; to
//! refresh one, decode a new catalog and swap it in whole (see
//! [`SharedCatalog`](crate::SharedCatalog)).

use std::collections::HashMap;

use crate::record::GameRecord;

/// Lookup interface consumed by ROM import and library display.
pub trait GameLookup {
    /// Find the record for a CRC32. Zero is never a valid checksum.
    fn find_by_crc(&self, crc32: u32) -> Option<GameRecord>;

    /// Total number of records, including those without a checksum.
    fn record_count(&self) -> usize;
}

/// Decoded records plus a CRC32 index over them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<GameRecord>,
    /// CRC32 → index into `records`. Never contains 0.
    by_crc32: HashMap<u32, usize>,
}

impl Catalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from records in stream order.
    pub fn from_records(records: impl IntoIterator<Item = GameRecord>) -> Self {
        let mut builder = CatalogBuilder::new();
        for record in records {
            builder.push(record);
        }
        builder.build()
    }

    /// Look up a record by CRC32.
    ///
    /// When several records share a checksum, the last one decoded wins.
    pub fn lookup_crc(&self, crc32: u32) -> Option<&GameRecord> {
        self.by_crc32.get(&crc32).map(|&i| &self.records[i])
    }

    /// All records in stream order.
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameRecord> {
        self.records.iter()
    }

    /// Returns the total number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of distinct checksums in the index.
    pub fn crc_count(&self) -> usize {
        self.by_crc32.len()
    }
}

impl GameLookup for Catalog {
    fn find_by_crc(&self, crc32: u32) -> Option<GameRecord> {
        self.lookup_crc(crc32).cloned()
    }

    fn record_count(&self) -> usize {
        self.len()
    }
}

/// Collects finished records into a [`Catalog`].
///
/// The ordered list and the index are filled together and only leave the
/// builder as one finished value.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    records: Vec<GameRecord>,
    by_crc32: HashMap<u32, usize>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. A non-zero CRC32 replaces any earlier index entry.
    pub fn push(&mut self, record: GameRecord) {
        let index = self.records.len();
        if record.crc32 != 0 {
            if let Some(previous) = self.by_crc32.insert(record.crc32, index) {
                log::debug!(
                    "duplicate CRC32 {:08x}: {:?} replaces {:?}",
                    record.crc32,
                    record.name,
                    self.records[previous].name
                );
            }
        }
        self.records.push(record);
    }

    /// Records pushed so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn build(self) -> Catalog {
        Catalog {
            records: self.records,
            by_crc32: self.by_crc32,
        }
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
