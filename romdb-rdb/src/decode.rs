//! Whole-buffer RDB decoding.
//!
//! Drives the [`TagReader`] → [`RecordAccumulator`] → [`CatalogBuilder`]
//! pipeline over an in-memory buffer. Decoding never fails: a short header
//! gives an empty catalog, and a field cut off by the end of the buffer stops
//! the decode with every record finished so far kept.

use crate::catalog::{Catalog, CatalogBuilder};
use crate::record::{RecordAccumulator, Step};
use crate::tag::TagReader;

/// Size of the RDB file header. It is skipped without validation.
pub const HEADER_LEN: usize = 16;

/// Diagnostics collected while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Fields cut short by the end of the buffer. Decoding stops at the first,
    /// so this is 0 or 1.
    pub truncated_fields: usize,
    /// Tags outside the supported subset that were skipped.
    pub unrecognized_tags: usize,
    /// Whether the stream ended on a nil terminator.
    pub terminated: bool,
    /// Offset where decoding stopped.
    pub bytes_consumed: usize,
}

impl DecodeStats {
    /// True when the whole buffer decoded without truncation.
    pub fn is_clean(&self) -> bool {
        self.truncated_fields == 0
    }
}

/// The catalog produced by a decode together with its diagnostics.
#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    pub catalog: Catalog,
    pub stats: DecodeStats,
}

/// Decode an entire RDB buffer.
pub fn decode(bytes: &[u8]) -> DecodeReport {
    if bytes.len() <= HEADER_LEN {
        log::debug!(
            "RDB buffer too short ({} bytes), returning empty catalog",
            bytes.len()
        );
        return DecodeReport::default();
    }

    let mut reader = TagReader::at(bytes, HEADER_LEN);
    let mut accumulator = RecordAccumulator::new();
    let mut builder = CatalogBuilder::new();
    let mut stats = DecodeStats::default();

    loop {
        match reader.read_field() {
            Ok(Some(field)) => match accumulator.accept(field) {
                Step::Continue => {}
                Step::Emit(record) => builder.push(record),
                Step::Stop => {
                    stats.terminated = true;
                    break;
                }
            },
            Ok(None) => break,
            Err(truncated) => {
                log::debug!("RDB decode stopped early: {truncated}");
                stats.truncated_fields += 1;
                break;
            }
        }
    }

    // The last record has no boundary after it.
    if let Some(record) = accumulator.finish() {
        builder.push(record);
    }

    stats.unrecognized_tags = reader.unrecognized();
    stats.bytes_consumed = reader.position();

    let catalog = builder.build();
    log::debug!(
        "decoded {} RDB records ({} indexed by CRC32)",
        catalog.len(),
        catalog.crc_count()
    );

    DecodeReport { catalog, stats }
}

/// Decode an RDB buffer, discarding the diagnostics.
pub fn decode_catalog(bytes: &[u8]) -> Catalog {
    decode(bytes).catalog
}

#[cfg(test)]
#[path = "tests/decode_tests.rs"]
mod tests;
