//! Decoder for libretro-style RDB game metadata databases.
//!
//! An RDB file is a 16-byte header followed by a stream of MessagePack-like
//! tagged fields. Each record is a map of key/value pairs describing one game
//! (name, developer, CRC32, ...). This crate turns that stream into a
//! [`Catalog`] indexed by CRC32.
//!
//! The decoder is best-effort: truncated or malformed input never produces an
//! error. Whatever was decoded before the damage is kept, and the
//! [`DecodeStats`] in the returned [`DecodeReport`] say what was skipped.

pub mod cache;
pub mod catalog;
pub mod decode;
pub mod error;
pub mod record;
pub mod shared;
pub mod tag;

pub use cache::{RdbCache, RdbCacheEntry};
pub use catalog::{Catalog, CatalogBuilder, GameLookup};
pub use decode::{DecodeReport, DecodeStats, HEADER_LEN, decode, decode_catalog};
pub use error::RdbError;
pub use record::{GameRecord, RecordAccumulator, Step};
pub use shared::SharedCatalog;
pub use tag::{RawField, TagReader, Truncated};
