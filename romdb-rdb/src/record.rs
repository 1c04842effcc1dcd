//! Game records and the accumulator that assembles them from the field stream.

use std::mem;

use crate::tag::{RawField, be_unsigned};

/// Metadata for a single game, as stored in one RDB record.
///
/// Missing text fields are empty and missing numbers are zero. A CRC32 of zero
/// means "unknown", never a real checksum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    /// Full No-Intro style name, e.g. `"Super Mario World (USA)"`
    pub name: String,
    pub description: String,
    pub genre: String,
    pub developer: String,
    pub publisher: String,
    pub franchise: String,
    pub esrb_rating: String,
    /// ROM filename as listed in the source DAT
    pub rom_name: String,
    /// Product serial, e.g. `"SNS-MW-USA"`
    pub serial: String,
    pub release_month: u32,
    pub release_year: u32,
    /// ROM size in bytes
    pub size: u64,
    pub crc32: u32,
}

impl GameRecord {
    /// A record is worth keeping once it has a name or a checksum.
    pub fn has_data(&self) -> bool {
        !self.name.is_empty() || self.crc32 != 0
    }

    /// CRC32 as lowercase hex, zero-padded to eight digits.
    pub fn crc_hex(&self) -> String {
        format!("{:08x}", self.crc32)
    }
}

type FieldSetter = fn(&mut GameRecord, &[u8]);

/// Known record keys and how each one lands in a [`GameRecord`].
///
/// Keys missing from this table are ignored so newer databases with extra
/// columns still decode.
const FIELD_SETTERS: &[(&str, FieldSetter)] = &[
    ("name", |r: &mut GameRecord, v: &[u8]| r.name = text(v)),
    ("description", |r: &mut GameRecord, v: &[u8]| {
        r.description = text(v)
    }),
    ("genre", |r: &mut GameRecord, v: &[u8]| r.genre = text(v)),
    ("developer", |r: &mut GameRecord, v: &[u8]| {
        r.developer = text(v)
    }),
    ("publisher", |r: &mut GameRecord, v: &[u8]| {
        r.publisher = text(v)
    }),
    ("franchise", |r: &mut GameRecord, v: &[u8]| {
        r.franchise = text(v)
    }),
    ("esrb_rating", |r: &mut GameRecord, v: &[u8]| {
        r.esrb_rating = text(v)
    }),
    ("rom_name", |r: &mut GameRecord, v: &[u8]| r.rom_name = text(v)),
    ("serial", |r: &mut GameRecord, v: &[u8]| r.serial = text(v)),
    ("size", |r: &mut GameRecord, v: &[u8]| r.size = be_unsigned(v)),
    ("releasemonth", |r: &mut GameRecord, v: &[u8]| {
        r.release_month = be_unsigned(v) as u32
    }),
    ("releaseyear", |r: &mut GameRecord, v: &[u8]| {
        r.release_year = be_unsigned(v) as u32
    }),
    ("crc", |r: &mut GameRecord, v: &[u8]| {
        r.crc32 = be_unsigned(v) as u32
    }),
];

/// Decode UTF-8, falling back to an empty string on malformed input.
fn text(bytes: &[u8]) -> String {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// What the caller should do after feeding one field to the accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Keep reading.
    Continue,
    /// A record boundary finished this record.
    Emit(GameRecord),
    /// The stream terminator was reached.
    Stop,
}

/// Builds [`GameRecord`]s from a stream of [`RawField`]s.
///
/// Fields alternate key, value, key, value. Map boundaries start a new record
/// and reset the alternation; skip tokens are invisible to it.
#[derive(Debug, Clone)]
pub struct RecordAccumulator {
    current: GameRecord,
    expecting_key: bool,
    pending_key: String,
}

impl Default for RecordAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordAccumulator {
    pub fn new() -> Self {
        Self {
            current: GameRecord::default(),
            expecting_key: true,
            pending_key: String::new(),
        }
    }

    /// The record currently being filled.
    pub fn in_progress(&self) -> &GameRecord {
        &self.current
    }

    /// Whether the next payload field will be read as a key.
    pub fn expecting_key(&self) -> bool {
        self.expecting_key
    }

    /// Feed one field.
    pub fn accept(&mut self, field: RawField<'_>) -> Step {
        match field {
            RawField::MapBoundary(_) => {
                self.expecting_key = true;
                self.pending_key.clear();
                match self.take_current() {
                    Some(record) => Step::Emit(record),
                    None => Step::Continue,
                }
            }
            RawField::Skip => Step::Continue,
            RawField::Nil => Step::Stop,
            RawField::Text(bytes) | RawField::Bytes(bytes) | RawField::UnsignedInt(bytes) => {
                if self.expecting_key {
                    self.pending_key = text(bytes);
                } else {
                    self.assign(bytes);
                }
                self.expecting_key = !self.expecting_key;
                Step::Continue
            }
        }
    }

    /// Hand back the in-progress record if it has data, consuming the accumulator.
    pub fn finish(self) -> Option<GameRecord> {
        self.current.has_data().then_some(self.current)
    }

    /// Swap in a fresh record and return the old one if it is worth keeping.
    fn take_current(&mut self) -> Option<GameRecord> {
        let record = mem::take(&mut self.current);
        record.has_data().then_some(record)
    }

    fn assign(&mut self, value: &[u8]) {
        match FIELD_SETTERS
            .iter()
            .find(|(key, _)| *key == self.pending_key)
        {
            Some((_, set)) => set(&mut self.current, value),
            None => log::trace!("ignoring unknown RDB key {:?}", self.pending_key),
        }
    }
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
