//! Tag Reader for the RDB field stream.
//!
//! RDB files use a subset of MessagePack. Every field starts with a single tag
//! byte that selects its kind; strings, blobs and large maps follow the tag
//! with a big-endian length prefix, and unsigned integers carry a fixed-width
//! payload.
//!
//! | Tag           | Field                                    |
//! |---------------|------------------------------------------|
//! | `0x00..=0x7F` | positive fixint (skipped)                |
//! | `0x80..=0x8F` | fixmap, starts a record                  |
//! | `0x90..=0x9F` | fixarray header (skipped)                |
//! | `0xA0..=0xBF` | fixstr, length in the low five bits      |
//! | `0xC0`        | nil, ends the stream                     |
//! | `0xC4..=0xC6` | bin 8/16/32                              |
//! | `0xCC..=0xCF` | uint 8/16/32/64                          |
//! | `0xD9..=0xDB` | str 8/16/32                              |
//! | `0xDE`/`0xDF` | map 16/32, starts a record               |
//! | `0xE0..=0xFF` | negative fixint (skipped)                |

/// One decoded field. Payload slices borrow the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawField<'a> {
    /// Start of a new record. The declared field count is informational only
    /// and never used to bound the fields that follow.
    MapBoundary(u32),
    /// UTF-8 text payload (not yet validated).
    Text(&'a [u8]),
    /// Binary blob payload.
    Bytes(&'a [u8]),
    /// Big-endian unsigned integer payload, 1, 2, 4 or 8 bytes wide.
    UnsignedInt(&'a [u8]),
    /// Stream terminator.
    Nil,
    /// Inert token: small integers, array headers and unsupported tags.
    Skip,
}

/// The buffer ran out before a field's declared length could be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "field at offset {offset} (tag {tag:#04x}) needs {needed} more bytes, {available} available"
)]
pub struct Truncated {
    /// Offset of the tag byte that started the field.
    pub offset: usize,
    /// The tag byte itself.
    pub tag: u8,
    /// Bytes the field still needed when the buffer ran out.
    pub needed: usize,
    /// Bytes that were actually left.
    pub available: usize,
}

/// Reads one tagged field at a time from a byte buffer.
///
/// The reader owns nothing but a cursor. A failed read leaves the cursor on the
/// tag byte of the field that could not be completed.
#[derive(Debug, Clone)]
pub struct TagReader<'a> {
    buf: &'a [u8],
    pos: usize,
    unrecognized: usize,
}

impl<'a> TagReader<'a> {
    /// Create a reader positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::at(buf, 0)
    }

    /// Create a reader positioned at `pos`.
    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self {
            buf,
            pos,
            unrecognized: 0,
        }
    }

    /// Current cursor offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Number of tags outside the supported subset that were skipped so far.
    pub fn unrecognized(&self) -> usize {
        self.unrecognized
    }

    /// Decode the field under the cursor and advance past it.
    ///
    /// Returns `Ok(None)` once the cursor reaches the end of the buffer and
    /// [`Truncated`] when a declared length runs past it.
    pub fn read_field(&mut self) -> Result<Option<RawField<'a>>, Truncated> {
        let offset = self.pos;
        let Some(&tag) = self.buf.get(offset) else {
            return Ok(None);
        };
        let mut cursor = offset + 1;

        let field = match tag {
            0x00..=0x7F | 0x90..=0x9F | 0xE0..=0xFF => RawField::Skip,
            0x80..=0x8F => RawField::MapBoundary(u32::from(tag & 0x0F)),
            0xA0..=0xBF => {
                let len = usize::from(tag - 0xA0);
                RawField::Text(self.take_bytes(&mut cursor, offset, tag, len)?)
            }
            0xC0 => RawField::Nil,
            0xC4..=0xC6 => {
                let len = self.read_length(&mut cursor, offset, tag, 1 << (tag - 0xC4))?;
                RawField::Bytes(self.take_bytes(&mut cursor, offset, tag, len)?)
            }
            0xCC..=0xCF => {
                let width = 1 << (tag - 0xCC);
                RawField::UnsignedInt(self.take_bytes(&mut cursor, offset, tag, width)?)
            }
            0xD9..=0xDB => {
                let len = self.read_length(&mut cursor, offset, tag, 1 << (tag - 0xD9))?;
                RawField::Text(self.take_bytes(&mut cursor, offset, tag, len)?)
            }
            0xDE | 0xDF => {
                let width = if tag == 0xDE { 2 } else { 4 };
                let count = self.take_bytes(&mut cursor, offset, tag, width)?;
                RawField::MapBoundary(be_unsigned(count) as u32)
            }
            _ => {
                log::trace!("skipping unsupported RDB tag {tag:#04x} at offset {offset}");
                self.unrecognized += 1;
                RawField::Skip
            }
        };

        self.pos = cursor;
        Ok(Some(field))
    }

    /// Read a `width`-byte big-endian length prefix.
    fn read_length(
        &self,
        cursor: &mut usize,
        offset: usize,
        tag: u8,
        width: usize,
    ) -> Result<usize, Truncated> {
        let prefix = self.take_bytes(cursor, offset, tag, width)?;
        Ok(usize::try_from(be_unsigned(prefix)).unwrap_or(usize::MAX))
    }

    /// Borrow `len` bytes at `cursor` and advance it.
    fn take_bytes(
        &self,
        cursor: &mut usize,
        offset: usize,
        tag: u8,
        len: usize,
    ) -> Result<&'a [u8], Truncated> {
        let available = self.buf.len().saturating_sub(*cursor);
        if len > available {
            return Err(Truncated {
                offset,
                tag,
                needed: len,
                available,
            });
        }
        let bytes = &self.buf[*cursor..*cursor + len];
        *cursor += len;
        Ok(bytes)
    }
}

impl<'a> Iterator for TagReader<'a> {
    type Item = Result<RawField<'a>, Truncated>;

    /// Yields fields until the end of the buffer or the first truncation.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_field() {
            Ok(Some(field)) => Some(Ok(field)),
            Ok(None) => None,
            Err(truncated) => {
                // Park the cursor at the end so iteration stops after the error.
                self.pos = self.buf.len();
                Some(Err(truncated))
            }
        }
    }
}

/// Decode a big-endian unsigned integer over exactly `bytes`.
///
/// Spans wider than eight bytes keep the low 64 bits.
pub fn be_unsigned(bytes: &[u8]) -> u64 {
    let mut value = 0u64;
    for &b in bytes {
        value = (value << 8) | u64::from(b);
    }
    value
}

#[cfg(test)]
#[path = "tests/tag_tests.rs"]
mod tests;
