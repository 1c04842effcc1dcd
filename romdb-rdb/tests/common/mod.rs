//! Minimal RDB writer for building test buffers.

#![allow(dead_code)]

pub struct RdbWriter {
    bytes: Vec<u8>,
}

impl RdbWriter {
    pub fn new() -> Self {
        Self {
            bytes: b"RARCHDB\0\0\0\0\0\0\0\0\0".to_vec(),
        }
    }

    pub fn map(mut self, fields: usize) -> Self {
        if fields < 16 {
            self.bytes.push(0x80 | fields as u8);
        } else {
            self.bytes.push(0xDE);
            self.bytes.extend_from_slice(&(fields as u16).to_be_bytes());
        }
        self
    }

    pub fn str(mut self, s: &str) -> Self {
        let len = s.len();
        if len < 32 {
            self.bytes.push(0xA0 | len as u8);
        } else if len < 256 {
            self.bytes.extend_from_slice(&[0xD9, len as u8]);
        } else {
            self.bytes.push(0xDA);
            self.bytes.extend_from_slice(&(len as u16).to_be_bytes());
        }
        self.bytes.extend_from_slice(s.as_bytes());
        self
    }

    pub fn bin(mut self, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(&[0xC4, data.len() as u8]);
        self.bytes.extend_from_slice(data);
        self
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.bytes.extend_from_slice(&[0xCC, v]);
        self
    }

    pub fn u16(mut self, v: u16) -> Self {
        self.bytes.push(0xCD);
        self.bytes.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.bytes.push(0xCE);
        self.bytes.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn u64(mut self, v: u64) -> Self {
        self.bytes.push(0xCF);
        self.bytes.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn raw(mut self, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(data);
        self
    }

    pub fn text_field(self, key: &str, value: &str) -> Self {
        self.str(key).str(value)
    }

    /// `crc` the way libretro stores it: a 4-byte blob.
    pub fn crc(self, crc: u32) -> Self {
        self.str("crc").bin(&crc.to_be_bytes())
    }

    pub fn nil(self) -> Self {
        self.raw(&[0xC0])
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}
