// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Streaming canonical encoder.
//!
//! [`Preimage`] keeps a running SHA-256 of the canonical transaction
//! serialization: each field is appended as a discrete operation and
//! folded into the digest immediately, so memory use is independent of
//! transaction size. Fixed-width fields are little-endian; variable
//! integers use 7 data bits per byte with a continuation bit.

use byteorder::{ByteOrder, LittleEndian};
use sha2::{Digest, Sha256};

/// Running digest over the canonical transaction pre-image
pub struct Preimage {
    hasher: Sha256,
}

impl Preimage {
    /// Create a new (empty) pre-image digest
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Discard any accumulated state
    pub fn reset(&mut self) {
        self.hasher = Sha256::new();
    }

    /// Append raw bytes
    pub fn put_bytes(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Append a single byte
    pub fn put_u8(&mut self, val: u8) {
        self.hasher.update([val]);
    }

    /// Append a fixed-width little-endian u16
    pub fn put_u16(&mut self, val: u16) {
        let mut b = [0u8; 2];
        LittleEndian::write_u16(&mut b, val);
        self.hasher.update(b);
    }

    /// Append a fixed-width little-endian u32
    pub fn put_u32(&mut self, val: u32) {
        let mut b = [0u8; 4];
        LittleEndian::write_u32(&mut b, val);
        self.hasher.update(b);
    }

    /// Append a fixed-width little-endian u64
    pub fn put_u64(&mut self, val: u64) {
        let mut b = [0u8; 8];
        LittleEndian::write_u64(&mut b, val);
        self.hasher.update(b);
    }

    /// Append a variable-length unsigned integer.
    ///
    /// Emits 7 low bits per byte, setting the continuation bit while any
    /// bits remain; always at least one byte. Each byte is fed straight
    /// into the digest, no buffering.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn put_varint(&mut self, mut val: u64) {
        loop {
            let mut b = (val as u8) & 0x7f;
            val >>= 7;
            b |= ((val > 0) as u8) << 7;
            self.hasher.update([b]);

            if val == 0 {
                break;
            }
        }
    }

    /// Finalize the digest, resetting the accumulator
    pub fn finalize(&mut self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(self.hasher.finalize_reset().as_ref());
        out
    }
}

impl Default for Preimage {
    fn default() -> Self {
        Self::new()
    }
}
