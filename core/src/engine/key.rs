// Copyright (c) 2022-2023 The MobileCoin Foundation

use zeroize::Zeroize;

/// Derived secp256k1 signing key, held by the [Engine][super::Engine]
/// for the lifetime of one session.
///
/// The backing bytes are overwritten on drop and on every session
/// teardown path, whether signing completed, failed, or was aborted.
pub struct SigningKey([u8; 32]);

impl SigningKey {
    /// Wrap an already-derived private scalar
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for SigningKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for SigningKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Clone for SigningKey {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}

impl Default for SigningKey {
    fn default() -> Self {
        Self([0u8; 32])
    }
}

impl Zeroize for SigningKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Key material is never logged or displayed
impl core::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SigningKey(..)")
    }
}
