//! # Field Values — Opaque 256-Bit Protocol Values
//!
//! Defines [`Field`], the 32-byte opaque value every root, commitment,
//! and nullifier in the protocol is made of, plus the newtype wrappers
//! that keep the namespaces apart.
//!
//! ## Security Invariant
//!
//! Type-level distinction between value namespaces prevents substitution
//! confusion: a `Nullifier` cannot be passed where a `Commitment` is
//! expected, and `SecretKey` deliberately redacts itself in `Debug`
//! output so holder secrets never land in logs.
//!
//! The engine never decomposes a `Field` — attribute encoding and the
//! commitment hash are opaque at this layer.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CryptoError;

/// An opaque 256-bit protocol value: a root, a leaf, a hash output.
///
/// Serializes as a 64-char lowercase hex string. Ordering is big-endian
/// lexicographic over the raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Field([u8; 32]);

impl Field {
    /// The all-zero value, used as the empty-slot sentinel in sparse trees.
    pub const ZERO: Field = Field([0u8; 32]);

    /// Wrap raw bytes as a field value.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Embed a `u64` big-endian in the trailing 8 bytes.
    ///
    /// This is the canonical embedding for small integers (scopes, epochs,
    /// disclosed thresholds) into field values.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Recover a `u64` embedded by [`Field::from_u64`].
    ///
    /// # Errors
    ///
    /// Returns an error if any of the leading 24 bytes is nonzero — the
    /// value does not fit a `u64` and was not produced by `from_u64`.
    pub fn to_u64(&self) -> Result<u64, CryptoError> {
        if self.0[..24].iter().any(|b| *b != 0) {
            return Err(CryptoError::Encoding(
                "field value exceeds u64 range".to_string(),
            ));
        }
        let mut tail = [0u8; 8];
        tail.copy_from_slice(&self.0[24..]);
        Ok(u64::from_be_bytes(tail))
    }

    /// Decode a 64-char hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim().to_lowercase();
        if hex.len() != 64 {
            return Err(CryptoError::Encoding(format!(
                "expected 64 hex chars, got {}",
                hex.len()
            )));
        }
        let mut out = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let s = std::str::from_utf8(chunk)
                .map_err(|e| CryptoError::Encoding(format!("invalid hex: {e}")))?;
            out[i] = u8::from_str_radix(s, 16)
                .map_err(|e| CryptoError::Encoding(format!("invalid hex at {i}: {e}")))?;
        }
        Ok(Self(out))
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Whether this is the all-zero sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Field::from_hex(&s).map_err(D::Error::custom)
    }
}

/// A credential commitment `C = H(attributes, secret)`.
///
/// The public identifier of a credential. Created by a holder off-band;
/// never decomposed by the engine. Immutable once registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Commitment(pub Field);

impl Commitment {
    /// Access the underlying field value.
    pub fn as_field(&self) -> &Field {
        &self.0
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "commitment:{}", self.0)
    }
}

/// A nullifier: derived from a holder's secret and a scope, consumed at
/// most once per scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Nullifier(pub Field);

impl Nullifier {
    /// Access the underlying field value.
    pub fn as_field(&self) -> &Field {
        &self.0
    }
}

impl std::fmt::Display for Nullifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nullifier:{}", self.0)
    }
}

/// A holder's secret key material.
///
/// `Debug` output is redacted; there is no `Display` impl. The engine
/// only ever sees secrets in holder-side tooling (derivation helpers,
/// tests, the CLI) — verification paths receive derived values only.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretKey(pub Field);

impl SecretKey {
    /// Access the underlying field value.
    pub fn as_field(&self) -> &Field {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}
