//! # Commitment Function `H` — Domain-Separated SHA-256
//!
//! The single hash primitive behind every value in the protocol. Each use
//! class gets its own domain tag byte, so a Merkle leaf can never collide
//! with an interior node, a nullifier, or a commitment:
//!
//! - Leaf: `SHA256(0x00 || value)` (one field) or
//!   `SHA256(0x00 || key || value)` (sparse-tree entry).
//! - Node: `SHA256(0x01 || left || right)`.
//! - Commitment: `SHA256(0x02 || attributes... || secret)`.
//! - Derivation domains `0x03..=0x07` are consumed by `nullifier.rs`.
//!
//! ## Security Invariant
//!
//! `H` is treated as an opaque collision-resistant commitment function by
//! every consumer. Only this crate constructs digests; the engine never
//! decomposes one.

use sha2::{Digest, Sha256};

use acv_core::{Commitment, Field, SecretKey};

pub(crate) const DOMAIN_LEAF: u8 = 0x00;
pub(crate) const DOMAIN_NODE: u8 = 0x01;
pub(crate) const DOMAIN_COMMITMENT: u8 = 0x02;
pub(crate) const DOMAIN_NULLIFIER_GLOBAL: u8 = 0x03;
pub(crate) const DOMAIN_SECRET_DIGEST: u8 = 0x04;
pub(crate) const DOMAIN_NULLIFIER_EVENT: u8 = 0x05;
pub(crate) const DOMAIN_NULLIFIER_EPOCH: u8 = 0x06;
pub(crate) const DOMAIN_BLINDING: u8 = 0x07;

/// Hash a domain tag and a sequence of field values.
pub(crate) fn hash_fields(domain: u8, fields: &[&Field]) -> Field {
    let mut hasher = Sha256::new();
    hasher.update([domain]);
    for field in fields {
        hasher.update(field.as_bytes());
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Field::from_bytes(out)
}

/// The Merkle leaf hash of a single value: `H(leaf-domain, value)`.
pub fn leaf_hash(value: &Field) -> Field {
    hash_fields(DOMAIN_LEAF, &[value])
}

/// The leaf hash of a sparse-tree entry: `H(leaf-domain, key, value)`.
pub fn entry_leaf_hash(key: &Field, value: &Field) -> Field {
    hash_fields(DOMAIN_LEAF, &[key, value])
}

/// The interior node hash: `H(node-domain, left, right)`.
pub fn node_hash(left: &Field, right: &Field) -> Field {
    hash_fields(DOMAIN_NODE, &[left, right])
}

/// The credential commitment `C = H(attributes, secret)`.
///
/// Holder-side: the engine itself never computes commitments from
/// attributes, it only stores and proves over the opaque result.
pub fn commit(attributes: &[Field], secret: &SecretKey) -> Commitment {
    let mut inputs: Vec<&Field> = attributes.iter().collect();
    inputs.push(secret.as_field());
    Commitment(hash_fields(DOMAIN_COMMITMENT, &inputs))
}
