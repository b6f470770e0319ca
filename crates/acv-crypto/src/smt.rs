//! # Sparse Non-Inclusion Verifier and Reference Tree
//!
//! The revocation structure: a sparse Merkle tree keyed by commitment,
//! where a key's *absence* is provable. A slot witness shows what the
//! key's path currently holds — either an empty slot or some occupant —
//! and the verifier accepts non-inclusion exactly when the Merkle
//! recomputation matches the claimed root AND (the slot is empty OR the
//! occupant key differs from the query key).
//!
//! Key path bits are the leading `depth` bits of the key, MSB first. Two
//! distinct keys sharing a full path prefix cannot coexist in the
//! reference tree; insertion reports the collision instead of silently
//! displacing the occupant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use acv_core::{CryptoError, Field};

use crate::hash::{entry_leaf_hash, leaf_hash, node_hash};
use crate::merkle::fold_path;

/// Tree depth of the reference deployment's revocation tree.
pub const REVOCATION_TREE_DEPTH: usize = 20;

/// Maximum depth the reference builder accepts. Bounded by the 63 path
/// bits that fit the builder's index arithmetic.
const MAX_DEPTH: usize = 32;

/// A witness of what a key's path holds in the sparse tree.
///
/// Produced by the off-band tree builder (or [`SparseTree::slot_witness`]
/// here). Verifies as non-inclusion iff the slot is empty or occupied by
/// a different key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonInclusionProof {
    /// Sibling node values along the key's path, leaf level first.
    pub siblings: Vec<Field>,
    /// Whether the key's slot is empty.
    pub empty_slot: bool,
    /// The key actually occupying the slot (zero when `empty_slot`).
    pub occupant_key: Field,
    /// The value stored for the occupant (zero when `empty_slot`).
    pub occupant_value: Field,
}

/// The leading `depth` bits of `key`, MSB first — the key's tree path.
pub fn key_path_bits(key: &Field, depth: usize) -> Vec<bool> {
    let bytes = key.as_bytes();
    (0..depth)
        .map(|i| (bytes[i / 8] >> (7 - (i % 8))) & 1 == 1)
        .collect()
}

/// Path bits folded into the builder's slot index, MSB first.
fn path_index(key: &Field, depth: usize) -> u64 {
    key_path_bits(key, depth)
        .into_iter()
        .fold(0u64, |acc, bit| (acc << 1) | u64::from(bit))
}

/// Verify that `key` is absent from the sparse tree summarized by `root`.
///
/// Recomputes the root from the witnessed slot contents along the key's
/// own path, then requires one of the two disjoint absence conditions:
/// the slot is empty, or the occupant is a different key. Returns `false`
/// on any mismatch; never errors.
pub fn verify_non_inclusion(key: &Field, proof: &NonInclusionProof, root: &Field) -> bool {
    let leaf = if proof.empty_slot {
        leaf_hash(&Field::ZERO)
    } else {
        entry_leaf_hash(&proof.occupant_key, &proof.occupant_value)
    };
    // The fold runs over the *query* key's path bits: the witness must
    // sit at the slot this key would occupy. `key_path_bits` is
    // root-downward; the fold consumes leaf level first.
    let mut path_bits = key_path_bits(key, proof.siblings.len());
    path_bits.reverse();
    let included = match fold_path(&leaf, &proof.siblings, &path_bits) {
        Some(computed) => computed == *root,
        None => false,
    };
    let absent = proof.empty_slot || proof.occupant_key != *key;
    included && absent
}

/// A fixed-depth sparse Merkle tree over keyed entries.
///
/// Reference implementation of the off-band revocation-tree builder.
/// Occupied slots hash as `H(leaf-domain, key, value)`; empty slots hash
/// as the zero-sentinel leaf. Entries are never removed — revocation is
/// permanent.
#[derive(Debug, Clone)]
pub struct SparseTree {
    depth: usize,
    /// Slot index -> (key, value).
    entries: BTreeMap<u64, (Field, Field)>,
    defaults: Vec<Field>,
}

impl SparseTree {
    /// Create an empty sparse tree of the given depth (1..=32).
    pub fn new(depth: usize) -> Result<Self, CryptoError> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(CryptoError::Tree(format!(
                "depth must be in 1..={MAX_DEPTH}, got {depth}"
            )));
        }
        let mut defaults = vec![Field::ZERO; depth + 1];
        defaults[depth] = leaf_hash(&Field::ZERO);
        for level in (0..depth).rev() {
            defaults[level] = node_hash(&defaults[level + 1], &defaults[level + 1]);
        }
        Ok(Self {
            depth,
            entries: BTreeMap::new(),
            defaults,
        })
    }

    /// Create an empty tree at the reference deployment depth.
    pub fn revocation() -> Self {
        match Self::new(REVOCATION_TREE_DEPTH) {
            Ok(tree) => tree,
            Err(_) => unreachable!("revocation depth is within bounds"),
        }
    }

    /// The tree depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The number of occupied slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry has been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` occupies its slot.
    pub fn contains(&self, key: &Field) -> bool {
        let index = path_index(key, self.depth);
        matches!(self.entries.get(&index), Some((occupant, _)) if occupant == key)
    }

    /// Insert `key -> value`. Re-inserting the same key overwrites its
    /// value; a different key whose path prefix collides is an error.
    pub fn insert(&mut self, key: Field, value: Field) -> Result<(), CryptoError> {
        let index = path_index(&key, self.depth);
        if let Some((occupant, _)) = self.entries.get(&index) {
            if *occupant != key {
                return Err(CryptoError::Tree(format!(
                    "path prefix collision at depth {}: slot occupied by {occupant}",
                    self.depth
                )));
            }
        }
        self.entries.insert(index, (key, value));
        Ok(())
    }

    /// The current root.
    pub fn root(&self) -> Field {
        self.node_value(0, 0)
    }

    /// Witness of whatever `key`'s slot currently holds.
    ///
    /// Verifies as non-inclusion iff the slot is empty or holds a
    /// different key; a witness for a present key correctly *fails*
    /// [`verify_non_inclusion`].
    pub fn slot_witness(&self, key: &Field) -> NonInclusionProof {
        let index = path_index(key, self.depth);
        let mut siblings = Vec::with_capacity(self.depth);
        let mut node_index = index;
        for level in (1..=self.depth).rev() {
            siblings.push(self.node_value(level, node_index ^ 1));
            node_index >>= 1;
        }
        match self.entries.get(&index) {
            Some((occupant_key, occupant_value)) => NonInclusionProof {
                siblings,
                empty_slot: false,
                occupant_key: *occupant_key,
                occupant_value: *occupant_value,
            },
            None => NonInclusionProof {
                siblings,
                empty_slot: true,
                occupant_key: Field::ZERO,
                occupant_value: Field::ZERO,
            },
        }
    }

    /// The node value at `(level, index)`, `level` 0 being the root.
    fn node_value(&self, level: usize, index: u64) -> Field {
        if level == self.depth {
            return match self.entries.get(&index) {
                Some((key, value)) => entry_leaf_hash(key, value),
                None => self.defaults[self.depth],
            };
        }
        let span = self.depth - level;
        let first = index << span;
        let last = first + ((1u64 << span) - 1);
        if self.entries.range(first..=last).next().is_none() {
            return self.defaults[level];
        }
        node_hash(
            &self.node_value(level + 1, index * 2),
            &self.node_value(level + 1, index * 2 + 1),
        )
    }
}
