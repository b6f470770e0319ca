//! # Merkle Inclusion Verifier and Reference Tree
//!
//! The leaf-level primitive of the protocol: given a leaf node, a sibling
//! path, per-level direction bits, and a claimed root, recompute the root
//! and report match/mismatch. Pure function, no state, no side effects;
//! malformed proofs verify as `false`, they never error.
//!
//! The registry root summarizes all registered commitments in a
//! fixed-depth binary tree. The tree itself is computed off-band; the
//! [`MerkleTree`] builder here is the reference counterpart used by tests
//! and tooling to produce roots and witnesses.

use serde::{Deserialize, Serialize};

use acv_core::{CryptoError, Field};

use crate::hash::{leaf_hash, node_hash};

/// Tree depth of the reference deployment's registry tree. Supports up
/// to 2^20 registered commitments.
pub const REGISTRY_TREE_DEPTH: usize = 20;

/// Maximum depth the reference builders accept.
const MAX_DEPTH: usize = 32;

/// A sibling path from a leaf to a claimed root.
///
/// `siblings[0]` is the leaf-level sibling; `path_bits[i]` is `true` when
/// the running node at level `i` is the **right** child, i.e. the sibling
/// hashes on the left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    /// Sibling node values, leaf level first.
    pub siblings: Vec<Field>,
    /// Per-level direction bits, leaf level first.
    pub path_bits: Vec<bool>,
}

/// Fold a leaf node up a sibling path. Returns `None` when the sibling
/// and direction lists disagree in length or are empty.
pub(crate) fn fold_path(leaf: &Field, siblings: &[Field], path_bits: &[bool]) -> Option<Field> {
    if siblings.len() != path_bits.len() || siblings.is_empty() {
        return None;
    }
    let mut current = *leaf;
    for (sibling, is_right) in siblings.iter().zip(path_bits.iter()) {
        current = if *is_right {
            node_hash(sibling, &current)
        } else {
            node_hash(&current, sibling)
        };
    }
    Some(current)
}

/// Verify that `leaf` is included under `root` via `proof`.
///
/// `leaf` is the leaf *node* value — for a registered commitment that is
/// [`leaf_hash`](crate::hash::leaf_hash) of the commitment field. Returns
/// `false` on any mismatch, including malformed proof shapes.
pub fn verify_inclusion(leaf: &Field, proof: &InclusionProof, root: &Field) -> bool {
    match fold_path(leaf, &proof.siblings, &proof.path_bits) {
        Some(computed) => computed == *root,
        None => false,
    }
}

/// A fixed-depth, zero-filled binary Merkle tree over appended leaves.
///
/// Reference implementation of the off-band tree builder: the engine
/// consumes only the roots and witnesses this produces. Unoccupied leaf
/// slots hold the zero sentinel; default subtree hashes are cached per
/// level so the tree never materializes 2^depth nodes.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    depth: usize,
    leaves: Vec<Field>,
    /// `defaults[level]` is the hash of an all-empty subtree whose root
    /// sits at `level`; `defaults[depth]` is the empty leaf node.
    defaults: Vec<Field>,
}

impl MerkleTree {
    /// Create an empty tree of the given depth (1..=32).
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
            leaves: Vec::new(),
            defaults,
        })
    }

    /// Create an empty tree at the reference deployment depth.
    pub fn registry() -> Self {
        // Depth constant is in range; the constructor cannot fail.
        match Self::new(REGISTRY_TREE_DEPTH) {
            Ok(tree) => tree,
            Err(_) => unreachable!("registry depth is within bounds"),
        }
    }

    /// The tree depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The number of occupied leaf slots.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether no leaf has been appended.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Append a leaf value into the next free slot, returning its index.
    pub fn append(&mut self, value: Field) -> Result<usize, CryptoError> {
        let capacity = 1u64 << self.depth;
        if self.leaves.len() as u64 >= capacity {
            return Err(CryptoError::Tree(format!(
                "tree of depth {} is full ({capacity} leaves)",
                self.depth
            )));
        }
        self.leaves.push(value);
        Ok(self.leaves.len() - 1)
    }

    /// The current root.
    pub fn root(&self) -> Field {
        self.node_value(0, 0)
    }

    /// Build an inclusion witness for the leaf at `index`.
    pub fn prove(&self, index: usize) -> Result<InclusionProof, CryptoError> {
        if index >= self.leaves.len() {
            return Err(CryptoError::Tree(format!(
                "leaf index {index} out of range ({} occupied)",
                self.leaves.len()
            )));
        }
        let mut siblings = Vec::with_capacity(self.depth);
        let mut path_bits = Vec::with_capacity(self.depth);
        let mut node_index = index as u64;
        for level in (1..=self.depth).rev() {
            siblings.push(self.node_value(level, node_index ^ 1));
            path_bits.push(node_index & 1 == 1);
            node_index >>= 1;
        }
        Ok(InclusionProof {
            siblings,
            path_bits,
        })
    }

    /// The node value at `(level, index)`, `level` 0 being the root.
    fn node_value(&self, level: usize, index: u64) -> Field {
        let subtree_leaves = 1u64 << (self.depth - level);
        let first_leaf = index * subtree_leaves;
        if first_leaf >= self.leaves.len() as u64 {
            return self.defaults[level];
        }
        if level == self.depth {
            leaf_hash(&self.leaves[index as usize])
        } else {
            node_hash(
                &self.node_value(level + 1, index * 2),
                &self.node_value(level + 1, index * 2 + 1),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn f(v: u64) -> Field {
        Field::from_u64(v)
    }

    fn depth4_tree() -> MerkleTree {
        let mut tree = MerkleTree::new(4).unwrap();
        for i in 0..16u64 {
            tree.append(f(100 + i)).unwrap();
        }
        tree
    }

    #[test]
    fn test_depth_bounds() {
        assert!(MerkleTree::new(0).is_err());
        assert!(MerkleTree::new(33).is_err());
        assert!(MerkleTree::new(1).is_ok());
        assert!(MerkleTree::new(32).is_ok());
    }

    #[test]
    fn test_capacity_enforced() {
        let mut tree = MerkleTree::new(2).unwrap();
        for i in 0..4u64 {
            tree.append(f(i)).unwrap();
        }
        assert!(tree.append(f(4)).is_err());
    }

    #[test]
    fn test_all_sixteen_leaves_verify_at_depth_4() {
        let tree = depth4_tree();
        let root = tree.root();
        for i in 0..16u64 {
            let proof = tree.prove(i as usize).unwrap();
            assert_eq!(proof.siblings.len(), 4);
            assert!(
                verify_inclusion(&leaf_hash(&f(100 + i)), &proof, &root),
                "leaf {i} failed"
            );
        }
    }

    #[test]
    fn test_bit_flipped_root_rejected() {
        let tree = depth4_tree();
        let root = tree.root();
        let proof = tree.prove(5).unwrap();
        let leaf = leaf_hash(&f(105));
        assert!(verify_inclusion(&leaf, &proof, &root));

        // Flip every single bit of the root in turn; all must reject.
        for byte in 0..32 {
            for bit in 0..8 {
                let mut tampered = *root.as_bytes();
                tampered[byte] ^= 1 << bit;
                let bad_root = Field::from_bytes(tampered);
                assert!(!verify_inclusion(&leaf, &proof, &bad_root));
            }
        }
    }

    #[test]
    fn test_swapped_sibling_rejected() {
        let tree = depth4_tree();
        let root = tree.root();
        let mut proof = tree.prove(3).unwrap();
        proof.siblings.swap(0, 1);
        assert!(!verify_inclusion(&leaf_hash(&f(103)), &proof, &root));
    }

    #[test]
    fn test_wrong_leaf_rejected() {
        let tree = depth4_tree();
        let proof = tree.prove(0).unwrap();
        assert!(!verify_inclusion(&leaf_hash(&f(999)), &proof, &tree.root()));
    }

    #[test]
    fn test_wrong_direction_bits_rejected() {
        let tree = depth4_tree();
        let root = tree.root();
        let mut proof = tree.prove(6).unwrap();
        proof.path_bits[0] = !proof.path_bits[0];
        assert!(!verify_inclusion(&leaf_hash(&f(106)), &proof, &root));
    }

    #[test]
    fn test_malformed_shapes_verify_false() {
        let tree = depth4_tree();
        let root = tree.root();
        let leaf = leaf_hash(&f(100));

        let empty = InclusionProof {
            siblings: vec![],
            path_bits: vec![],
        };
        assert!(!verify_inclusion(&leaf, &empty, &root));

        let mut short = tree.prove(0).unwrap();
        short.siblings.pop();
        assert!(!verify_inclusion(&leaf, &short, &root));

        let mut mismatched = tree.prove(0).unwrap();
        mismatched.path_bits.pop();
        assert!(!verify_inclusion(&leaf, &mismatched, &root));
    }

    #[test]
    fn test_partial_occupancy_against_defaults() {
        // A tree with 3 of 16 slots occupied still proves all occupied
        // leaves; empty-slot subtrees resolve to cached defaults.
        let mut tree = MerkleTree::new(4).unwrap();
        for i in 0..3u64 {
            tree.append(f(i)).unwrap();
        }
        let root = tree.root();
        for i in 0..3u64 {
            let proof = tree.prove(i as usize).unwrap();
            assert!(verify_inclusion(&leaf_hash(&f(i)), &proof, &root));
        }
        assert!(tree.prove(3).is_err());
    }

    #[test]
    fn test_empty_tree_root_is_default() {
        let empty = MerkleTree::new(4).unwrap();
        let mut one = MerkleTree::new(4).unwrap();
        one.append(f(1)).unwrap();
        assert_ne!(empty.root(), one.root());
        assert_eq!(empty.root(), MerkleTree::new(4).unwrap().root());
    }

    #[test]
    fn test_proof_serde_roundtrip() {
        // Witnesses travel as JSON between holder tooling and verifiers.
        let tree = depth4_tree();
        let proof = tree.prove(9).unwrap();
        let json = serde_json::to_string(&proof).unwrap();
        let back: InclusionProof = serde_json::from_str(&json).unwrap();
        assert_eq!(back, proof);
        assert!(verify_inclusion(&leaf_hash(&f(109)), &back, &tree.root()));
    }

    #[test]
    fn test_registry_depth_constant() {
        let tree = MerkleTree::registry();
        assert_eq!(tree.depth(), REGISTRY_TREE_DEPTH);
    }

    #[test]
    fn test_registry_depth_proof_roundtrip() {
        let mut tree = MerkleTree::registry();
        let idx = tree.append(f(42)).unwrap();
        let proof = tree.prove(idx).unwrap();
        assert_eq!(proof.siblings.len(), REGISTRY_TREE_DEPTH);
        assert!(verify_inclusion(&leaf_hash(&f(42)), &proof, &tree.root()));
    }

    proptest! {
        #[test]
        fn prop_every_appended_leaf_verifies(
            values in proptest::collection::vec(any::<u64>(), 1..40),
            index_seed in any::<usize>(),
        ) {
            let mut tree = MerkleTree::new(6).unwrap();
            for v in &values {
                tree.append(f(*v)).unwrap();
            }
            let root = tree.root();
            let index = index_seed % values.len();
            let proof = tree.prove(index).unwrap();
            prop_assert!(verify_inclusion(&leaf_hash(&f(values[index])), &proof, &root));
        }

        #[test]
        fn prop_foreign_root_rejects(
            values in proptest::collection::vec(any::<u64>(), 2..20),
            // Zero would occupy a slot with the empty sentinel and leave
            // the root unchanged.
            extra in 1..u64::MAX,
        ) {
            let mut tree = MerkleTree::new(6).unwrap();
            for v in &values {
                tree.append(f(*v)).unwrap();
            }
            let proof = tree.prove(0).unwrap();
            let leaf = leaf_hash(&f(values[0]));
            prop_assert!(verify_inclusion(&leaf, &proof, &tree.root()));

            // Appending one more leaf moves the root; the old witness
            // must no longer verify against it.
            let mut grown = tree.clone();
            grown.append(f(extra)).unwrap();
            prop_assert!(!verify_inclusion(&leaf, &proof, &grown.root()));
        }
    }
}
