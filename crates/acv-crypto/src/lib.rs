//! # acv-crypto — Commitment Function, Tree Verifiers, Derivations
//!
//! The cryptographic layer of the ACV Stack:
//!
//! - **Hash** (`hash.rs`): the opaque commitment function `H` —
//!   domain-separated SHA-256 over fixed-width field values. Every hash
//!   in the protocol flows through this module; no other crate touches
//!   the digest primitive directly.
//! - **Merkle** (`merkle.rs`): the pure inclusion verifier and the
//!   fixed-depth reference tree builder that plays the off-band
//!   tree-builder's part in tests and tooling.
//! - **SMT** (`smt.rs`): the sparse non-inclusion verifier over
//!   commitment-keyed paths, and its reference builder. This is the
//!   revocation-absence check.
//! - **Nullifier** (`nullifier.rs`): the global, event-bound, and
//!   epoch-bound derivation schemes and the scope-sentinel selector the
//!   gateway mirrors.
//!
//! ## Crate Policy
//!
//! - Verifier functions are pure, never panic on well-typed input, and
//!   report failure as `false` — not as an error.
//! - Builder and encoding failures are `CryptoError`.
//! - No `unsafe` code.

pub mod hash;
pub mod merkle;
pub mod nullifier;
pub mod smt;

pub use hash::{commit, entry_leaf_hash, leaf_hash, node_hash};
pub use merkle::{verify_inclusion, InclusionProof, MerkleTree, REGISTRY_TREE_DEPTH};
pub use nullifier::{
    blind_commitment, derive_epoch, derive_event, derive_for_scope, derive_global, random_secret,
};
pub use smt::{verify_non_inclusion, NonInclusionProof, SparseTree, REVOCATION_TREE_DEPTH};
