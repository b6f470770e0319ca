//! # acv-gateway — Proof Verification and Replay Prevention
//!
//! The protocol's core logic: accept a statement and succinct proof,
//! gate them through structural, policy, freshness, and cryptographic
//! checks, then consume the embedded nullifier exactly once per scope.
//!
//! ## Architecture
//!
//! - **Statement** (`statement.rs`): the public-input model — claimed
//!   roots, scope, nullifier, blinded commitment, predicate outputs —
//!   plus the relying party's `RequiredPredicate` policy object.
//! - **Ledger** (`ledger.rs`): the partitioned nullifier consumption
//!   map with an indivisible check-and-set.
//! - **Gateway** (`gateway.rs`): the ordered gates and the single
//!   authoritative entry point, `verify_and_consume`.
//!
//! ## Ordering Guarantee
//!
//! Two concurrent submissions of the same proof yield exactly one
//! success and one state-conflict rejection: the consumption map's
//! check-and-set happens under a single mutex acquisition.

pub mod gateway;
pub mod ledger;
pub mod statement;

pub use gateway::{ProofGateway, VerificationReceipt};
pub use ledger::{LedgerPartition, NullifierLedger};
pub use statement::{ProofStatement, RequiredPredicate};
