//! # acv-core — Foundational Types for the ACV Stack
//!
//! This crate is the bedrock of the Anonymous Credential Verification
//! Stack. It defines the type-system primitives every other crate builds
//! on; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for protocol values.** `Commitment`, `Nullifier`,
//!    `SecretKey`, `Scope`, `ActorId` — all newtypes. You cannot pass a
//!    nullifier where a commitment is expected, and a secret key never
//!    leaks through a `Display` impl.
//!
//! 2. **One error taxonomy.** Every rejection the engine can produce is an
//!    `EngineError` of exactly one kind: authorization, state conflict,
//!    freshness, cryptographic invalidity, or malformed input. Callers
//!    dispatch on [`EngineError::kind()`]; there are no silent failures.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision. Non-UTC inputs are rejected at
//!    construction.
//!
//! 4. **Closed event vocabulary.** `EngineEvent` has exactly the four
//!    classes observers may consume; the `EventLog` is append-only and
//!    totally ordered.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `acv-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone` and implement
//!   `Serialize`/`Deserialize`.

pub mod actor;
pub mod error;
pub mod event;
pub mod field;
pub mod predicate;
pub mod scope;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use actor::{ActorId, Role};
pub use error::{CryptoError, EngineError, EngineResult, ErrorKind};
pub use event::{EngineEvent, EventLog};
pub use field::{Commitment, Field, Nullifier, SecretKey};
pub use predicate::PredicateKind;
pub use scope::Scope;
pub use temporal::Timestamp;
