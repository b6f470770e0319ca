//! # acv-zkp — The Proof Oracle Boundary
//!
//! The succinct proof system is an external collaborator; this crate is
//! the trait boundary the gateway calls through and nothing more. The
//! mathematical properties of the proving scheme (soundness, the
//! zero-knowledge property) are assumed, not implemented here.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): the `ProofOracle` trait every backend must
//!   satisfy. Verification returns a single boolean — there are no
//!   partial-validity states.
//! - **Mock** (`mock.rs`): `MockOracle`, a deterministic, transparent
//!   backend for development and testing. **Provides no zero-knowledge
//!   guarantees.**
//!
//! ## Crate Policy
//!
//! - No dependency on other `acv-*` crates: the oracle sees opaque
//!   public-input bytes, never engine types.
//! - No `unsafe` code.

pub mod mock;
pub mod traits;

pub use mock::{MockOracle, MockProof, MockProvingKey, MockVerifyingKey};
pub use traits::{ProofError, ProofOracle, VerifyError};
