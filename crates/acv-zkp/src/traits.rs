//! # Proof Oracle Trait
//!
//! Defines the abstract interface to the succinct proof system. All
//! backends (mock today; pairing-based schemes in production) must
//! satisfy this trait.
//!
//! ## Security Invariant
//!
//! The trait requires `Send + Sync` bounds for safe concurrent access.
//! Proof generation and verification are pure functions with no side
//! effects, and verification is synchronous: it completes or fails
//! before returning, with no pending state observable.

use thiserror::Error;

/// Error during proof generation.
#[derive(Error, Debug)]
pub enum ProofError {
    /// The circuit is malformed or unsatisfiable.
    #[error("circuit error: {0}")]
    CircuitError(String),
    /// Witness generation failed.
    #[error("witness error: {0}")]
    WitnessError(String),
    /// Internal prover error.
    #[error("prover error: {0}")]
    ProverError(String),
}

/// Error during proof verification.
///
/// Distinct from a `false` verdict: an error means the proof object or
/// key could not even be interpreted.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The proof object is structurally unreadable.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// The verifying key is incompatible.
    #[error("key mismatch: {0}")]
    KeyMismatch(String),
}

/// Abstract interface to a succinct proof system.
///
/// Each backend provides its own proof and key types. Public inputs
/// cross this boundary as opaque bytes — the engine's statement encoding
/// on one side, the circuit's public-input layout on the other.
pub trait ProofOracle: Send + Sync {
    /// The proof type produced by this oracle.
    type Proof: Send + Sync;
    /// The verifying key type.
    type VerifyingKey: Clone + Send + Sync;
    /// The proving key type.
    type ProvingKey: Send + Sync;

    /// Generate a proof over the given public inputs and private witness.
    fn prove(
        &self,
        pk: &Self::ProvingKey,
        public_inputs: &[u8],
        witness: &[u8],
    ) -> Result<Self::Proof, ProofError>;

    /// Verify a proof against public inputs.
    ///
    /// Returns a single boolean; there are no partial-validity states.
    fn verify(
        &self,
        vk: &Self::VerifyingKey,
        proof: &Self::Proof,
        public_inputs: &[u8],
    ) -> Result<bool, VerifyError>;
}
