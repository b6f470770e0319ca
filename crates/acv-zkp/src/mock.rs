//! # Mock Oracle — Deterministic Development Backend
//!
//! A transparent stand-in for the succinct proof system. Produces
//! SHA-256-based "proofs" that are verifiable but provide **no
//! zero-knowledge guarantees**.
//!
//! ## How It Works
//!
//! - `prove()` computes `SHA256(domain || public_inputs)` and returns the
//!   hex-encoded digest as the proof. The private witness is accepted and
//!   ignored — a real backend consumes it; the mock only binds the proof
//!   to the public inputs.
//! - `verify()` recomputes the same digest and checks equality.
//!
//! ## Security Warning
//!
//! **NOT PRIVATE.** Anyone can recompute a mock proof from the public
//! inputs. This backend exists solely so the engine's gating logic can
//! be exercised without a real prover.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::traits::{ProofError, ProofOracle, VerifyError};

/// Domain prefix binding mock proofs to this backend.
const MOCK_PROOF_DOMAIN: &[u8] = b"acv-mock-proof-v1";

/// A mock proof — hex-encoded SHA-256 digest of the public inputs under
/// the mock domain.
///
/// **NOT PRIVATE.** Transparent by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MockProof {
    /// Hex-encoded digest: `SHA256(domain || public_inputs)`.
    pub proof_hex: String,
}

/// Mock verifying key — stateless; verification is deterministic
/// recomputation, so the key carries no secrets.
#[derive(Debug, Clone, Default)]
pub struct MockVerifyingKey;

/// Mock proving key — stateless for the same reason.
#[derive(Debug, Clone, Default)]
pub struct MockProvingKey;

/// The deterministic mock backend.
#[derive(Debug, Clone, Default)]
pub struct MockOracle;

fn digest_hex(public_inputs: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(MOCK_PROOF_DOMAIN);
    hasher.update(public_inputs);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

impl ProofOracle for MockOracle {
    type Proof = MockProof;
    type VerifyingKey = MockVerifyingKey;
    type ProvingKey = MockProvingKey;

    /// Generate a deterministic mock proof bound to the public inputs.
    fn prove(
        &self,
        _pk: &Self::ProvingKey,
        public_inputs: &[u8],
        _witness: &[u8],
    ) -> Result<Self::Proof, ProofError> {
        Ok(MockProof {
            proof_hex: digest_hex(public_inputs),
        })
    }

    /// Verify a mock proof by recomputing the expected digest.
    fn verify(
        &self,
        _vk: &Self::VerifyingKey,
        proof: &Self::Proof,
        public_inputs: &[u8],
    ) -> Result<bool, VerifyError> {
        if proof.proof_hex.len() != 64 {
            return Err(VerifyError::MalformedProof(format!(
                "expected 64 hex chars, got {}",
                proof.proof_hex.len()
            )));
        }
        if !proof.proof_hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(VerifyError::MalformedProof(
                "proof contains non-hex characters".to_string(),
            ));
        }
        Ok(proof.proof_hex == digest_hex(public_inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prove_then_verify_roundtrip() {
        let oracle = MockOracle;
        let proof = oracle
            .prove(&MockProvingKey, b"statement-bytes", b"witness")
            .unwrap();
        assert!(oracle
            .verify(&MockVerifyingKey, &proof, b"statement-bytes")
            .unwrap());
    }

    #[test]
    fn prove_is_deterministic_and_witness_blind() {
        let oracle = MockOracle;
        let a = oracle.prove(&MockProvingKey, b"inputs", b"w1").unwrap();
        let b = oracle.prove(&MockProvingKey, b"inputs", b"w2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_public_inputs_produce_different_proofs() {
        let oracle = MockOracle;
        let a = oracle.prove(&MockProvingKey, b"input_a", b"").unwrap();
        let b = oracle.prove(&MockProvingKey, b"input_b", b"").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_rejects_wrong_public_inputs() {
        let oracle = MockOracle;
        let proof = oracle.prove(&MockProvingKey, b"correct", b"").unwrap();
        assert!(!oracle.verify(&MockVerifyingKey, &proof, b"wrong").unwrap());
    }

    #[test]
    fn verify_rejects_malformed_proof_wrong_length() {
        let oracle = MockOracle;
        let bad = MockProof {
            proof_hex: "abcd".to_string(),
        };
        match oracle.verify(&MockVerifyingKey, &bad, b"inputs") {
            Err(VerifyError::MalformedProof(msg)) => assert!(msg.contains("64 hex chars")),
            other => panic!("expected MalformedProof, got: {other:?}"),
        }
    }

    #[test]
    fn verify_rejects_malformed_proof_invalid_hex() {
        let oracle = MockOracle;
        let bad = MockProof {
            proof_hex: "g".repeat(64),
        };
        match oracle.verify(&MockVerifyingKey, &bad, b"inputs") {
            Err(VerifyError::MalformedProof(msg)) => assert!(msg.contains("non-hex")),
            other => panic!("expected MalformedProof, got: {other:?}"),
        }
    }

    #[test]
    fn verify_returns_false_for_mismatched_valid_shape() {
        let oracle = MockOracle;
        let proof = MockProof {
            proof_hex: "aa".repeat(32),
        };
        assert!(!oracle.verify(&MockVerifyingKey, &proof, b"inputs").unwrap());
    }

    #[test]
    fn mock_proof_serialization_roundtrip() {
        let oracle = MockOracle;
        let proof = oracle.prove(&MockProvingKey, b"payload", b"").unwrap();
        let json = serde_json::to_string(&proof).unwrap();
        let back: MockProof = serde_json::from_str(&json).unwrap();
        assert_eq!(back, proof);
    }
}
