//! # Statements and Predicate Policy
//!
//! A statement is the public half of a proof: the roots it was generated
//! against, the scope, the derived outputs (nullifier, blinded
//! commitment), and the predicate's disclosed values. The gateway reads
//! the named fields for its own gating and hands the oracle the opaque
//! fixed-width encoding.
//!
//! `RequiredPredicate` is the relying party's side: the policy a
//! statement must satisfy before the engine even consults the oracle.

use serde::{Deserialize, Serialize};

use acv_core::{EngineError, EngineResult, Field, Nullifier, PredicateKind, Scope};

/// The public inputs of a succinct proof, as the gateway reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStatement {
    /// The registry root the proof was generated against.
    pub registry_root: Field,
    /// The revocation root the proof was generated against.
    pub revocation_root: Field,
    /// The scope the nullifier is bound to.
    pub scope: Scope,
    /// The derived nullifier to consume on success.
    pub nullifier: Nullifier,
    /// The blinded commitment output.
    pub blinded_commitment: Field,
    /// Which predicate the proof establishes.
    pub predicate: PredicateKind,
    /// The predicate's disclosed output values, in circuit order.
    pub outputs: Vec<Field>,
}

impl ProofStatement {
    /// Structural validation: the output count must match the declared
    /// predicate's shape.
    pub fn validate_shape(&self) -> EngineResult<()> {
        let expected = self.predicate.expected_outputs();
        if self.outputs.len() != expected {
            return Err(EngineError::MalformedInput(format!(
                "{} statement carries {} outputs, expected {expected}",
                self.predicate,
                self.outputs.len()
            )));
        }
        Ok(())
    }

    /// The fixed-width public-input encoding handed to the proof oracle:
    /// predicate tag, both roots, scope, nullifier, blinded commitment,
    /// then the disclosed outputs.
    pub fn to_public_inputs(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + 8 + 32 * (4 + self.outputs.len()));
        bytes.push(self.predicate.tag());
        bytes.extend_from_slice(self.registry_root.as_bytes());
        bytes.extend_from_slice(self.revocation_root.as_bytes());
        bytes.extend_from_slice(&self.scope.0.to_be_bytes());
        bytes.extend_from_slice(self.nullifier.as_field().as_bytes());
        bytes.extend_from_slice(self.blinded_commitment.as_bytes());
        for output in &self.outputs {
            bytes.extend_from_slice(output.as_bytes());
        }
        bytes
    }
}

/// The predicate policy a relying party requires of a statement.
///
/// One variant per [`PredicateKind`]; the policy check is the gateway's
/// second gate, ahead of any cryptography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequiredPredicate {
    /// Disclosed age threshold must be at least `min_age`.
    AgeOver {
        /// The minimum acceptable disclosed threshold, in years.
        min_age: u64,
    },
    /// Disclosed jurisdiction code must be one of `allowed`.
    JurisdictionIn {
        /// The acceptable jurisdiction codes.
        allowed: Vec<Field>,
    },
    /// Disclosed accreditation tier must be at least `min_tier`.
    AccreditationTier {
        /// The minimum acceptable tier.
        min_tier: u64,
    },
    /// Sanctions clearance; nothing is disclosed, nothing to compare.
    SanctionsClear,
}

impl RequiredPredicate {
    /// The statement kind this policy applies to.
    pub fn kind(&self) -> PredicateKind {
        match self {
            Self::AgeOver { .. } => PredicateKind::AgeOver,
            Self::JurisdictionIn { .. } => PredicateKind::JurisdictionIn,
            Self::AccreditationTier { .. } => PredicateKind::AccreditationTier,
            Self::SanctionsClear => PredicateKind::SanctionsClear,
        }
    }

    /// Predicate-specific sanity: does the statement's disclosed output
    /// satisfy this policy? Assumes the shape was already validated.
    pub fn check(&self, statement: &ProofStatement) -> EngineResult<()> {
        if statement.predicate != self.kind() {
            return Err(EngineError::MalformedInput(format!(
                "statement proves {}, policy requires {}",
                statement.predicate,
                self.kind()
            )));
        }
        match self {
            Self::AgeOver { min_age } => {
                let disclosed = disclosed_u64(statement, "age threshold")?;
                if disclosed < *min_age {
                    return Err(EngineError::MalformedInput(format!(
                        "disclosed age threshold {disclosed} is below required {min_age}"
                    )));
                }
                Ok(())
            }
            Self::JurisdictionIn { allowed } => {
                let disclosed = first_output(statement)?;
                if !allowed.contains(disclosed) {
                    return Err(EngineError::MalformedInput(
                        "disclosed jurisdiction is not in the allowed set".to_string(),
                    ));
                }
                Ok(())
            }
            Self::AccreditationTier { min_tier } => {
                let disclosed = disclosed_u64(statement, "accreditation tier")?;
                if disclosed < *min_tier {
                    return Err(EngineError::MalformedInput(format!(
                        "disclosed tier {disclosed} is below required {min_tier}"
                    )));
                }
                Ok(())
            }
            Self::SanctionsClear => Ok(()),
        }
    }
}

fn first_output(statement: &ProofStatement) -> EngineResult<&Field> {
    statement.outputs.first().ok_or_else(|| {
        EngineError::MalformedInput(format!(
            "{} statement is missing its disclosed output",
            statement.predicate
        ))
    })
}

fn disclosed_u64(statement: &ProofStatement, label: &str) -> EngineResult<u64> {
    first_output(statement)?.to_u64().map_err(|_| {
        EngineError::MalformedInput(format!("disclosed {label} does not fit an integer"))
    })
}
