//! # Proof Verification Gateway
//!
//! The single authoritative entry point: accept a statement and proof,
//! run the ordered gates, consume the nullifier, emit the event. Any
//! gate failure aborts with zero state mutation.
//!
//! Gate order:
//!
//! 1. Structural shape of the statement.
//! 2. Predicate-specific policy sanity.
//! 3. Freshness: claimed roots equal the registry's live roots; claimed
//!    scope equals the caller-supplied scope.
//! 4. Oracle delegation — the only cryptographic step.
//! 5. Partition selection and atomic nullifier check-and-set.
//! 6. Event emission and receipt.
//!
//! A proof generated against stale roots is rejected at gate 3 even if
//! it remains cryptographically valid: holders re-prove after every
//! root advance. The registry read at gate 3 is the only snapshot this
//! call relies on; a root advance landing after it does not invalidate
//! an in-flight verification.

use std::sync::Arc;

use tracing::{info, warn};

use acv_core::{ActorId, EngineError, EngineEvent, EngineResult, EventLog, Nullifier,
    PredicateKind, Scope};
use acv_registry::CredentialRegistry;
use acv_zkp::ProofOracle;

use crate::ledger::{LedgerPartition, NullifierLedger};
use crate::statement::{ProofStatement, RequiredPredicate};

/// Proof of a successful authoritative verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReceipt {
    /// The relying party that submitted the proof.
    pub caller: ActorId,
    /// The predicate the proof established.
    pub predicate: PredicateKind,
    /// The consumed nullifier.
    pub nullifier: Nullifier,
    /// The scope it was consumed under.
    pub scope: Scope,
    /// The ledger partition it landed in.
    pub partition: LedgerPartition,
}

/// The proof-verification gateway.
///
/// Owns the nullifier ledger; shares the registry and event log with the
/// rest of the deployment. Generic over the oracle backend so the mock
/// and a production prover are interchangeable at compile time.
pub struct ProofGateway<O: ProofOracle> {
    registry: Arc<CredentialRegistry>,
    ledger: NullifierLedger,
    oracle: O,
    verifying_key: O::VerifyingKey,
    events: Arc<EventLog>,
}

impl<O: ProofOracle> ProofGateway<O> {
    /// Assemble a gateway over a registry, an oracle backend, and the
    /// deployment's event log.
    pub fn new(
        registry: Arc<CredentialRegistry>,
        oracle: O,
        verifying_key: O::VerifyingKey,
        events: Arc<EventLog>,
    ) -> Self {
        Self {
            registry,
            ledger: NullifierLedger::new(),
            oracle,
            verifying_key,
            events,
        }
    }

    /// The authoritative entry point: gates 1–6.
    ///
    /// On success the statement's nullifier is consumed in the partition
    /// its scope selects, a `ProofVerified` event is appended, and a
    /// receipt is returned. Every failure is a typed rejection with zero
    /// state mutation.
    pub fn verify_and_consume(
        &self,
        caller: &ActorId,
        scope: Scope,
        required: &RequiredPredicate,
        statement: &ProofStatement,
        proof: &O::Proof,
    ) -> EngineResult<VerificationReceipt> {
        if let Err(err) = self.check_statement(scope, required, statement, proof) {
            warn!(%caller, %scope, error = %err, "verification rejected");
            return Err(err);
        }

        // Gate 5: partition selection mirrors the derivation-scheme
        // selection on the scope sentinel, then one indivisible
        // check-and-set.
        let partition = LedgerPartition::for_scope(scope);
        if let Err(err) = self.ledger.consume(partition, statement.nullifier) {
            warn!(%caller, %scope, error = %err, "replay rejected");
            return Err(err);
        }

        // Gate 6: observable outcome.
        self.events.append(EngineEvent::ProofVerified {
            caller: *caller,
            predicate: statement.predicate,
            nullifier: statement.nullifier,
            scope,
        });
        info!(
            %caller,
            predicate = %statement.predicate,
            nullifier = %statement.nullifier,
            %scope,
            "proof verified and nullifier consumed"
        );
        Ok(VerificationReceipt {
            caller: *caller,
            predicate: statement.predicate,
            nullifier: statement.nullifier,
            scope,
            partition,
        })
    }

    /// Advisory variant: gates 1–4 only.
    ///
    /// Consumes nothing and grants **no replay protection**; a statement
    /// that passes here can still be rejected by the authoritative path.
    /// Intended for off-band testing and pre-flight checks only.
    pub fn verify_only(
        &self,
        scope: Scope,
        required: &RequiredPredicate,
        statement: &ProofStatement,
        proof: &O::Proof,
    ) -> EngineResult<()> {
        self.check_statement(scope, required, statement, proof)
    }

    /// The read-only ledger view.
    pub fn ledger(&self) -> &NullifierLedger {
        &self.ledger
    }

    /// Gates 1–4.
    fn check_statement(
        &self,
        scope: Scope,
        required: &RequiredPredicate,
        statement: &ProofStatement,
        proof: &O::Proof,
    ) -> EngineResult<()> {
        // Gate 1: structural shape.
        statement.validate_shape()?;

        // Gate 2: predicate policy sanity.
        required.check(statement)?;

        // Gate 3: freshness against the live roots and the caller's scope.
        let roots = self.registry.get_roots();
        if statement.registry_root != roots.registry_root {
            return Err(EngineError::Freshness(format!(
                "statement registry root {} does not match live root {}",
                statement.registry_root, roots.registry_root
            )));
        }
        if statement.revocation_root != roots.revocation_root {
            return Err(EngineError::Freshness(format!(
                "statement revocation root {} does not match live root {}",
                statement.revocation_root, roots.revocation_root
            )));
        }
        if statement.scope != scope {
            return Err(EngineError::Freshness(format!(
                "statement scope {} does not match requested scope {scope}",
                statement.scope
            )));
        }

        // Gate 4: the oracle. A single boolean; errors and `false` are
        // both cryptographic rejection.
        let valid = self
            .oracle
            .verify(&self.verifying_key, proof, &statement.to_public_inputs())
            .map_err(|e| EngineError::CryptographicInvalid(e.to_string()))?;
        if !valid {
            return Err(EngineError::CryptographicInvalid(
                "proof rejected by oracle".to_string(),
            ));
        }
        Ok(())
    }
}
