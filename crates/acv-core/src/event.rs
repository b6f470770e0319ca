//! # Engine Events — Append-Only Observability Log
//!
//! The four event classes exposed to indexing consumers, and the
//! append-only log they land in. Events are appended inside the emitting
//! operation's critical section, so log order matches state-transition
//! order.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::actor::ActorId;
use crate::field::{Commitment, Field, Nullifier};
use crate::predicate::PredicateKind;
use crate::scope::Scope;
use crate::temporal::Timestamp;

/// An observable engine event. The vocabulary is closed: these four
/// classes are the entire observability surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum EngineEvent {
    /// The roots record was replaced.
    RootsAdvanced {
        /// The new registry root.
        registry_root: Field,
        /// The new revocation root.
        revocation_root: Field,
        /// When the replacement took effect.
        timestamp: Timestamp,
    },
    /// A commitment entered the registered set.
    CredentialRegistered {
        /// The registered commitment.
        commitment: Commitment,
        /// The issuer that registered it.
        issuer: ActorId,
    },
    /// A commitment was marked revoked.
    CredentialRevoked {
        /// The revoked commitment.
        commitment: Commitment,
        /// The issuer that revoked it.
        issuer: ActorId,
    },
    /// A proof was verified and its nullifier consumed.
    ProofVerified {
        /// The relying party that submitted the proof.
        caller: ActorId,
        /// The predicate the proof established.
        predicate: PredicateKind,
        /// The consumed nullifier.
        nullifier: Nullifier,
        /// The scope the nullifier was consumed under.
        scope: Scope,
    },
}

impl EngineEvent {
    /// The event class name, for indexers that key on it.
    pub fn class(&self) -> &'static str {
        match self {
            Self::RootsAdvanced { .. } => "RootsAdvanced",
            Self::CredentialRegistered { .. } => "CredentialRegistered",
            Self::CredentialRevoked { .. } => "CredentialRevoked",
            Self::ProofVerified { .. } => "ProofVerified",
        }
    }
}

/// An append-only, totally ordered event log.
///
/// Shared by the registry and the gateway via `Arc` so a deployment has
/// one log ordered consistently with its state transitions. Readers take
/// snapshots; there is no truncation.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Mutex<Vec<EngineEvent>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn append(&self, event: EngineEvent) {
        self.entries.lock().push(event);
    }

    /// A point-in-time copy of all events, in append order.
    pub fn snapshot(&self) -> Vec<EngineEvent> {
        self.entries.lock().clone()
    }

    /// The number of events appended so far.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
