//! # Credential Registry — Current Truth
//!
//! One live [`RootsRecord`] plus the registered/revoked mirror maps,
//! mutated only through the operations here. Single-item operations are
//! strict; batch operations skip elements already in the target state —
//! a deliberate policy asymmetry, not an inconsistency to fix.
//!
//! Every rejection leaves state untouched. Batch operations validate all
//! elements before applying any, so a failing element aborts the whole
//! batch with zero mutation.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use acv_core::{
    ActorId, Commitment, EngineError, EngineEvent, EngineResult, EventLog, Field, Role, Timestamp,
};

use crate::roles::RoleSet;

/// The live summary of registered and revoked commitments.
///
/// Replaced wholesale by `advance_roots`; readers never observe a
/// partial update. `updated_at` is monotonic non-decreasing; the roots
/// themselves carry no ordering constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootsRecord {
    /// Merkle summary of all registered commitments.
    pub registry_root: Field,
    /// Sparse-Merkle summary of all revoked commitments.
    pub revocation_root: Field,
    /// When this record took effect.
    pub updated_at: Timestamp,
}

#[derive(Debug)]
struct RegistryState {
    roots: RootsRecord,
    registered: HashSet<Commitment>,
    revoked: HashSet<Commitment>,
    roles: RoleSet,
}

/// The credential registry: roots record, mirror maps, and roles.
///
/// Constructed once at deployment and shared (`Arc`) with every consumer;
/// all operations take `&self`. The mirror maps answer point queries
/// directly; the roots answer proof verification. Consistency between
/// the two is the off-band tree builder's obligation.
#[derive(Debug)]
pub struct CredentialRegistry {
    state: RwLock<RegistryState>,
    events: Arc<EventLog>,
}

impl CredentialRegistry {
    /// Create a registry owned by `owner`, with zero roots and empty maps.
    pub fn new(owner: ActorId, events: Arc<EventLog>) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                roots: RootsRecord {
                    registry_root: Field::ZERO,
                    revocation_root: Field::ZERO,
                    updated_at: Timestamp::now(),
                },
                registered: HashSet::new(),
                revoked: HashSet::new(),
                roles: RoleSet::new(owner),
            }),
            events,
        }
    }

    // ─── Registration and revocation ─────────────────────────────────

    /// Register a commitment. Issuer-only; strict.
    ///
    /// # Errors
    ///
    /// `Authorization` if the caller is not an issuer; `StateConflict`
    /// if the commitment is already registered.
    pub fn register(&self, caller: &ActorId, commitment: Commitment) -> EngineResult<()> {
        let mut state = self.state.write();
        state.roles.require_issuer(caller)?;
        if state.registered.contains(&commitment) {
            warn!(%caller, %commitment, "duplicate registration rejected");
            return Err(EngineError::StateConflict(format!(
                "{commitment} is already registered"
            )));
        }
        state.registered.insert(commitment);
        self.events.append(EngineEvent::CredentialRegistered {
            commitment,
            issuer: *caller,
        });
        info!(%caller, %commitment, "credential registered");
        Ok(())
    }

    /// Mark a registered commitment revoked. Issuer-only; strict;
    /// permanent.
    ///
    /// # Errors
    ///
    /// `Authorization` if the caller is not an issuer; `StateConflict`
    /// if the commitment is not registered or already revoked.
    pub fn revoke(&self, caller: &ActorId, commitment: Commitment) -> EngineResult<()> {
        let mut state = self.state.write();
        state.roles.require_issuer(caller)?;
        if !state.registered.contains(&commitment) {
            warn!(%caller, %commitment, "revocation of unregistered commitment rejected");
            return Err(EngineError::StateConflict(format!(
                "{commitment} is not registered"
            )));
        }
        if state.revoked.contains(&commitment) {
            warn!(%caller, %commitment, "double revocation rejected");
            return Err(EngineError::StateConflict(format!(
                "{commitment} is already revoked"
            )));
        }
        state.revoked.insert(commitment);
        self.events.append(EngineEvent::CredentialRevoked {
            commitment,
            issuer: *caller,
        });
        info!(%caller, %commitment, "credential revoked");
        Ok(())
    }

    /// Register a batch, silently skipping commitments that are already
    /// registered. Returns the number actually registered.
    ///
    /// The skip semantics are deliberately looser than [`register`]'s
    /// strict failure; issuers submitting bulk loads prefer idempotence.
    ///
    /// [`register`]: CredentialRegistry::register
    pub fn batch_register(
        &self,
        caller: &ActorId,
        commitments: &[Commitment],
    ) -> EngineResult<usize> {
        let mut state = self.state.write();
        state.roles.require_issuer(caller)?;
        let mut fresh = 0usize;
        for commitment in commitments {
            if state.registered.insert(*commitment) {
                self.events.append(EngineEvent::CredentialRegistered {
                    commitment: *commitment,
                    issuer: *caller,
                });
                fresh += 1;
            }
        }
        info!(%caller, total = commitments.len(), fresh, "batch registration");
        Ok(fresh)
    }

    /// Revoke a batch, silently skipping commitments that are already
    /// revoked. Returns the number actually revoked.
    ///
    /// An *unregistered* commitment is not "already revoked": it fails
    /// the batch with zero mutation, matching the single-item semantics
    /// for everything the skip rule does not cover.
    pub fn batch_revoke(
        &self,
        caller: &ActorId,
        commitments: &[Commitment],
    ) -> EngineResult<usize> {
        let mut state = self.state.write();
        state.roles.require_issuer(caller)?;
        // Validate before mutating: rejection must leave no partial batch.
        for commitment in commitments {
            if !state.registered.contains(commitment) {
                return Err(EngineError::StateConflict(format!(
                    "{commitment} is not registered"
                )));
            }
        }
        let mut fresh = 0usize;
        for commitment in commitments {
            if state.revoked.insert(*commitment) {
                self.events.append(EngineEvent::CredentialRevoked {
                    commitment: *commitment,
                    issuer: *caller,
                });
                fresh += 1;
            }
        }
        info!(%caller, total = commitments.len(), fresh, "batch revocation");
        Ok(fresh)
    }

    // ─── Roots ───────────────────────────────────────────────────────

    /// Replace the roots record. Issuer-or-updater.
    ///
    /// No validation against the mirror maps: the off-band tree builder
    /// is trusted to have derived the new trees from this registry's
    /// history. The timestamp is stamped here, under the write lock, and
    /// never moves backwards.
    pub fn advance_roots(
        &self,
        caller: &ActorId,
        registry_root: Field,
        revocation_root: Field,
    ) -> EngineResult<RootsRecord> {
        let mut state = self.state.write();
        state.roles.require_root_advancer(caller)?;
        let updated_at = Timestamp::now().max(state.roots.updated_at);
        let record = RootsRecord {
            registry_root,
            revocation_root,
            updated_at,
        };
        state.roots = record;
        self.events.append(EngineEvent::RootsAdvanced {
            registry_root,
            revocation_root,
            timestamp: updated_at,
        });
        info!(%caller, %registry_root, %revocation_root, "roots advanced");
        Ok(record)
    }

    /// Point-in-time read of the live roots record.
    pub fn get_roots(&self) -> RootsRecord {
        self.state.read().roots
    }

    // ─── Point queries ───────────────────────────────────────────────

    /// Registered and not revoked, from the mirror maps.
    pub fn query_valid(&self, commitment: &Commitment) -> bool {
        let state = self.state.read();
        state.registered.contains(commitment) && !state.revoked.contains(commitment)
    }

    /// Whether the commitment has ever been registered.
    pub fn is_registered(&self, commitment: &Commitment) -> bool {
        self.state.read().registered.contains(commitment)
    }

    /// Whether the commitment has been revoked.
    pub fn is_revoked(&self, commitment: &Commitment) -> bool {
        self.state.read().revoked.contains(commitment)
    }

    // ─── Role administration ─────────────────────────────────────────

    /// Grant a role. Owner-only.
    pub fn grant_role(&self, caller: &ActorId, role: Role, actor: ActorId) -> EngineResult<()> {
        self.state.write().roles.grant(caller, role, actor)
    }

    /// Remove a role. Owner-only.
    pub fn revoke_role(&self, caller: &ActorId, role: Role, actor: &ActorId) -> EngineResult<()> {
        self.state.write().roles.revoke(caller, role, actor)
    }

    /// Transfer ownership. Owner-only.
    pub fn transfer_ownership(&self, caller: &ActorId, new_owner: ActorId) -> EngineResult<()> {
        self.state.write().roles.transfer_ownership(caller, new_owner)
    }

    /// The current owner.
    pub fn owner(&self) -> ActorId {
        *self.state.read().roles.owner()
    }

    /// Whether `actor` holds the issuer role.
    pub fn is_issuer(&self, actor: &ActorId) -> bool {
        self.state.read().roles.is_issuer(actor)
    }

    /// Whether `actor` holds the updater role.
    pub fn is_updater(&self, actor: &ActorId) -> bool {
        self.state.read().roles.is_updater(actor)
    }
}
