//! # Role Sets — Who May Change the Registry
//!
//! A singular, transferable owner plus two grantable role sets. The
//! owner is the sole authority for grant/revoke/transfer; issuers may
//! register and revoke commitments and advance roots; updaters may
//! advance roots only.
//!
//! Ownership carries no implicit operational rights: an owner that wants
//! to issue must grant itself the issuer role. Membership is a plain
//! set — no expiry, no hierarchy beyond owner > {issuer, updater}.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use acv_core::{ActorId, EngineError, EngineResult, Role};

/// The registry's authorization state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSet {
    owner: ActorId,
    issuers: HashSet<ActorId>,
    updaters: HashSet<ActorId>,
}

impl RoleSet {
    /// Create a role set with the given owner and no grants.
    pub fn new(owner: ActorId) -> Self {
        Self {
            owner,
            issuers: HashSet::new(),
            updaters: HashSet::new(),
        }
    }

    /// The current owner.
    pub fn owner(&self) -> &ActorId {
        &self.owner
    }

    /// Whether `actor` is the owner.
    pub fn is_owner(&self, actor: &ActorId) -> bool {
        self.owner == *actor
    }

    /// Whether `actor` holds the issuer role.
    pub fn is_issuer(&self, actor: &ActorId) -> bool {
        self.issuers.contains(actor)
    }

    /// Whether `actor` holds the updater role.
    pub fn is_updater(&self, actor: &ActorId) -> bool {
        self.updaters.contains(actor)
    }

    /// Reject `caller` unless it is the owner.
    pub fn require_owner(&self, caller: &ActorId) -> EngineResult<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(EngineError::Authorization {
                actor: caller.to_string(),
                required: "owner".to_string(),
            })
        }
    }

    /// Reject `caller` unless it holds the issuer role.
    pub fn require_issuer(&self, caller: &ActorId) -> EngineResult<()> {
        if self.is_issuer(caller) {
            Ok(())
        } else {
            Err(EngineError::Authorization {
                actor: caller.to_string(),
                required: Role::Issuer.as_str().to_string(),
            })
        }
    }

    /// Reject `caller` unless it may advance roots (issuer or updater).
    pub fn require_root_advancer(&self, caller: &ActorId) -> EngineResult<()> {
        if self.is_issuer(caller) || self.is_updater(caller) {
            Ok(())
        } else {
            Err(EngineError::Authorization {
                actor: caller.to_string(),
                required: "issuer-or-updater".to_string(),
            })
        }
    }

    /// Grant `role` to `actor`. Owner-only; idempotent.
    pub fn grant(&mut self, caller: &ActorId, role: Role, actor: ActorId) -> EngineResult<()> {
        self.require_owner(caller)?;
        match role {
            Role::Issuer => self.issuers.insert(actor),
            Role::Updater => self.updaters.insert(actor),
        };
        Ok(())
    }

    /// Remove `role` from `actor`. Owner-only; idempotent.
    pub fn revoke(&mut self, caller: &ActorId, role: Role, actor: &ActorId) -> EngineResult<()> {
        self.require_owner(caller)?;
        match role {
            Role::Issuer => self.issuers.remove(actor),
            Role::Updater => self.updaters.remove(actor),
        };
        Ok(())
    }

    /// Transfer ownership. Owner-only. Role grants are untouched.
    pub fn transfer_ownership(
        &mut self,
        caller: &ActorId,
        new_owner: ActorId,
    ) -> EngineResult<()> {
        self.require_owner(caller)?;
        self.owner = new_owner;
        Ok(())
    }
}
