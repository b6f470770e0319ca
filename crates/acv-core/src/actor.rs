//! # Actor Identity and Roles
//!
//! Newtype identity for every party that calls the engine — the owner,
//! issuers, updaters, and relying parties — plus the grantable role
//! vocabulary. Role *membership* lives in `acv-registry`; this module
//! only defines who and what.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an engine caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Generate a new random actor identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

/// A grantable role.
///
/// The owner is not a `Role` — ownership is singular and transferable,
/// tracked separately from the role sets. Issuer strictly contains the
/// updater capability surface: issuers may register, revoke, and advance
/// roots; updaters may only advance roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May register and revoke commitments and advance roots.
    Issuer,
    /// May advance roots only.
    Updater,
}

impl Role {
    /// The role name used in authorization rejections.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issuer => "issuer",
            Self::Updater => "updater",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
