//! # Scope — Replay-Prevention Domains
//!
//! A scope is the domain a nullifier is bound to: the sentinel `0` means
//! global (one lifetime use per secret), any other value identifies an
//! event or session (one use per secret per event).

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// The replay-prevention domain a nullifier is bound to.
///
/// `Scope(0)` is the global sentinel. Selection between the global and
/// event-bound derivation schemes is data-dependent on this value and
/// must be evaluated identically by the prover circuit and the verifying
/// gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Scope(pub u64);

impl Scope {
    /// The global scope sentinel: one lifetime use per secret.
    pub const GLOBAL: Scope = Scope(0);

    /// Whether this is the global sentinel.
    pub fn is_global(&self) -> bool {
        self.0 == 0
    }

    /// The canonical field embedding of this scope, for hashing.
    pub fn to_field(&self) -> Field {
        Field::from_u64(self.0)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_global() {
            f.write_str("global")
        } else {
            write!(f, "event:{}", self.0)
        }
    }
}
