//! # Error Types — The Engine Rejection Taxonomy
//!
//! Every rejection the engine can produce is an [`EngineError`] of exactly
//! one kind. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.
//!
//! ## Design
//!
//! - Every error aborts the operation that raised it with zero state
//!   mutation. There is no partial registration and no partial nullifier
//!   consumption anywhere in the engine.
//! - The engine never retries internally; all retry policy belongs to
//!   calling layers. A `Freshness` rejection is recoverable by the caller
//!   re-deriving a statement against current roots; the other kinds are
//!   terminal for the submitted input.
//! - Every error carries a human-readable reason. Callers that dispatch
//!   programmatically use [`EngineError::kind()`] rather than matching on
//!   message strings.

use thiserror::Error;

/// Convenient result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Top-level rejection type for the ACV engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The caller lacks the role the operation requires.
    #[error("authorization: {actor} lacks the {required} role")]
    Authorization {
        /// The rejected caller.
        actor: String,
        /// The role the operation requires.
        required: String,
    },

    /// The operation conflicts with current state: duplicate registration,
    /// double revocation, or double consumption of a nullifier. The caller
    /// must construct a fresh input rather than retry identically.
    #[error("state conflict: {0}")]
    StateConflict(String),

    /// The statement's embedded roots or scope do not match current
    /// registry state. Recoverable by re-proving against current roots.
    #[error("stale statement: {0}")]
    Freshness(String),

    /// The proof oracle rejected the proof. A different, valid proof must
    /// be constructed off-band.
    #[error("cryptographically invalid: {0}")]
    CryptographicInvalid(String),

    /// The statement shape or field contents are wrong for the declared
    /// predicate. Indicates a caller/integration bug.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// The five rejection kinds, for callers that dispatch programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller lacks a required role.
    Authorization,
    /// Duplicate registration/revocation or nullifier double-consumption.
    StateConflict,
    /// Statement embeds stale roots or a mismatched scope.
    Freshness,
    /// The proof oracle rejected the proof.
    CryptographicInvalid,
    /// Wrong statement shape or field contents.
    MalformedInput,
}

impl EngineError {
    /// The taxonomy kind of this rejection.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authorization { .. } => ErrorKind::Authorization,
            Self::StateConflict(_) => ErrorKind::StateConflict,
            Self::Freshness(_) => ErrorKind::Freshness,
            Self::CryptographicInvalid(_) => ErrorKind::CryptographicInvalid,
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
        }
    }
}

/// Error while manipulating hashes, proofs, or reference trees.
///
/// These arise in tooling paths (proof construction, tree building,
/// encoding). The verification gateway itself never surfaces a
/// `CryptoError`; malformed verifier inputs yield `false` or a typed
/// `EngineError` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A value failed to decode or exceeds its representable range.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A reference tree operation failed (capacity, collision, range).
    #[error("tree error: {0}")]
    Tree(String),
}
