//! # acv-registry — The Credential Registry
//!
//! Owns the protocol's current truth: the roots record (registry root +
//! revocation root + timestamp), the registered/revoked mirror maps for
//! direct point queries, and the authorization policy over who may change
//! any of it.
//!
//! ## Architecture
//!
//! - **Roles** (`roles.rs`): a singular transferable owner plus issuer
//!   and updater sets. Pure membership logic, no locking.
//! - **Registry** (`registry.rs`): the shared state object. All
//!   operations take `&self` behind a `parking_lot::RwLock`, so one
//!   registry instance serves concurrent verifiers.
//!
//! ## Trust Boundary
//!
//! `advance_roots` performs no validation that the submitted roots are
//! consistent with the mirror maps. The off-band tree builder is trusted
//! to derive the new trees from the same registration/revocation history
//! this registry recorded. The engine never reconstructs a tree from the
//! maps.

pub mod registry;
pub mod roles;

pub use registry::{CredentialRegistry, RootsRecord};
pub use roles::RoleSet;
