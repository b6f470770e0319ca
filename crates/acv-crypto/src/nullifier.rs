//! # Nullifier Derivation Schemes
//!
//! Three pure derivations over a holder's secret, each a different
//! replay-prevention shape:
//!
//! - **Global**: `N = H(secret, commitment)` — one nullifier per
//!   credential for all time.
//! - **Event-bound**: `N = H(secret, H(secret), event)` — one use per
//!   event, unlinkable to the global nullifier and to other events for
//!   an observer without the secret.
//! - **Epoch-bound**: `N = H(secret, commitment, epoch)` — keyed by a
//!   renewing time window, enabling periodic re-proof without permanent
//!   lockout.
//!
//! Selection between global and event-bound is data-dependent on the
//! scope sentinel. [`derive_for_scope`] is that selector; the gateway
//! evaluates the same selection when it picks the ledger partition, and
//! any prover circuit must evaluate it identically.

use rand::RngCore;

use acv_core::{Commitment, Field, Nullifier, Scope, SecretKey};

use crate::hash::{
    hash_fields, DOMAIN_BLINDING, DOMAIN_NULLIFIER_EPOCH, DOMAIN_NULLIFIER_EVENT,
    DOMAIN_NULLIFIER_GLOBAL, DOMAIN_SECRET_DIGEST,
};

/// The global nullifier: `H(secret, commitment)`.
///
/// Reused across all global-scope proofs from the credential, so a
/// second global proof is always rejected.
pub fn derive_global(secret: &SecretKey, commitment: &Commitment) -> Nullifier {
    Nullifier(hash_fields(
        DOMAIN_NULLIFIER_GLOBAL,
        &[secret.as_field(), commitment.as_field()],
    ))
}

/// The inner secret digest `H(secret)` used by the event-bound scheme.
///
/// An observer without the secret cannot correlate this value across
/// scopes, which is what keeps event nullifiers unlinkable.
pub fn secret_digest(secret: &SecretKey) -> Field {
    hash_fields(DOMAIN_SECRET_DIGEST, &[secret.as_field()])
}

/// The event-bound nullifier: `H(secret, H(secret), event)`.
pub fn derive_event(secret: &SecretKey, scope: Scope) -> Nullifier {
    Nullifier(hash_fields(
        DOMAIN_NULLIFIER_EVENT,
        &[
            secret.as_field(),
            &secret_digest(secret),
            &scope.to_field(),
        ],
    ))
}

/// The epoch-bound nullifier: `H(secret, commitment, epoch)`.
///
/// `epoch` is a caller-supplied window index; the engine reads no clocks
/// here.
pub fn derive_epoch(secret: &SecretKey, commitment: &Commitment, epoch: u64) -> Nullifier {
    Nullifier(hash_fields(
        DOMAIN_NULLIFIER_EPOCH,
        &[
            secret.as_field(),
            commitment.as_field(),
            &Field::from_u64(epoch),
        ],
    ))
}

/// The scope-sentinel selector: global scheme for `Scope::GLOBAL`,
/// event-bound otherwise.
pub fn derive_for_scope(secret: &SecretKey, commitment: &Commitment, scope: Scope) -> Nullifier {
    if scope.is_global() {
        derive_global(secret, commitment)
    } else {
        derive_event(secret, scope)
    }
}

/// The blinded commitment output carried in statements:
/// `H(secret, commitment)` under its own domain.
pub fn blind_commitment(secret: &SecretKey, commitment: &Commitment) -> Field {
    hash_fields(
        DOMAIN_BLINDING,
        &[secret.as_field(), commitment.as_field()],
    )
}

/// Generate a fresh random holder secret.
pub fn random_secret() -> SecretKey {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    SecretKey(Field::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::commit;
    use proptest::prelude::*;

    fn fixture() -> (SecretKey, Commitment) {
        let secret = SecretKey(Field::from_u64(0xfeed));
        let commitment = commit(&[Field::from_u64(21)], &secret);
        (secret, commitment)
    }

    #[test]
    fn test_derivations_are_deterministic() {
        let (secret, commitment) = fixture();
        assert_eq!(
            derive_global(&secret, &commitment),
            derive_global(&secret, &commitment)
        );
        assert_eq!(
            derive_event(&secret, Scope(5)),
            derive_event(&secret, Scope(5))
        );
        assert_eq!(
            derive_epoch(&secret, &commitment, 12),
            derive_epoch(&secret, &commitment, 12)
        );
    }

    #[test]
    fn test_schemes_do_not_collide() {
        let (secret, commitment) = fixture();
        let global = derive_global(&secret, &commitment);
        let event = derive_event(&secret, Scope(5));
        let epoch = derive_epoch(&secret, &commitment, 5);
        assert_ne!(global, event);
        assert_ne!(global, epoch);
        assert_ne!(event, epoch);
    }

    #[test]
    fn test_scope_selector_matches_sentinel() {
        let (secret, commitment) = fixture();
        assert_eq!(
            derive_for_scope(&secret, &commitment, Scope::GLOBAL),
            derive_global(&secret, &commitment)
        );
        assert_eq!(
            derive_for_scope(&secret, &commitment, Scope(9)),
            derive_event(&secret, Scope(9))
        );
    }

    #[test]
    fn test_distinct_secrets_distinct_nullifiers() {
        let (_, commitment) = fixture();
        let a = SecretKey(Field::from_u64(1));
        let b = SecretKey(Field::from_u64(2));
        assert_ne!(derive_global(&a, &commitment), derive_global(&b, &commitment));
        assert_ne!(derive_event(&a, Scope(3)), derive_event(&b, Scope(3)));
    }

    #[test]
    fn test_blinding_differs_from_global_nullifier() {
        // Same inputs, different domains.
        let (secret, commitment) = fixture();
        assert_ne!(
            blind_commitment(&secret, &commitment).to_hex(),
            derive_global(&secret, &commitment).as_field().to_hex()
        );
    }

    #[test]
    fn test_random_secrets_are_distinct() {
        assert_ne!(random_secret(), random_secret());
    }

    proptest! {
        #[test]
        fn prop_distinct_scopes_distinct_nullifiers(
            secret_seed in any::<u64>(),
            a in 1..u64::MAX,
            b in 1..u64::MAX,
        ) {
            prop_assume!(a != b);
            let secret = SecretKey(Field::from_u64(secret_seed));
            prop_assert_ne!(
                derive_event(&secret, Scope(a)),
                derive_event(&secret, Scope(b))
            );
        }
    }
}
