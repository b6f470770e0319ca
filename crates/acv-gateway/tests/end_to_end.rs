//! Full protocol walk: issuance, off-band tree building, proof
//! verification, replay rejection, revocation, and the revocation
//! absence check flipping after the roots advance.

use std::sync::Arc;

use acv_core::{ActorId, ErrorKind, EventLog, Field, PredicateKind, Role, Scope};
use acv_crypto::{
    blind_commitment, commit, derive_for_scope, leaf_hash, random_secret, verify_inclusion,
    verify_non_inclusion, MerkleTree, SparseTree,
};
use acv_gateway::{ProofGateway, ProofStatement, RequiredPredicate};
use acv_registry::CredentialRegistry;
use acv_zkp::{MockOracle, MockProof, MockProvingKey, MockVerifyingKey, ProofOracle};

struct Deployment {
    registry: Arc<CredentialRegistry>,
    gateway: ProofGateway<MockOracle>,
    events: Arc<EventLog>,
    issuer: ActorId,
    relying_party: ActorId,
}

fn deploy() -> Deployment {
    let events = Arc::new(EventLog::new());
    let owner = ActorId::new();
    let issuer = ActorId::new();
    let registry = Arc::new(CredentialRegistry::new(owner, Arc::clone(&events)));
    registry.grant_role(&owner, Role::Issuer, issuer).unwrap();
    let gateway = ProofGateway::new(
        Arc::clone(&registry),
        MockOracle,
        MockVerifyingKey,
        Arc::clone(&events),
    );
    Deployment {
        registry,
        gateway,
        events,
        issuer,
        relying_party: ActorId::new(),
    }
}

fn prove(statement: &ProofStatement) -> MockProof {
    MockOracle
        .prove(&MockProvingKey, &statement.to_public_inputs(), b"")
        .unwrap()
}

#[test]
fn full_credential_lifecycle() {
    let d = deploy();

    // Holder creates a credential off-band; issuer registers it.
    let secret = random_secret();
    let c1 = commit(&[Field::from_u64(21), Field::from_u64(840)], &secret);
    d.registry.register(&d.issuer, c1).unwrap();
    assert!(d.registry.query_valid(&c1));

    // Off-band builder derives the trees and advances the roots.
    let mut registry_tree = MerkleTree::registry();
    let leaf_index = registry_tree.append(*c1.as_field()).unwrap();
    let mut revocation_tree = SparseTree::revocation();
    d.registry
        .advance_roots(&d.issuer, registry_tree.root(), revocation_tree.root())
        .unwrap();
    let roots = d.registry.get_roots();

    // The holder's membership witness verifies against the live root,
    // and the revocation absence check passes.
    let membership = registry_tree.prove(leaf_index).unwrap();
    assert!(verify_inclusion(
        &leaf_hash(c1.as_field()),
        &membership,
        &roots.registry_root
    ));
    let absence = revocation_tree.slot_witness(c1.as_field());
    assert!(verify_non_inclusion(
        c1.as_field(),
        &absence,
        &roots.revocation_root
    ));

    // Holder constructs a global-scope statement and proof off-band.
    let nullifier = derive_for_scope(&secret, &c1, Scope::GLOBAL);
    let statement = ProofStatement {
        registry_root: roots.registry_root,
        revocation_root: roots.revocation_root,
        scope: Scope::GLOBAL,
        nullifier,
        blinded_commitment: blind_commitment(&secret, &c1),
        predicate: PredicateKind::AgeOver,
        outputs: vec![Field::from_u64(21)],
    };
    let proof = prove(&statement);
    let policy = RequiredPredicate::AgeOver { min_age: 18 };

    // First verification succeeds and emits ProofVerified.
    let receipt = d
        .gateway
        .verify_and_consume(&d.relying_party, Scope::GLOBAL, &policy, &statement, &proof)
        .unwrap();
    assert_eq!(receipt.nullifier, nullifier);
    let classes: Vec<&str> = d.events.snapshot().iter().map(|e| e.class()).collect();
    assert!(classes.contains(&"ProofVerified"));

    // The identical statement replays as a state conflict.
    let err = d
        .gateway
        .verify_and_consume(&d.relying_party, Scope::GLOBAL, &policy, &statement, &proof)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StateConflict);

    // Issuer revokes; the off-band builder folds the revocation in and
    // advances the roots again.
    d.registry.revoke(&d.issuer, c1).unwrap();
    assert!(!d.registry.query_valid(&c1));
    revocation_tree
        .insert(*c1.as_field(), Field::from_u64(1))
        .unwrap();
    d.registry
        .advance_roots(&d.issuer, registry_tree.root(), revocation_tree.root())
        .unwrap();
    let new_roots = d.registry.get_roots();

    // The commitment is now present in the revocation set: its slot
    // witness no longer proves absence.
    let witness = revocation_tree.slot_witness(c1.as_field());
    assert!(!verify_non_inclusion(
        c1.as_field(),
        &witness,
        &new_roots.revocation_root
    ));

    // And the pre-revocation statement is stale against the new roots.
    let err = d
        .gateway
        .verify_only(Scope::GLOBAL, &policy, &statement, &proof)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Freshness);
}

#[test]
fn event_scopes_consume_independently_of_global() {
    let d = deploy();
    let secret = random_secret();
    let c1 = commit(&[Field::from_u64(30)], &secret);
    d.registry.register(&d.issuer, c1).unwrap();

    let mut tree = MerkleTree::registry();
    tree.append(*c1.as_field()).unwrap();
    d.registry
        .advance_roots(&d.issuer, tree.root(), SparseTree::revocation().root())
        .unwrap();
    let roots = d.registry.get_roots();
    let policy = RequiredPredicate::AgeOver { min_age: 21 };

    // Global use, then two distinct events: three independent
    // consumptions from the same secret.
    for scope in [Scope::GLOBAL, Scope(101), Scope(102)] {
        let statement = ProofStatement {
            registry_root: roots.registry_root,
            revocation_root: roots.revocation_root,
            scope,
            nullifier: derive_for_scope(&secret, &c1, scope),
            blinded_commitment: blind_commitment(&secret, &c1),
            predicate: PredicateKind::AgeOver,
            outputs: vec![Field::from_u64(30)],
        };
        let proof = prove(&statement);
        d.gateway
            .verify_and_consume(&d.relying_party, scope, &policy, &statement, &proof)
            .unwrap();

        // Each scope locks out only itself.
        let err = d
            .gateway
            .verify_and_consume(&d.relying_party, scope, &policy, &statement, &proof)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StateConflict);
    }
    assert_eq!(d.gateway.ledger().consumed_count(), 3);
}

#[test]
fn relying_party_composes_multiple_predicates() {
    let d = deploy();
    let secret = random_secret();
    let c1 = commit(&[Field::from_u64(25), Field::from_u64(840)], &secret);
    d.registry.register(&d.issuer, c1).unwrap();
    let mut tree = MerkleTree::registry();
    tree.append(*c1.as_field()).unwrap();
    d.registry
        .advance_roots(&d.issuer, tree.root(), SparseTree::revocation().root())
        .unwrap();
    let roots = d.registry.get_roots();

    // A policy of two predicates is two gateway calls under distinct
    // event scopes, one per requirement.
    let checks: [(Scope, PredicateKind, Vec<Field>, RequiredPredicate); 2] = [
        (
            Scope(7),
            PredicateKind::AgeOver,
            vec![Field::from_u64(25)],
            RequiredPredicate::AgeOver { min_age: 21 },
        ),
        (
            Scope(8),
            PredicateKind::SanctionsClear,
            vec![],
            RequiredPredicate::SanctionsClear,
        ),
    ];
    for (scope, predicate, outputs, policy) in checks {
        let statement = ProofStatement {
            registry_root: roots.registry_root,
            revocation_root: roots.revocation_root,
            scope,
            nullifier: derive_for_scope(&secret, &c1, scope),
            blinded_commitment: blind_commitment(&secret, &c1),
            predicate,
            outputs,
        };
        let proof = prove(&statement);
        d.gateway
            .verify_and_consume(&d.relying_party, scope, &policy, &statement, &proof)
            .unwrap();
    }
    assert_eq!(d.gateway.ledger().consumed_count(), 2);
}
