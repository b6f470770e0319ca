//! # acv CLI Entry Point
//!
//! Holder-side derivation helpers and a self-contained demo of the
//! verification flow against the mock oracle.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use acv_core::{ActorId, EventLog, Field, PredicateKind, Role, Scope, SecretKey};
use acv_crypto::{
    blind_commitment, commit, derive_for_scope, random_secret, MerkleTree, SparseTree,
};
use acv_gateway::{ProofGateway, ProofStatement, RequiredPredicate};
use acv_registry::CredentialRegistry;
use acv_zkp::{MockOracle, MockProvingKey, MockVerifyingKey, ProofOracle};

/// ACV Stack CLI — anonymous credential verification toolchain.
///
/// Derives commitments and nullifiers for holders and runs a full
/// registration/verification/revocation demo against the mock oracle.
#[derive(Parser, Debug)]
#[command(name = "acv", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Compute a credential commitment from attributes and a secret.
    Commit(CommitArgs),
    /// Derive the nullifier for a secret under a scope.
    Derive(DeriveArgs),
    /// Run the end-to-end demo flow and print the event log.
    Demo,
}

#[derive(clap::Args, Debug)]
struct CommitArgs {
    /// Attribute values (small integers, e.g. age or a country code).
    #[arg(required = true)]
    attributes: Vec<u64>,
    /// Holder secret as 64 hex chars; generated when omitted.
    #[arg(long)]
    secret: Option<String>,
}

#[derive(clap::Args, Debug)]
struct DeriveArgs {
    /// Holder secret as 64 hex chars.
    #[arg(long)]
    secret: String,
    /// Credential commitment as 64 hex chars.
    #[arg(long)]
    commitment: String,
    /// Scope: 0 for global, any other value for an event.
    #[arg(long, default_value_t = 0)]
    scope: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Commit(args) => run_commit(args),
        Commands::Derive(args) => run_derive(args),
        Commands::Demo => run_demo(),
    }
}

fn parse_secret(hex: &str) -> anyhow::Result<SecretKey> {
    let field = Field::from_hex(hex).context("secret must be 64 hex chars")?;
    Ok(SecretKey(field))
}

fn run_commit(args: CommitArgs) -> anyhow::Result<()> {
    let secret = match &args.secret {
        Some(hex) => parse_secret(hex)?,
        None => {
            let secret = random_secret();
            println!("secret: {}", secret.as_field().to_hex());
            secret
        }
    };
    let attributes: Vec<Field> = args.attributes.iter().map(|v| Field::from_u64(*v)).collect();
    let commitment = commit(&attributes, &secret);
    println!("commitment: {}", commitment.as_field().to_hex());
    Ok(())
}

fn run_derive(args: DeriveArgs) -> anyhow::Result<()> {
    let secret = parse_secret(&args.secret)?;
    let commitment = acv_core::Commitment(
        Field::from_hex(&args.commitment).context("commitment must be 64 hex chars")?,
    );
    let scope = Scope(args.scope);
    let nullifier = derive_for_scope(&secret, &commitment, scope);
    println!("scope: {scope}");
    println!("nullifier: {}", nullifier.as_field().to_hex());
    Ok(())
}

fn run_demo() -> anyhow::Result<()> {
    let events = Arc::new(EventLog::new());
    let owner = ActorId::new();
    let issuer = ActorId::new();
    let relying_party = ActorId::new();

    tracing::info!(%owner, %issuer, "assembling demo deployment");
    let registry = Arc::new(CredentialRegistry::new(owner, Arc::clone(&events)));
    registry
        .grant_role(&owner, Role::Issuer, issuer)
        .context("granting issuer role")?;
    let gateway = ProofGateway::new(
        Arc::clone(&registry),
        MockOracle,
        MockVerifyingKey,
        Arc::clone(&events),
    );

    // Holder creates a credential; issuer registers it.
    let secret = random_secret();
    let commitment = commit(&[Field::from_u64(21), Field::from_u64(840)], &secret);
    registry
        .register(&issuer, commitment)
        .context("registering commitment")?;

    // Off-band tree builder derives roots and advances the registry.
    let mut registry_tree = MerkleTree::registry();
    registry_tree
        .append(*commitment.as_field())
        .context("appending to registry tree")?;
    let revocation_tree = SparseTree::revocation();
    registry
        .advance_roots(&issuer, registry_tree.root(), revocation_tree.root())
        .context("advancing roots")?;
    let roots = registry.get_roots();

    // Holder builds a global-scope age statement and mock proof.
    let statement = ProofStatement {
        registry_root: roots.registry_root,
        revocation_root: roots.revocation_root,
        scope: Scope::GLOBAL,
        nullifier: derive_for_scope(&secret, &commitment, Scope::GLOBAL),
        blinded_commitment: blind_commitment(&secret, &commitment),
        predicate: PredicateKind::AgeOver,
        outputs: vec![Field::from_u64(21)],
    };
    let proof = MockOracle
        .prove(&MockProvingKey, &statement.to_public_inputs(), b"")
        .map_err(|e| anyhow::anyhow!("mock prover failed: {e}"))?;
    let policy = RequiredPredicate::AgeOver { min_age: 18 };

    let receipt = gateway
        .verify_and_consume(&relying_party, Scope::GLOBAL, &policy, &statement, &proof)
        .map_err(|e| anyhow::anyhow!("verification failed: {e}"))?;
    println!("verified: {} under {}", receipt.nullifier, receipt.partition);

    // The replay is rejected.
    match gateway.verify_and_consume(&relying_party, Scope::GLOBAL, &policy, &statement, &proof) {
        Err(err) => println!("replay rejected: {err}"),
        Ok(_) => anyhow::bail!("replay unexpectedly succeeded"),
    }

    // Issuer revokes; the statement goes stale with the next advance.
    registry
        .revoke(&issuer, commitment)
        .context("revoking commitment")?;
    let mut revocation_tree = revocation_tree;
    revocation_tree
        .insert(*commitment.as_field(), Field::from_u64(1))
        .context("inserting revocation")?;
    registry
        .advance_roots(&issuer, registry_tree.root(), revocation_tree.root())
        .context("advancing roots after revocation")?;
    match gateway.verify_only(Scope::GLOBAL, &policy, &statement, &proof) {
        Err(err) => println!("stale statement rejected: {err}"),
        Ok(()) => anyhow::bail!("stale statement unexpectedly accepted"),
    }

    println!("event log:");
    for event in events.snapshot() {
        println!("  {}", serde_json::to_string(&event)?);
    }
    Ok(())
}
