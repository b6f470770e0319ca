//! # Nullifier Ledger — Single-Use Enforcement
//!
//! The partitioned consumption map. A nullifier does not exist here
//! until its first successful consumption; once recorded for a
//! partition it is permanent, independent of every other partition.
//!
//! The check-and-set is one indivisible operation under a single mutex
//! acquisition: racing submissions of the same `(partition, nullifier)`
//! pair resolve to exactly one success.

use std::collections::HashSet;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use acv_core::{EngineError, EngineResult, Nullifier, Scope};

/// The ledger partition a nullifier is consumed under.
///
/// Mirrors the derivation-scheme selection: the global scheme feeds the
/// global partition, the event-bound scheme feeds its event's partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerPartition {
    /// Lifetime single-use partition.
    Global,
    /// Per-event partition.
    Event(u64),
}

impl LedgerPartition {
    /// The partition a scope selects — the same data-dependent selection
    /// the derivation schemes make on the scope sentinel.
    pub fn for_scope(scope: Scope) -> Self {
        if scope.is_global() {
            Self::Global
        } else {
            Self::Event(scope.0)
        }
    }
}

impl std::fmt::Display for LedgerPartition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Event(id) => write!(f, "event:{id}"),
        }
    }
}

/// The consumption map over `(partition, nullifier)` pairs.
#[derive(Debug, Default)]
pub struct NullifierLedger {
    consumed: Mutex<HashSet<(LedgerPartition, Nullifier)>>,
}

impl NullifierLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pair has been consumed.
    pub fn is_consumed(&self, partition: LedgerPartition, nullifier: &Nullifier) -> bool {
        self.consumed.lock().contains(&(partition, *nullifier))
    }

    /// Atomically check and mark the pair consumed.
    ///
    /// # Errors
    ///
    /// `StateConflict` if the pair was already consumed. Exactly one of
    /// any set of racing callers succeeds.
    pub fn consume(&self, partition: LedgerPartition, nullifier: Nullifier) -> EngineResult<()> {
        let mut consumed = self.consumed.lock();
        if !consumed.insert((partition, nullifier)) {
            return Err(EngineError::StateConflict(format!(
                "{nullifier} already consumed in {partition} partition"
            )));
        }
        Ok(())
    }

    /// Total consumed pairs across all partitions.
    pub fn consumed_count(&self) -> usize {
        self.consumed.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acv_core::{ErrorKind, Field};

    fn n(v: u64) -> Nullifier {
        Nullifier(Field::from_u64(v))
    }

    #[test]
    fn test_consume_once_then_conflict() {
        let ledger = NullifierLedger::new();
        ledger.consume(LedgerPartition::Global, n(1)).unwrap();
        let err = ledger.consume(LedgerPartition::Global, n(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StateConflict);
        assert!(ledger.is_consumed(LedgerPartition::Global, &n(1)));
    }

    #[test]
    fn test_partitions_are_isolated() {
        let ledger = NullifierLedger::new();
        ledger.consume(LedgerPartition::Global, n(1)).unwrap();
        ledger.consume(LedgerPartition::Event(7), n(1)).unwrap();
        ledger.consume(LedgerPartition::Event(8), n(1)).unwrap();
        assert_eq!(ledger.consumed_count(), 3);
        assert!(ledger.consume(LedgerPartition::Event(7), n(1)).is_err());
    }

    #[test]
    fn test_partition_selection_matches_scope_sentinel() {
        assert_eq!(
            LedgerPartition::for_scope(Scope::GLOBAL),
            LedgerPartition::Global
        );
        assert_eq!(
            LedgerPartition::for_scope(Scope(42)),
            LedgerPartition::Event(42)
        );
    }

    #[test]
    fn test_racing_consumers_yield_one_success() {
        use std::sync::Arc;

        let ledger = Arc::new(NullifierLedger::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let ledger = Arc::clone(&ledger);
            handles.push(std::thread::spawn(move || {
                ledger.consume(LedgerPartition::Global, n(5)).is_ok()
            }));
        }
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(ledger.consumed_count(), 1);
    }
}
