use std::cell::Cell;
use std::collections::BTreeMap;
use std::hash::BuildHasherDefault;

use hashbrown::HashMap as HbHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::hash::StateKey;
use crate::types::Player;

type FastHasher = BuildHasherDefault<ahash::AHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProofStatus {
    Win,
    Loss,
}

/// Proven outcome of a position: `status` holds for `player`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProofRecord {
    pub status: ProofStatus,
    pub player: Player,
}

impl ProofRecord {
    #[inline]
    pub const fn win(player: Player) -> Self {
        Self { status: ProofStatus::Win, player }
    }

    #[inline]
    pub const fn loss(player: Player) -> Self {
        Self { status: ProofStatus::Loss, player }
    }

    /// The player who wins under perfect play.
    #[inline]
    pub fn winner(&self) -> Player {
        match self.status {
            ProofStatus::Win => self.player,
            ProofStatus::Loss => self.player.other(),
        }
    }
}

/// Result of a write into a write-once table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Inserted,
    /// Key already held this exact record.
    Unchanged,
    /// Key already held a different record, which was kept.
    Conflict(ProofRecord),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub gets: u64,
    pub hits: u64,
    pub puts: u64,
    pub inserted: u64,
    pub conflicts: u64,
}

/// Proof cache keyed by canonical state key. Entries are write-once.
pub trait TranspositionTable {
    fn get(&self, key: StateKey) -> Option<ProofRecord>;
    fn put(&mut self, key: StateKey, record: ProofRecord) -> PutOutcome;
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hash map implementation; the only table the drivers use.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTT {
    map: HbHashMap<StateKey, ProofRecord, FastHasher>,
    stats: TTStats,
    // lookups go through `&self`
    gets: Cell<u64>,
    hits: Cell<u64>,
}

impl InMemoryTT {
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            map: HbHashMap::with_capacity_and_hasher(cap, FastHasher::default()),
            ..Self::default()
        }
    }

    /// Build from persisted entries. Stats start at zero.
    pub fn from_entries(entries: BTreeMap<StateKey, ProofRecord>) -> Self {
        let mut tt = Self::with_capacity(entries.len());
        tt.map.extend(entries);
        tt
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &ProofRecord)> {
        self.map.iter()
    }

    /// Sorted snapshot for deterministic persistence.
    pub fn to_sorted(&self) -> BTreeMap<StateKey, ProofRecord> {
        self.map.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Fold `other` in under the write-once rule. Returns the number of new keys.
    pub fn merge(&mut self, other: &InMemoryTT) -> usize {
        let mut added = 0usize;
        for (k, v) in other.iter() {
            if self.put(*k, *v) == PutOutcome::Inserted {
                added += 1;
            }
        }
        added
    }

    pub fn stats(&self) -> TTStats {
        TTStats {
            gets: self.gets.get(),
            hits: self.hits.get(),
            ..self.stats
        }
    }

    /// Fraction of lookups that found a record.
    pub fn hit_rate(&self) -> f64 {
        let gets = self.gets.get();
        if gets == 0 {
            0.0
        } else {
            self.hits.get() as f64 / gets as f64
        }
    }
}

impl TranspositionTable for InMemoryTT {
    #[inline]
    fn get(&self, key: StateKey) -> Option<ProofRecord> {
        self.gets.set(self.gets.get().saturating_add(1));
        let found = self.map.get(&key).copied();
        if found.is_some() {
            self.hits.set(self.hits.get().saturating_add(1));
        }
        found
    }

    fn put(&mut self, key: StateKey, record: ProofRecord) -> PutOutcome {
        self.stats.puts = self.stats.puts.saturating_add(1);
        match self.map.get(&key) {
            None => {
                self.map.insert(key, record);
                self.stats.inserted = self.stats.inserted.saturating_add(1);
                PutOutcome::Inserted
            }
            Some(old) if *old == record => PutOutcome::Unchanged,
            Some(old) => {
                let old = *old;
                self.stats.conflicts = self.stats.conflicts.saturating_add(1);
                warn!(key = %key, ?old, new = ?record, "conflicting proof for cached key; keeping the first record");
                PutOutcome::Conflict(old)
            }
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }
}
