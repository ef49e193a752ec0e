//! Stat snapshots for ability entities
//!
//! Each ability carries an independent snapshot of base stats, decoupled
//! from the external stat system's storage and modifier math. Unset stats
//! read as 0 so missing configuration degrades instead of failing.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Stat kinds an ability snapshot can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Health,
    Damage,
    Defense,
    MoveSpeed,
    AttackSpeed,
    Range,
    CostScale,
}

/// The external stat system, seen through a narrow seam.
pub trait StatProvider {
    /// Value for a stat kind; 0 for unknown/unset stats.
    fn stat_value(&self, kind: StatKind) -> f32;
}

/// An independent mapping of stat kind to base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    values: AHashMap<StatKind, f32>,
}

impl StatBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (StatKind, f32)>) -> Self {
        Self { values: pairs.into_iter().collect() }
    }

    pub fn set(&mut self, kind: StatKind, value: f32) {
        self.values.insert(kind, value);
    }

    /// Defined default of 0 for unset kinds.
    pub fn value(&self, kind: StatKind) -> f32 {
        self.values.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn is_set(&self, kind: StatKind) -> bool {
        self.values.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, f32)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

impl StatProvider for StatBlock {
    fn stat_value(&self, kind: StatKind) -> f32 {
        self.value(kind)
    }
}
