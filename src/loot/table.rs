//! Generic weighted loot table
//!
//! Cumulative-sum draw over an append-only entry list. The total weight is
//! maintained incrementally on insertion; the only full rescan happens at
//! construction from a pre-built item list.

use rand::Rng;

/// Anything that can sit in a weighted table.
///
/// Weights must be non-negative; a zero-weight item is legal but is never
/// drawn while any positive-weight entry exists.
pub trait Weighted {
    fn weight(&self) -> f32;
}

/// An entry with its weight captured at insertion time.
///
/// Capturing the weight keeps the incremental-total invariant intact even if
/// the item's own weight is mutated after insertion.
#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    weight: f64,
}

/// Weighted random selection table.
///
/// Invariant: `total` equals the sum of all entries' captured weights.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<Entry<T>>,
    total: f64,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self { entries: Vec::new(), total: 0.0 }
    }
}

impl<T: Weighted> WeightedTable<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new(), total: 0.0 }
    }

    /// Build a table from a pre-assembled item list, summing weights once.
    pub fn from_items(items: Vec<T>) -> Self {
        let mut table = Self::new();
        table.add_items(items);
        table
    }

    /// Append an item, incrementing the running total. O(1) amortized.
    ///
    /// Negative weights are clamped to zero with a warning; they would
    /// corrupt the cumulative scan.
    pub fn add_item(&mut self, item: T) {
        let raw = item.weight();
        let weight = if raw < 0.0 {
            tracing::warn!(weight = raw, "negative selection weight clamped to 0");
            0.0
        } else {
            f64::from(raw)
        };
        self.total += weight;
        self.entries.push(Entry { item, weight });
    }

    pub fn add_items(&mut self, items: Vec<T>) {
        for item in items {
            self.add_item(item);
        }
    }

    /// Draw one item with probability proportional to its weight.
    ///
    /// Returns `None` when the table is empty or carries no positive weight;
    /// callers treat that as "nothing available this round".
    pub fn get_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        if self.entries.is_empty() || self.total <= 0.0 {
            return None;
        }
        let roll = rng.gen_range(0.0..self.total);
        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.weight;
            if roll < cumulative {
                return Some(&entry.item);
            }
        }
        // Float accumulation can leave the roll a hair past the last
        // cumulative bound; the last positive-weight entry absorbs it.
        self.entries
            .iter()
            .rev()
            .find(|e| e.weight > 0.0)
            .map(|e| &e.item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.item)
    }
}

impl<T: Weighted + PartialEq> WeightedTable<T> {
    /// `weight(item) / totalWeight`; 0 for an item not in the table or when
    /// the table carries no weight.
    pub fn probability_of(&self, item: &T) -> f32 {
        if self.total <= 0.0 {
            return 0.0;
        }
        self.entries
            .iter()
            .find(|e| e.item == *item)
            .map(|e| (e.weight / self.total) as f32)
            .unwrap_or(0.0)
    }
}
