//! Weighted-random selection engine
//!
//! A generic loot-table: append weighted entries, draw with probability
//! proportional to weight. Used by the ability roster to pick which ability
//! a boss casts next.

pub mod table;

pub use table::{Weighted, WeightedTable};
