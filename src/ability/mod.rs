//! Boss abilities: weighted, stat-bearing skill entities
//!
//! Prototypes are built from loader definitions, selected through the loot
//! table, and resolved to per-user runtime instances (or one shared
//! instance for static abilities).

pub mod boss;
pub mod roster;
pub mod stats;

pub use boss::{AbilityDef, BossAbility};
pub use roster::AbilityRoster;
pub use stats::{StatBlock, StatKind, StatProvider};
