pub mod config;
pub mod error;
pub mod types;

pub use config::{TuningConfig, DEFAULT_TRIGGER_INTERVAL, MANUAL_END_SENTINEL};
pub use error::{Result, SkillError};
pub use types::{AbilityId, EntityId, LayerMask, SlotIndex, Vec2};
