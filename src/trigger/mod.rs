//! Autonomous trigger policies
//!
//! Triggers poll on a fixed interval, check a spatial condition, and on
//! success ask the owning controller to use slot 0. They never gate on
//! cooldown; usability belongs to the skill instance.

pub mod distance;
pub mod sight;
pub mod timer;

pub use distance::DistanceTrigger;
pub use sight::LineOfSightTrigger;
pub use timer::IntervalTimer;

use crate::core::types::{EntityId, LayerMask, Vec2};

/// Result of a raycast: the first entity struck along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: EntityId,
    pub distance: f32,
}

/// The external spatial/physics system, seen through a narrow seam.
pub trait SpatialQuery {
    /// Current position of a live entity, if the spatial system knows it.
    fn position_of(&self, entity: EntityId) -> Option<Vec2>;

    /// First hit along a ray, restricted to the given collision layers.
    fn raycast(&self, origin: Vec2, dir: Vec2, max_dist: f32, mask: LayerMask) -> Option<RayHit>;
}
