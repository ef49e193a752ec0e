//! Line-of-sight trigger policy
//!
//! Fires only when the target is in range, inside the facing cone, and the
//! first obstruction along the ray (restricted to the configured collision
//! layers) is the target itself.

use crate::core::config::{TuningConfig, DEFAULT_TRIGGER_INTERVAL};
use crate::core::types::{EntityId, LayerMask, SlotIndex, Vec2};
use crate::skill::SkillUser;
use crate::trigger::timer::IntervalTimer;
use crate::trigger::SpatialQuery;

#[derive(Debug, Clone)]
pub struct LineOfSightTrigger {
    timer: IntervalTimer,
    range: f32,
    /// Full cone width in degrees; the angle test uses half of it.
    fov_degrees: f32,
    mask: LayerMask,
    target: Option<EntityId>,
}

impl LineOfSightTrigger {
    pub fn new(range: f32, fov_degrees: f32, mask: LayerMask) -> Self {
        Self::with_interval(range, fov_degrees, mask, DEFAULT_TRIGGER_INTERVAL)
    }

    /// Build with interval and field of view taken from the tuning config.
    pub fn from_tuning(range: f32, mask: LayerMask, tuning: &TuningConfig) -> Self {
        Self::with_interval(range, tuning.default_fov_degrees, mask, tuning.trigger_interval)
    }

    pub fn with_interval(range: f32, fov_degrees: f32, mask: LayerMask, interval: f32) -> Self {
        Self {
            timer: IntervalTimer::new(interval),
            range,
            fov_degrees,
            mask,
            target: None,
        }
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn bind_target(&mut self, target: EntityId) {
        self.target = Some(target);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Per-frame poll; requests slot 0 when the target is visible.
    pub fn poll(
        &mut self,
        dt: f32,
        self_pos: Vec2,
        facing: Vec2,
        spatial: &dyn SpatialQuery,
        user: &mut dyn SkillUser,
    ) -> bool {
        if !self.timer.tick(dt) {
            return false;
        }
        let Some(target) = self.target else {
            return false;
        };
        let Some(target_pos) = spatial.position_of(target) else {
            return false;
        };

        let distance = self_pos.distance(&target_pos);
        if distance > self.range {
            return false;
        }

        let to_target = target_pos - self_pos;
        if facing.angle_to(&to_target) > self.fov_degrees * 0.5 {
            return false;
        }

        // The ray must reach the target before any other obstruction on the
        // configured layers.
        match spatial.raycast(self_pos, to_target.normalize(), self.range, self.mask) {
            Some(hit) if hit.entity == target => {
                user.use_skill(SlotIndex::PRIMARY);
                true
            }
            Some(hit) => {
                tracing::debug!(target = ?target, blocker = ?hit.entity, "line of sight blocked");
                false
            }
            None => false,
        }
    }
}
