//! Distance trigger policy
//!
//! Fires when the straight-line distance to the tracked target is within
//! range. The target reference resolves lazily; until it is bound (and its
//! position resolvable) the trigger stays silent.

use crate::core::config::DEFAULT_TRIGGER_INTERVAL;
use crate::core::types::{EntityId, SlotIndex, Vec2};
use crate::skill::SkillUser;
use crate::trigger::timer::IntervalTimer;
use crate::trigger::SpatialQuery;

#[derive(Debug, Clone)]
pub struct DistanceTrigger {
    timer: IntervalTimer,
    range: f32,
    target: Option<EntityId>,
}

impl DistanceTrigger {
    pub fn new(range: f32) -> Self {
        Self::with_interval(range, DEFAULT_TRIGGER_INTERVAL)
    }

    pub fn with_interval(range: f32, interval: f32) -> Self {
        Self {
            timer: IntervalTimer::new(interval),
            range,
            target: None,
        }
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Bind the tracked target once the spatial system has resolved it.
    pub fn bind_target(&mut self, target: EntityId) {
        self.target = Some(target);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Per-frame poll. On a satisfied condition, requests slot 0 from the
    /// owning controller; cooldown gating stays with the skill itself.
    /// Returns whether a use was requested.
    pub fn poll(
        &mut self,
        dt: f32,
        self_pos: Vec2,
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
            tracing::debug!(target = ?target, "distance trigger target has no position");
            return false;
        };
        if self_pos.distance(&target_pos) <= self.range {
            user.use_skill(SlotIndex::PRIMARY);
            true
        } else {
            false
        }
    }
}
