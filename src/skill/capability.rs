//! Capability trait state
//!
//! A skill instance composes any subset of these capabilities; behavior is
//! assembled by checking which states are present, not by subclassing.
//! The data-free markers (static, reuse, manual-end) live in
//! [`TraitMarkers`] as plain flags.

use serde::{Deserialize, Serialize};

use crate::core::config::MANUAL_END_SENTINEL;

/// Marker capabilities with presence/absence semantics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitMarkers {
    /// Instance is shared/singleton; never cloned per use.
    pub is_static: bool,
    /// The same instance is reused across casts; ending returns it to idle
    /// instead of spending it.
    pub reuse: bool,
    /// Termination comes from an explicit external call, not timer expiry.
    pub manual_end: bool,
}

/// Cooldown capability: the skill is unusable while `remaining > 0`.
///
/// The owning controller decrements `remaining` by calling [`tick`] each
/// frame; starting the skill reloads it to the full length.
///
/// [`tick`]: CooldownState::tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CooldownState {
    length: f32,
    remaining: f32,
}

impl CooldownState {
    /// A fresh cooldown starts ready; nothing has been cast yet.
    pub fn new(length: f32) -> Self {
        Self { length, remaining: 0.0 }
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn set_length(&mut self, length: f32) {
        self.length = length;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn set_remaining(&mut self, remaining: f32) {
        self.remaining = remaining;
    }

    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Reload the cooldown; called on every skill start.
    pub fn trigger(&mut self) {
        self.remaining = self.length;
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }
}

/// Duration capability: elapsed running time against a configured length.
///
/// Manual-end skills repurpose the length as an unbounded sentinel, so
/// `expired` never reports true for them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationState {
    length: f32,
    elapsed: f32,
}

impl DurationState {
    pub fn new(length: f32) -> Self {
        Self { length, elapsed: 0.0 }
    }

    /// Duration for a manual-end skill: effectively infinite.
    pub fn manual() -> Self {
        Self { length: MANUAL_END_SENTINEL, elapsed: 0.0 }
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn set_length(&mut self, length: f32) {
        self.length = length;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn set_elapsed(&mut self, elapsed: f32) {
        self.elapsed = elapsed;
    }

    pub fn is_manual(&self) -> bool {
        self.length.is_infinite()
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn expired(&self) -> bool {
        self.elapsed >= self.length
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Charge capability: time-accumulated wind-up with progress in [0, 1].
///
/// Each cast opens one charge cycle; [`finish`] reports true exactly once
/// per open cycle whether the charge completed or was interrupted, giving
/// the end-of-charge hook its exactly-once guarantee.
///
/// [`finish`]: ChargeState::finish
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeState {
    required: f32,
    elapsed: f32,
    cycle_open: bool,
}

impl ChargeState {
    pub fn new(required: f32) -> Self {
        Self { required: required.max(0.0), elapsed: 0.0, cycle_open: false }
    }

    pub fn required(&self) -> f32 {
        self.required
    }

    /// Open a new charge cycle, discarding any previous progress.
    pub fn begin(&mut self) {
        self.elapsed = 0.0;
        self.cycle_open = true;
    }

    pub fn is_charging(&self) -> bool {
        self.cycle_open
    }

    /// Accumulate charge time and return the clamped progress.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.cycle_open {
            self.elapsed += dt;
        }
        self.progress()
    }

    /// Progress in [0, 1]. A zero-time charge is complete immediately.
    pub fn progress(&self) -> f32 {
        if self.required <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.required).clamp(0.0, 1.0)
        }
    }

    pub fn complete(&self, epsilon: f32) -> bool {
        self.progress() >= 1.0 - epsilon
    }

    /// Close the cycle. True exactly once per opened cycle; later calls and
    /// calls with no open cycle report false.
    pub fn finish(&mut self) -> bool {
        if self.cycle_open {
            self.cycle_open = false;
            true
        } else {
            false
        }
    }
}
