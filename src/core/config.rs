//! Tuning configuration with documented constants
//!
//! All magic numbers used by the skill core are collected here with
//! explanations of their purpose and how they interact with each other.

/// Sentinel duration for manual-end skills.
///
/// Manual-end skills repurpose the duration trait as "runs until an external
/// caller ends it". Elapsed time never reaches this value, so the duration
/// expiry path in `SkillRuntime::update` can stay uniform instead of
/// special-casing the marker.
pub const MANUAL_END_SENTINEL: f32 = f32::INFINITY;

/// Default polling interval for autonomous triggers (seconds).
///
/// Triggers check their condition once per interval rather than every tick,
/// bounding the per-frame cost of distance and raycast checks. Lower values
/// make bosses more reactive; higher values make spatial queries cheaper.
pub const DEFAULT_TRIGGER_INTERVAL: f32 = 0.2;

/// Tuning knobs for the skill core
///
/// These values have been tuned to produce responsive boss behavior without
/// spamming spatial queries. Changing them affects encounter pacing.
#[derive(Debug, Clone)]
pub struct TuningConfig {
    /// Seconds between autonomous trigger condition checks
    ///
    /// See [`DEFAULT_TRIGGER_INTERVAL`]. Applied when a trigger is built
    /// without an explicit interval.
    pub trigger_interval: f32,

    /// Default field of view for line-of-sight triggers (degrees, full cone)
    ///
    /// The trigger compares the angle between facing and the to-target
    /// direction against half this value. 120 degrees approximates a
    /// humanoid's useful forward vision.
    pub default_fov_degrees: f32,

    /// Tolerance when comparing charge progress against completion
    ///
    /// Charge elapsed time is accumulated from float tick deltas; progress
    /// within this epsilon of 1.0 counts as a completed charge.
    pub charge_epsilon: f32,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            trigger_interval: DEFAULT_TRIGGER_INTERVAL,
            default_fov_degrees: 120.0,
            charge_epsilon: 1e-4,
        }
    }
}
