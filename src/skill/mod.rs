//! Skill instances: capability composition and lifecycle
//!
//! A skill instance composes orthogonal capabilities (cooldown, duration,
//! charge, plus the static/reuse/manual-end markers) and is driven through
//! awake/start/update/end by its owning controller.

pub mod capability;
pub mod lifecycle;

pub use capability::{ChargeState, CooldownState, DurationState, TraitMarkers};
pub use lifecycle::{
    AnimationQueue, CastContext, EndOutcome, LaunchApplier, Modifier, SkillPhase, SkillRuntime,
    SkillTick, SkillUser,
};
