//! Skill identity and lifecycle state machine
//!
//! `Unawakened -> Awakened -> Idle -> Running -> Ended`. The owning
//! controller drives instances through awake/start/update/end once per
//! frame; out-of-order calls are corrected or absorbed with a logged
//! warning rather than failed, because this code runs inside the shared
//! per-frame loop.
//!
//! Lifecycle results are returned as values ([`SkillTick`], [`EndOutcome`])
//! for the controller to act on, the same way the simulation tick reports
//! events to its caller instead of calling back into it.

use serde::{Deserialize, Serialize};

use crate::core::types::{AbilityId, EntityId, SlotIndex};
use crate::skill::capability::{ChargeState, CooldownState, DurationState, TraitMarkers};

/// Lifecycle phase of a skill instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillPhase {
    Unawakened,
    Awakened,
    Idle,
    Running,
    Ended,
}

/// The external controller that owns skill slots.
///
/// Autonomous triggers request casts through this seam; the controller
/// resolves the roster, acquires an instance, and drives its lifecycle.
pub trait SkillUser {
    fn use_skill(&mut self, slot: SlotIndex);
}

/// Physics/launch collaborator invoked as a side effect of starting a skill.
pub trait LaunchApplier {
    fn apply_launch(&mut self, owner: EntityId);
}

/// Animation collaborator; queued triggers are consumed externally.
pub trait AnimationQueue {
    fn queue_trigger(&mut self, owner: EntityId, trigger: &str);
}

/// Side-effect collaborators handed to `start`. Either seam may be absent
/// (headless simulation, tests).
#[derive(Default)]
pub struct CastContext<'a> {
    pub launcher: Option<&'a mut dyn LaunchApplier>,
    pub animations: Option<&'a mut dyn AnimationQueue>,
}

impl CastContext<'_> {
    /// A context with no collaborators attached.
    pub fn none() -> CastContext<'static> {
        CastContext { launcher: None, animations: None }
    }
}

/// What happened during one `update` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillTick {
    /// The skill is not running; the call was a no-op.
    Inactive,
    /// Still running. Charge-capable skills report their progress in [0, 1].
    Running { charge_progress: Option<f32> },
    /// A timed duration elapsed; the controller should call `end`.
    Expired,
}

/// What happened during one `end` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndOutcome {
    /// Phase after the call: `Idle` for reusable skills, `Ended` for
    /// one-shots, unchanged for absorbed redundant calls.
    pub phase: SkillPhase,
    /// True exactly once per charge cycle, on the call that closed it.
    pub charge_ended: bool,
}

/// An ordered, opaque adjustment attached to a skill instance. Insertion
/// order is significant for stacking; the stat system interprets these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub key: String,
    pub magnitude: f32,
}

/// One runtime occurrence of an ability: identity, capability state, and
/// the lifecycle state machine.
#[derive(Debug, Clone)]
pub struct SkillRuntime {
    name: String,
    instance: EntityId,
    slot: SlotIndex,
    owner: Option<EntityId>,
    /// Back-reference to the prototype definition, at most one level deep.
    root: Option<AbilityId>,
    modifiers: Vec<Modifier>,
    phase: SkillPhase,
    has_awoken: bool,
    markers: TraitMarkers,
    pub cooldown: Option<CooldownState>,
    pub duration: Option<DurationState>,
    pub charge: Option<ChargeState>,
}

impl SkillRuntime {
    pub fn new(name: impl Into<String>, slot: SlotIndex, markers: TraitMarkers) -> Self {
        let duration = markers.manual_end.then(DurationState::manual);
        Self {
            name: name.into(),
            instance: EntityId::new(),
            slot,
            owner: None,
            root: None,
            modifiers: Vec::new(),
            phase: SkillPhase::Unawakened,
            has_awoken: false,
            markers,
            cooldown: None,
            duration,
            charge: None,
        }
    }

    pub fn with_cooldown(mut self, length: f32) -> Self {
        self.cooldown = Some(CooldownState::new(length));
        self
    }

    /// Attach a timed duration. Manual-end skills keep their unbounded
    /// sentinel; the requested length is ignored.
    pub fn with_duration(mut self, length: f32) -> Self {
        if self.markers.manual_end {
            tracing::debug!(skill = %self.name, "manual-end skill ignores timed duration");
        } else {
            self.duration = Some(DurationState::new(length));
        }
        self
    }

    pub fn with_charge(mut self, required: f32) -> Self {
        self.charge = Some(ChargeState::new(required));
        self
    }

    pub fn with_owner(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_root(mut self, root: AbilityId) -> Self {
        self.root = Some(root);
        self
    }

    // --- identity -----------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instance(&self) -> EntityId {
        self.instance
    }

    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    pub fn set_slot(&mut self, slot: SlotIndex) {
        self.slot = slot;
    }

    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    pub fn set_owner(&mut self, owner: EntityId) {
        self.owner = Some(owner);
    }

    pub fn root(&self) -> Option<AbilityId> {
        self.root
    }

    pub fn phase(&self) -> SkillPhase {
        self.phase
    }

    pub fn has_awoken(&self) -> bool {
        self.has_awoken
    }

    pub fn markers(&self) -> TraitMarkers {
        self.markers
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn add_modifier(&mut self, modifier: Modifier) {
        self.modifiers.push(modifier);
    }

    /// Value-independent copy with a fresh instance id and reset lifecycle.
    /// The copy points its root at `root_id`, or inherits an existing root
    /// so the chain never exceeds one level.
    pub fn fresh_instance(&self, root_id: AbilityId, owner: Option<EntityId>) -> Self {
        let mut copy = self.clone();
        copy.instance = EntityId::new();
        copy.owner = owner;
        copy.root = Some(self.root.unwrap_or(root_id));
        copy.phase = SkillPhase::Unawakened;
        copy.has_awoken = false;
        copy
    }

    // --- lifecycle ----------------------------------------------------

    /// `Unawakened -> Awakened`, exactly once. Repeat calls are a no-op.
    pub fn awake(&mut self) {
        if self.has_awoken {
            tracing::debug!(skill = %self.name, "awake called twice; ignoring");
            return;
        }
        self.has_awoken = true;
        if self.phase == SkillPhase::Unawakened {
            self.phase = SkillPhase::Awakened;
        }
    }

    /// `Awakened/Idle -> Running`. Auto-awakens (with a warning) when called
    /// out of order. Re-triggers cooldown, resets duration, and opens a new
    /// charge cycle so repeated start/end cycles leak no trait state.
    pub fn start(&mut self, fx: &mut CastContext) {
        if !self.has_awoken {
            tracing::warn!(skill = %self.name, "start before awake; auto-awakening");
            self.awake();
        }
        match self.phase {
            SkillPhase::Running if !self.markers.reuse => {
                tracing::warn!(skill = %self.name, "start while running; ignoring");
                return;
            }
            SkillPhase::Ended => {
                tracing::warn!(skill = %self.name, "start on a spent one-shot; ignoring");
                return;
            }
            _ => {}
        }

        if let Some(cd) = self.cooldown.as_mut() {
            cd.trigger();
        }
        if let Some(d) = self.duration.as_mut() {
            d.reset();
        }
        if let Some(c) = self.charge.as_mut() {
            c.begin();
        }
        self.phase = SkillPhase::Running;

        if let Some(owner) = self.owner {
            if let Some(launcher) = fx.launcher.as_mut() {
                launcher.apply_launch(owner);
            }
            if let Some(animations) = fx.animations.as_mut() {
                animations.queue_trigger(owner, &self.name);
            }
        }
    }

    /// Per-frame tick while running; a no-op in any other phase.
    pub fn update(&mut self, dt: f32) -> SkillTick {
        if self.phase != SkillPhase::Running {
            return SkillTick::Inactive;
        }
        let charge_progress = self.charge.as_mut().map(|c| c.advance(dt));
        if let Some(d) = self.duration.as_mut() {
            d.advance(dt);
            if d.expired() {
                return SkillTick::Expired;
            }
        }
        SkillTick::Running { charge_progress }
    }

    /// `Running -> Idle` (reusable) or `Running -> Ended` (one-shot).
    /// Idempotent: redundant calls are absorbed and release nothing twice.
    pub fn end(&mut self) -> EndOutcome {
        if self.phase != SkillPhase::Running {
            tracing::debug!(skill = %self.name, phase = ?self.phase, "redundant end absorbed");
            return EndOutcome { phase: self.phase, charge_ended: false };
        }
        let charge_ended = self.charge.as_mut().map(ChargeState::finish).unwrap_or(false);
        self.phase = if self.markers.reuse { SkillPhase::Idle } else { SkillPhase::Ended };
        EndOutcome { phase: self.phase, charge_ended }
    }

    /// False while the cooldown is loaded, while running without the reuse
    /// marker, or once a one-shot is spent.
    pub fn is_usable(&self) -> bool {
        if let Some(cd) = &self.cooldown {
            if !cd.ready() {
                return false;
            }
        }
        match self.phase {
            SkillPhase::Running => self.markers.reuse,
            SkillPhase::Ended => false,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime(markers: TraitMarkers) -> SkillRuntime {
        SkillRuntime::new("test_skill", SlotIndex::PRIMARY, markers)
    }

    #[test]
    fn test_awake_exactly_once() {
        let mut s = runtime(TraitMarkers::default());
        assert!(!s.has_awoken());
        s.awake();
        assert!(s.has_awoken());
        assert_eq!(s.phase(), SkillPhase::Awakened);
        s.awake();
        assert!(s.has_awoken());
        assert_eq!(s.phase(), SkillPhase::Awakened);
    }

    #[test]
    fn test_start_before_awake_auto_corrects() {
        let mut s = runtime(TraitMarkers::default());
        s.start(&mut CastContext::none());
        assert!(s.has_awoken());
        assert_eq!(s.phase(), SkillPhase::Running);
    }

    #[test]
    fn test_cooldown_gates_usability() {
        let mut s = runtime(TraitMarkers::default()).with_cooldown(4.0);
        s.awake();
        assert!(s.is_usable());
        s.start(&mut CastContext::none());
        assert!(!s.is_usable());
        s.end();
        assert!(!s.is_usable(), "cooldown still loaded after end");
        s.cooldown.as_mut().unwrap().tick(4.0);
        // One-shot skills stay spent even off cooldown.
        assert!(!s.is_usable());
    }

    #[test]
    fn test_reusable_cooldown_cycle() {
        let markers = TraitMarkers { reuse: true, ..Default::default() };
        let mut s = runtime(markers).with_cooldown(2.0);
        s.awake();
        s.start(&mut CastContext::none());
        assert_eq!(s.end().phase, SkillPhase::Idle);
        assert!(!s.is_usable());
        s.cooldown.as_mut().unwrap().tick(2.0);
        assert!(s.is_usable());
        // Recast resets the cooldown without a fresh awake.
        s.start(&mut CastContext::none());
        assert_eq!(s.phase(), SkillPhase::Running);
        assert!(!s.cooldown.unwrap().ready());
    }

    #[test]
    fn test_update_noop_outside_running() {
        let mut s = runtime(TraitMarkers::default()).with_duration(1.0);
        assert_eq!(s.update(0.5), SkillTick::Inactive);
        s.awake();
        assert_eq!(s.update(0.5), SkillTick::Inactive);
        assert_eq!(s.duration.unwrap().elapsed(), 0.0);
    }

    #[test]
    fn test_duration_expiry() {
        let mut s = runtime(TraitMarkers::default()).with_duration(1.0);
        s.awake();
        s.start(&mut CastContext::none());
        assert!(matches!(s.update(0.6), SkillTick::Running { .. }));
        assert_eq!(s.update(0.6), SkillTick::Expired);
    }

    #[test]
    fn test_manual_end_never_expires() {
        let markers = TraitMarkers { manual_end: true, ..Default::default() };
        let mut s = runtime(markers);
        s.awake();
        s.start(&mut CastContext::none());
        for _ in 0..1000 {
            assert!(matches!(s.update(10.0), SkillTick::Running { .. }));
        }
        s.end();
        assert_eq!(s.phase(), SkillPhase::Ended);
    }

    #[test]
    fn test_end_idempotent_charge_hook_once() {
        let mut s = runtime(TraitMarkers::default()).with_charge(2.0);
        s.awake();
        s.start(&mut CastContext::none());
        s.update(0.5);
        assert!(s.end().charge_ended);
        assert!(!s.end().charge_ended);
        assert!(!s.end().charge_ended);
    }

    #[test]
    fn test_charge_progress_reported() {
        let mut s = runtime(TraitMarkers::default()).with_charge(2.0);
        s.awake();
        s.start(&mut CastContext::none());
        match s.update(1.0) {
            SkillTick::Running { charge_progress: Some(p) } => {
                assert!((p - 0.5).abs() < 1e-5)
            }
            other => panic!("unexpected tick: {other:?}"),
        }
    }

    #[test]
    fn test_start_on_spent_one_shot_ignored() {
        let mut s = runtime(TraitMarkers::default());
        s.awake();
        s.start(&mut CastContext::none());
        s.end();
        s.start(&mut CastContext::none());
        assert_eq!(s.phase(), SkillPhase::Ended);
    }

    #[test]
    fn test_recast_leaks_no_charge_state() {
        let markers = TraitMarkers { reuse: true, ..Default::default() };
        let mut s = runtime(markers).with_charge(1.0);
        s.awake();
        for _ in 0..3 {
            s.start(&mut CastContext::none());
            s.update(0.4);
            assert!(s.end().charge_ended, "each cycle closes exactly once");
        }
    }

    struct RecordingFx {
        launches: Vec<EntityId>,
        triggers: Vec<String>,
    }

    impl LaunchApplier for RecordingFx {
        fn apply_launch(&mut self, owner: EntityId) {
            self.launches.push(owner);
        }
    }

    impl AnimationQueue for RecordingFx {
        fn queue_trigger(&mut self, _owner: EntityId, trigger: &str) {
            self.triggers.push(trigger.to_string());
        }
    }

    #[test]
    fn test_start_side_effects() {
        let owner = EntityId::new();
        let mut s = runtime(TraitMarkers::default()).with_owner(owner);
        s.awake();
        let mut launch = RecordingFx { launches: vec![], triggers: vec![] };
        let mut anim = RecordingFx { launches: vec![], triggers: vec![] };
        let mut fx = CastContext {
            launcher: Some(&mut launch),
            animations: Some(&mut anim),
        };
        s.start(&mut fx);
        assert_eq!(launch.launches, vec![owner]);
        assert_eq!(anim.triggers, vec!["test_skill".to_string()]);
    }

    #[test]
    fn test_fresh_instance_is_independent() {
        let proto = runtime(TraitMarkers::default()).with_cooldown(3.0);
        let root = AbilityId(9);
        let owner = EntityId::new();
        let mut inst = proto.fresh_instance(root, Some(owner));
        assert_ne!(inst.instance(), proto.instance());
        assert_eq!(inst.root(), Some(root));
        assert_eq!(inst.owner(), Some(owner));
        inst.cooldown.as_mut().unwrap().set_remaining(2.0);
        assert_eq!(proto.cooldown.unwrap().remaining(), 0.0);
    }

    #[test]
    fn test_modifiers_keep_insertion_order() {
        let mut s = runtime(TraitMarkers::default());
        s.add_modifier(Modifier { key: "burn".into(), magnitude: 1.5 });
        s.add_modifier(Modifier { key: "haste".into(), magnitude: 0.8 });
        let keys: Vec<&str> = s.modifiers().iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["burn", "haste"]);

        // Clones get fresh modifier storage, same order.
        let copy = s.fresh_instance(AbilityId(1), None);
        assert_eq!(copy.modifiers(), s.modifiers());
    }

    #[test]
    fn test_root_chain_stays_one_level() {
        let proto = runtime(TraitMarkers::default());
        let inst = proto.fresh_instance(AbilityId(1), None);
        let second = inst.fresh_instance(AbilityId(2), None);
        assert_eq!(second.root(), Some(AbilityId(1)));
    }
}
