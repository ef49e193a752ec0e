//! Boss ability entity
//!
//! A skill instance that is simultaneously a weighted-loot item and a
//! stat-bearing entity. Several encounters may reference one prototype
//! asset; `instantiate` deep-copies so no runtime state is ever shared
//! between users.

use serde::{Deserialize, Serialize};

use crate::ability::stats::{StatBlock, StatKind, StatProvider};
use crate::core::error::{Result, SkillError};
use crate::core::types::{AbilityId, EntityId, SlotIndex};
use crate::events::{SkillEventContext, SkillEventSink};
use crate::loot::Weighted;
use crate::skill::{SkillRuntime, TraitMarkers};

/// Loader-facing ability definition. Supplied as already-loaded data by an
/// external loader; this crate only validates and builds prototypes from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityDef {
    pub id: AbilityId,
    pub name: String,
    /// Selection weight in the roster's loot table. Must be >= 0.
    pub select_weight: f32,
    #[serde(default)]
    pub markers: TraitMarkers,
    #[serde(default)]
    pub cooldown: Option<f32>,
    #[serde(default)]
    pub duration: Option<f32>,
    #[serde(default)]
    pub charge_time: Option<f32>,
    #[serde(default)]
    pub stats: StatBlock,
}

/// A concrete boss ability: runtime skill state plus selection weight and
/// an independent stat snapshot.
#[derive(Debug, Clone)]
pub struct BossAbility {
    id: AbilityId,
    pub runtime: SkillRuntime,
    select_weight: f32,
    pub stats: StatBlock,
    last_event: Option<SkillEventContext>,
}

impl BossAbility {
    /// Build a prototype from a validated definition.
    pub fn from_def(def: &AbilityDef) -> Result<Self> {
        if def.select_weight < 0.0 {
            return Err(SkillError::NegativeWeight { id: def.id, weight: def.select_weight });
        }
        if def.name.is_empty() {
            return Err(SkillError::InvalidDefinition(format!(
                "ability {:?} has an empty name",
                def.id
            )));
        }
        let mut runtime = SkillRuntime::new(def.name.clone(), SlotIndex::PRIMARY, def.markers);
        if let Some(cd) = def.cooldown {
            runtime = runtime.with_cooldown(cd);
        }
        if let Some(duration) = def.duration {
            runtime = runtime.with_duration(duration);
        }
        if let Some(charge) = def.charge_time {
            runtime = runtime.with_charge(charge);
        }
        Ok(Self {
            id: def.id,
            runtime,
            select_weight: def.select_weight,
            stats: def.stats.clone(),
            last_event: None,
        })
    }

    pub fn id(&self) -> AbilityId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.runtime.name()
    }

    pub fn select_weight(&self) -> f32 {
        self.select_weight
    }

    /// Value-independent copy for one user: fresh storage for modifiers,
    /// stats, and trait state; fresh instance id; root pointing back at
    /// this prototype. Mutating the copy never affects the prototype.
    pub fn instantiate(&self, owner: EntityId) -> Self {
        Self {
            id: self.id,
            runtime: self.runtime.fresh_instance(self.id, Some(owner)),
            select_weight: self.select_weight,
            stats: self.stats.clone(),
            last_event: None,
        }
    }

    /// Singleton copy for a static-marked ability: fresh instance id and
    /// root back-reference, but no owning user since every user resolves
    /// to the same instance. The prototype itself stays definition-only.
    pub fn shared_instance(&self) -> Self {
        Self {
            id: self.id,
            runtime: self.runtime.fresh_instance(self.id, None),
            select_weight: self.select_weight,
            stats: self.stats.clone(),
            last_event: None,
        }
    }

    pub fn last_event(&self) -> Option<SkillEventContext> {
        self.last_event
    }
}

impl PartialEq for BossAbility {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Weighted for BossAbility {
    fn weight(&self) -> f32 {
        self.select_weight.max(0.0)
    }
}

impl StatProvider for BossAbility {
    fn stat_value(&self, kind: StatKind) -> f32 {
        self.stats.value(kind)
    }
}

impl SkillEventSink for BossAbility {
    fn on_group_item_trigger(&mut self, ctx: &SkillEventContext) {
        tracing::debug!(ability = %self.name(), event = ?ctx, "group item trigger");
        self.last_event = Some(*ctx);
    }
}
