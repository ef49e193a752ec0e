//! Ability roster: weighted selection plus instance resolution
//!
//! The configured set of abilities for an encounter forms one loot table;
//! a draw picks the next ability to cast. Acquisition resolves a drawn
//! ability to a runtime instance: static abilities share one instance
//! across all users, everything else is cloned on first acquisition and
//! retained per user thereafter.

use ahash::AHashMap;
use rand::Rng;

use crate::ability::boss::{AbilityDef, BossAbility};
use crate::core::error::{Result, SkillError};
use crate::core::types::{AbilityId, EntityId};
use crate::loot::WeightedTable;

#[derive(Debug, Clone, Default)]
pub struct AbilityRoster {
    table: WeightedTable<BossAbility>,
    /// Singleton instances for static-marked abilities, keyed by definition.
    shared: AHashMap<AbilityId, BossAbility>,
    /// Per-user clones for everything else, retained after first acquisition.
    resolved: AHashMap<(EntityId, AbilityId), BossAbility>,
}

impl AbilityRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from loader-supplied definitions, rejecting invalid ones.
    pub fn from_defs(defs: &[AbilityDef]) -> Result<Self> {
        let mut prototypes = Vec::with_capacity(defs.len());
        for def in defs {
            prototypes.push(BossAbility::from_def(def)?);
        }
        Ok(Self::from_prototypes(prototypes))
    }

    pub fn from_prototypes(prototypes: Vec<BossAbility>) -> Self {
        Self {
            table: WeightedTable::from_items(prototypes),
            shared: AHashMap::new(),
            resolved: AHashMap::new(),
        }
    }

    pub fn add_prototype(&mut self, prototype: BossAbility) {
        self.table.add_item(prototype);
    }

    /// Configuration-time check. An empty or zero-weight roster is legal at
    /// runtime (draws yield nothing) but almost always a data mistake, so it
    /// is surfaced here as a warning and an error value.
    pub fn validate(&self) -> Result<()> {
        if self.table.is_empty() || self.table.total_weight() <= 0.0 {
            tracing::warn!(
                entries = self.table.len(),
                total_weight = self.table.total_weight(),
                "ability roster has nothing selectable"
            );
            return Err(SkillError::EmptyRoster);
        }
        Ok(())
    }

    /// Draw which ability to cast next. `None` means nothing is available
    /// this round; callers treat that as an expected empty-roster case.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<AbilityId> {
        self.table.get_random(rng).map(BossAbility::id)
    }

    /// Resolve an ability to the runtime instance for `user`.
    ///
    /// Unknown ids degrade to `None` with a warning; this path runs inside
    /// the frame loop and must not fail hard.
    pub fn acquire(&mut self, id: AbilityId, user: EntityId) -> Option<&mut BossAbility> {
        let prototype = match self.table.iter().find(|a| a.id() == id) {
            Some(p) => p,
            None => {
                tracing::warn!(ability = ?id, "acquire of unknown ability");
                return None;
            }
        };
        if prototype.runtime.markers().is_static {
            // One shared instance with its own id; the prototype never runs.
            let shared = &mut self.shared;
            Some(shared.entry(id).or_insert_with(|| prototype.shared_instance()))
        } else {
            let resolved = &mut self.resolved;
            Some(
                resolved
                    .entry((user, id))
                    .or_insert_with(|| prototype.instantiate(user)),
            )
        }
    }

    /// Release a user's retained instances, e.g. when the user despawns.
    pub fn release_user(&mut self, user: EntityId) {
        self.resolved.retain(|(u, _), _| *u != user);
    }

    pub fn prototype(&self, id: AbilityId) -> Option<&BossAbility> {
        self.table.iter().find(|a| a.id() == id)
    }

    /// Definition ids of every configured ability, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.table.iter().map(BossAbility::id)
    }

    pub fn probability_of(&self, id: AbilityId) -> f32 {
        self.prototype(id)
            .map(|p| self.table.probability_of(p))
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::stats::StatBlock;
    use crate::skill::TraitMarkers;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn def(id: u32, weight: f32, markers: TraitMarkers) -> AbilityDef {
        AbilityDef {
            id: AbilityId(id),
            name: format!("ability_{id}"),
            select_weight: weight,
            markers,
            cooldown: Some(3.0),
            duration: None,
            charge_time: None,
            stats: StatBlock::new(),
        }
    }

    #[test]
    fn test_empty_roster_draws_nothing() {
        let roster = AbilityRoster::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(roster.draw(&mut rng).is_none());
        assert!(roster.validate().is_err());
    }

    #[test]
    fn test_zero_weight_roster_fails_validation() {
        let roster =
            AbilityRoster::from_defs(&[def(1, 0.0, TraitMarkers::default())]).unwrap();
        assert!(matches!(roster.validate(), Err(SkillError::EmptyRoster)));
    }

    #[test]
    fn test_populated_roster_validates() {
        let roster =
            AbilityRoster::from_defs(&[def(1, 1.0, TraitMarkers::default())]).unwrap();
        assert!(roster.validate().is_ok());
    }

    #[test]
    fn test_acquire_unknown_ability_degrades() {
        let mut roster =
            AbilityRoster::from_defs(&[def(1, 1.0, TraitMarkers::default())]).unwrap();
        assert!(roster.acquire(AbilityId(99), EntityId::new()).is_none());
    }

    #[test]
    fn test_static_ability_shared_across_users() {
        let markers = TraitMarkers { is_static: true, ..Default::default() };
        let mut roster = AbilityRoster::from_defs(&[def(1, 1.0, markers)]).unwrap();
        let user_a = EntityId::new();
        let user_b = EntityId::new();
        let id_a = roster.acquire(AbilityId(1), user_a).unwrap().runtime.instance();
        let id_b = roster.acquire(AbilityId(1), user_b).unwrap().runtime.instance();
        assert_eq!(id_a, id_b, "static abilities resolve to one shared instance");
    }

    #[test]
    fn test_static_instance_does_not_alias_prototype() {
        let markers = TraitMarkers { is_static: true, ..Default::default() };
        let mut roster = AbilityRoster::from_defs(&[def(1, 1.0, markers)]).unwrap();
        let shared_id = roster.acquire(AbilityId(1), EntityId::new()).unwrap().runtime.instance();
        let proto = roster.prototype(AbilityId(1)).unwrap();
        assert_ne!(shared_id, proto.runtime.instance(), "prototype stays definition-only");
        assert_eq!(
            roster.acquire(AbilityId(1), EntityId::new()).unwrap().runtime.root(),
            Some(AbilityId(1))
        );
    }

    #[test]
    fn test_non_static_cloned_per_user_and_retained() {
        let mut roster =
            AbilityRoster::from_defs(&[def(1, 1.0, TraitMarkers::default())]).unwrap();
        let user_a = EntityId::new();
        let user_b = EntityId::new();
        let first = roster.acquire(AbilityId(1), user_a).unwrap().runtime.instance();
        let again = roster.acquire(AbilityId(1), user_a).unwrap().runtime.instance();
        let other = roster.acquire(AbilityId(1), user_b).unwrap().runtime.instance();
        assert_eq!(first, again, "instance retained per user");
        assert_ne!(first, other, "each user gets an exclusive clone");
        assert_ne!(
            first,
            roster.prototype(AbilityId(1)).unwrap().runtime.instance(),
            "clones never alias the prototype"
        );
    }

    #[test]
    fn test_release_user_drops_retained_instances() {
        let mut roster =
            AbilityRoster::from_defs(&[def(1, 1.0, TraitMarkers::default())]).unwrap();
        let user = EntityId::new();
        let first = roster.acquire(AbilityId(1), user).unwrap().runtime.instance();
        roster.release_user(user);
        let second = roster.acquire(AbilityId(1), user).unwrap().runtime.instance();
        assert_ne!(first, second);
    }

    #[test]
    fn test_draw_respects_weights() {
        let roster = AbilityRoster::from_defs(&[
            def(1, 0.0, TraitMarkers::default()),
            def(2, 5.0, TraitMarkers::default()),
        ])
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            assert_eq!(roster.draw(&mut rng), Some(AbilityId(2)));
        }
    }

    #[test]
    fn test_probability_query() {
        let roster = AbilityRoster::from_defs(&[
            def(1, 1.0, TraitMarkers::default()),
            def(2, 3.0, TraitMarkers::default()),
        ])
        .unwrap();
        assert!((roster.probability_of(AbilityId(1)) - 0.25).abs() < 1e-5);
        assert!((roster.probability_of(AbilityId(2)) - 0.75).abs() < 1e-5);
        assert_eq!(roster.probability_of(AbilityId(9)), 0.0);
    }
}
