//! Event context abstraction
//!
//! A single payload type carries heterogeneous event data through one
//! narrow callback signature; receivers match the variant they expect.
//! Contexts are identity-free and short-lived: built per occurrence,
//! discarded after the receiving callback returns.

use crate::core::types::EntityId;

/// Payload passed to skill event sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillEventContext {
    /// Bare notification with no payload.
    Signal,
    /// One opaque reference (e.g. the entity that picked something up).
    Single(EntityId),
    /// Two opaque references (e.g. damage dealer and receiver on a block).
    Pair { dealer: EntityId, receiver: EntityId },
}

impl SkillEventContext {
    /// Context for a block event: who dealt the blocked hit, who blocked it.
    pub fn block(dealer: EntityId, receiver: EntityId) -> Self {
        Self::Pair { dealer, receiver }
    }

    /// The first (or only) referenced entity, if any.
    pub fn primary(&self) -> Option<EntityId> {
        match self {
            Self::Signal => None,
            Self::Single(id) => Some(*id),
            Self::Pair { dealer, .. } => Some(*dealer),
        }
    }
}

/// Inbound sink for skill-group events; accepts any context variant.
pub trait SkillEventSink {
    fn on_group_item_trigger(&mut self, ctx: &SkillEventContext);
}
