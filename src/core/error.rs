use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillError {
    #[error("Ability not found in roster: {0:?}")]
    AbilityNotFound(crate::core::types::AbilityId),

    #[error("Roster has no selectable entries (empty or zero total weight)")]
    EmptyRoster,

    #[error("Negative selection weight {weight} for ability {id:?}")]
    NegativeWeight {
        id: crate::core::types::AbilityId,
        weight: f32,
    },

    #[error("Invalid ability definition: {0}")]
    InvalidDefinition(String),
}

pub type Result<T> = std::result::Result<T, SkillError>;
