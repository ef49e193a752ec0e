//! Skillcast - ability/skill execution core
//!
//! Capability-composed skill instances, weighted-random ability selection,
//! prototype/clone roster resolution, and interval-polled trigger policies.
//! The owning controller, stat math, physics, and animation systems are
//! external collaborators reached through the traits in each module.

pub mod ability;
pub mod core;
pub mod events;
pub mod loot;
pub mod skill;
pub mod trigger;
