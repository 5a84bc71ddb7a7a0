//! [Archetypes](Archetype) store the attributes of every entity sharing the same [Signature](crate::data_structures::Signature).
//!
//! Whenever an entity gains or loses an attribute its signature changes
//! and the [ArchetypeManager] migrates it to the matching archetype, creating it on first use.

mod archetype;
mod archetype_manager;

pub use archetype::*;
pub use archetype_manager::*;
