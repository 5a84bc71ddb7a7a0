extern crate self as sable_ecs;

pub mod data_structures;
pub mod attributes;
pub mod archetypes;
pub mod entities;
pub mod systems;
pub mod config;
pub mod error;
mod ecs_manager;

pub use ecs_manager::EcsManager;
pub use config::{EcsConfig, MigrationPolicy};
pub use error::{EcsError, EcsResult, ErrorKind};

pub mod prelude {
	pub use crate::systems::{System, SystemContext};
	pub use crate::attributes::{Attribute, AttributeSet, AttributeType};
	pub use crate::archetypes::{Archetype, ArchetypeId};
	pub use crate::entities::{Entity, EntityId};
	pub use crate::data_structures::Signature;
	pub use crate::{EcsConfig, EcsError, EcsManager, EcsResult, MigrationPolicy};
}

#[cfg(test)]
mod tests;
