//! Error types shared by every layer of the ECS.
//!
//! All fallible operations return [`EcsResult`]. Each [`EcsError`] belongs to one of three
//! categories, reported by [`EcsError::kind`]:
//! * [`ErrorKind::Configuration`] - layouts, registrations and settings that can never work.
//! * [`ErrorKind::NotFound`] - an entity, attribute or system that isn't where the caller expected.
//! * [`ErrorKind::Capacity`] - the entity identifier pool is exhausted.
//!
//! Configuration and not-found errors are programming mistakes and should be prevented with
//! [`has_attribute`](crate::EcsManager::has_attribute) style checks. Running out of identifiers
//! is the one outcome every caller of [`create_entity`](crate::EcsManager::create_entity)
//! is expected to handle.

use crate::attributes::AttributeType;
use crate::entities::{Entity, EntityId};
use thiserror::Error;

/// Shorthand for results produced by the ECS.
pub type EcsResult<T> = Result<T, EcsError>;

/// The category an [`EcsError`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	Configuration,
	NotFound,
	Capacity,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
	/// The attribute size and attribute type lists handed to an archetype differ in length.
	#[error("attribute layout mismatch: {sizes} sizes for {types} types")]
	LayoutMismatch { sizes: usize, types: usize },

	/// A single entity's attributes don't fit in one chunk.
	#[error("entity stride of {stride} bytes exceeds the chunk size of {chunk_size} bytes")]
	StrideExceedsChunk { stride: usize, chunk_size: usize },

	/// A signature sets a bit with no registered attribute size.
	#[error("attribute type {0} has no registered size")]
	UnregisteredAttributeType(usize),

	/// A native type was used before being registered.
	#[error("attribute `{0}` is not registered")]
	UnregisteredAttribute(&'static str),

	/// Every attribute type slot is taken.
	#[error("cannot register more than {limit} attribute types")]
	AttributeLimitReached { limit: usize },

	/// A raw write didn't match the registered size of the attribute.
	#[error("attribute type {attribute} expects {expected} bytes, got {actual}")]
	SizeMismatch { attribute: AttributeType, expected: usize, actual: usize },

	/// The configuration could not be loaded or holds unusable values.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// The entity isn't stored where it was expected.
	#[error("entity {0} not found")]
	EntityNotFound(EntityId),

	/// The handle refers to an entity that has already been destroyed.
	#[error("entity {} (generation {}) has already been destroyed", .0.id(), .0.generation())]
	StaleEntity(Entity),

	/// The id lies outside the configured entity capacity.
	#[error("entity {id} is out of bounds (capacity {capacity})")]
	EntityOutOfBounds { id: EntityId, capacity: u32 },

	/// The archetype doesn't store the requested attribute type.
	#[error("attribute type {attribute} is not part of the archetype of entity {entity}")]
	AttributeNotInArchetype { entity: EntityId, attribute: AttributeType },

	/// The entity doesn't carry the requested attribute.
	#[error("entity {entity} has no `{attribute}` attribute")]
	AttributeNotFound { entity: EntityId, attribute: &'static str },

	/// No system of the requested type was registered.
	#[error("system `{0}` is not registered")]
	SystemNotFound(&'static str),

	/// The entity identifier pool is exhausted.
	#[error("out of entity identifiers (capacity {capacity})")]
	OutOfIdentifiers { capacity: u32 },
}

impl EcsError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			EcsError::LayoutMismatch { .. }
			| EcsError::StrideExceedsChunk { .. }
			| EcsError::UnregisteredAttributeType(_)
			| EcsError::UnregisteredAttribute(_)
			| EcsError::AttributeLimitReached { .. }
			| EcsError::SizeMismatch { .. }
			| EcsError::InvalidConfig(_) => ErrorKind::Configuration,

			EcsError::EntityNotFound(_)
			| EcsError::StaleEntity(_)
			| EcsError::EntityOutOfBounds { .. }
			| EcsError::AttributeNotInArchetype { .. }
			| EcsError::AttributeNotFound { .. }
			| EcsError::SystemNotFound(_) => ErrorKind::NotFound,

			EcsError::OutOfIdentifiers { .. } => ErrorKind::Capacity,
		}
	}
}

impl From<toml::de::Error> for EcsError {
	fn from(err: toml::de::Error) -> Self {
		EcsError::InvalidConfig(err.to_string())
	}
}

impl From<std::io::Error> for EcsError {
	fn from(err: std::io::Error) -> Self {
		EcsError::InvalidConfig(err.to_string())
	}
}
