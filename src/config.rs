//! Capacities and policies an [`EcsManager`](crate::EcsManager) is built with.

use crate::error::{EcsError, EcsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default size of an archetype chunk, in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 16 << 10;
pub const DEFAULT_MAX_ENTITIES: u32 = 1 << 16;
pub const DEFAULT_MAX_ATTRIBUTE_TYPES: usize = 64;

/// What happens to attribute values when an entity moves to another archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationPolicy {
	/// Attributes present in both the old and the new signature keep their value.
	#[default]
	CarryShared,
	/// Nothing is carried over; every attribute must be set again after the move.
	Discard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcsConfig {
	#[serde(default = "default_chunk_size")]
	pub chunk_size: usize,
	#[serde(default = "default_max_entities")]
	pub max_entities: u32,
	#[serde(default = "default_max_attribute_types")]
	pub max_attribute_types: usize,
	#[serde(default)]
	pub migration_policy: MigrationPolicy,
}

fn default_chunk_size() -> usize {
	DEFAULT_CHUNK_SIZE
}

fn default_max_entities() -> u32 {
	DEFAULT_MAX_ENTITIES
}

fn default_max_attribute_types() -> usize {
	DEFAULT_MAX_ATTRIBUTE_TYPES
}

impl Default for EcsConfig {
	fn default() -> Self {
		Self {
			chunk_size: default_chunk_size(),
			max_entities: default_max_entities(),
			max_attribute_types: default_max_attribute_types(),
			migration_policy: MigrationPolicy::default(),
		}
	}
}

impl EcsConfig {
	/// Parse a configuration from TOML. Missing fields take their default value.
	pub fn from_toml_str(source: &str) -> EcsResult<Self> {
		let config: EcsConfig = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Load a configuration from a TOML file.
	pub fn from_toml_file<P: AsRef<Path>>(path: P) -> EcsResult<Self> {
		let source = std::fs::read_to_string(path)?;
		Self::from_toml_str(&source)
	}

	pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
		self.chunk_size = chunk_size;
		self
	}

	pub fn with_max_entities(mut self, max_entities: u32) -> Self {
		self.max_entities = max_entities;
		self
	}

	pub fn with_max_attribute_types(mut self, max_attribute_types: usize) -> Self {
		self.max_attribute_types = max_attribute_types;
		self
	}

	pub fn with_migration_policy(mut self, migration_policy: MigrationPolicy) -> Self {
		self.migration_policy = migration_policy;
		self
	}

	/// Reject values no world could operate with.
	pub fn validate(&self) -> EcsResult<()> {
		if self.chunk_size == 0 {
			return Err(EcsError::InvalidConfig("chunk_size must be greater than 0".into()));
		}
		if self.max_entities == 0 {
			return Err(EcsError::InvalidConfig("max_entities must be greater than 0".into()));
		}
		if self.max_attribute_types > usize::from(u16::MAX) + 1 {
			return Err(EcsError::InvalidConfig(format!(
				"max_attribute_types cannot exceed {}",
				usize::from(u16::MAX) + 1
			)));
		}
		Ok(())
	}
}
