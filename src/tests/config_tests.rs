use crate::config::{EcsConfig, MigrationPolicy, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_ENTITIES};
use crate::error::{EcsError, ErrorKind};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
pub fn defaults() {
	let config = EcsConfig::default();
	assert_eq!(config.chunk_size, 16 * 1024);
	assert_eq!(config.max_entities, 65536);
	assert_eq!(config.max_attribute_types, 64);
	assert_eq!(config.migration_policy, MigrationPolicy::CarryShared);
	assert_eq!(config.validate(), Ok(()));
}

#[test]
pub fn missing_fields_take_defaults() {
	let config = EcsConfig::from_toml_str("chunk_size = 4096\nmigration_policy = \"discard\"\n").unwrap();
	assert_eq!(config.chunk_size, 4096);
	assert_eq!(config.migration_policy, MigrationPolicy::Discard);
	assert_eq!(config.max_entities, DEFAULT_MAX_ENTITIES);

	assert_eq!(EcsConfig::from_toml_str(""), Ok(EcsConfig::default()));
}

#[test]
pub fn unusable_values_are_rejected() {
	for source in ["chunk_size = 0", "max_entities = 0", "max_attribute_types = 70000", "migration_policy = \"keep\""] {
		let err = EcsConfig::from_toml_str(source).unwrap_err();
		assert!(matches!(err, EcsError::InvalidConfig(_)), "`{source}` was accepted");
		assert_eq!(err.kind(), ErrorKind::Configuration);
	}

	assert!(EcsConfig::from_toml_str("chunk_size = \"large\"").is_err());
}

#[test]
pub fn load_from_file() {
	let mut file = NamedTempFile::new().unwrap();
	writeln!(file, "max_entities = 128").unwrap();
	writeln!(file, "max_attribute_types = 8").unwrap();

	let config = EcsConfig::from_toml_file(file.path()).unwrap();
	assert_eq!(config.max_entities, 128);
	assert_eq!(config.max_attribute_types, 8);
	assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
}

#[test]
pub fn missing_file_is_reported() {
	let dir = tempfile::tempdir().unwrap();
	let result = EcsConfig::from_toml_file(dir.path().join("ecs.toml"));
	assert!(matches!(result, Err(EcsError::InvalidConfig(_))));
}

#[test]
pub fn builders_override_fields() {
	let config = EcsConfig::default()
		.with_chunk_size(512)
		.with_max_entities(10)
		.with_max_attribute_types(4)
		.with_migration_policy(MigrationPolicy::Discard);

	let source = toml::to_string(&config).unwrap();
	assert_eq!(EcsConfig::from_toml_str(&source), Ok(config));
}
