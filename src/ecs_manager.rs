use crate::attributes::{Attribute, AttributeRegistry, AttributeSet, AttributeType};
use crate::archetypes::{Archetype, ArchetypeId, ArchetypeManager};
use crate::systems::{System, SystemManager};
use crate::entities::{Entity, EntityManager};
use crate::data_structures::Signature;
use crate::error::EcsResult;
use crate::config::EcsConfig;

/// A container for [entities](Entity), their [attributes](Attribute) and the [systems](System) acting on them.
///
/// Every live entity is stored in exactly one [archetype](Archetype), the one matching the exact set
/// of attributes it carries. Adding or removing an attribute moves the entity to another archetype,
/// creating it on first use, and every new archetype is handed to the systems it matches.
///
/// ```ignore
/// let mut ecs = EcsManager::new();
/// ecs.register_attribute::<Position>()?;
/// ecs.register_attribute::<Velocity>()?;
/// ecs.register_system::<Movement>(ecs.signature_of::<(Position, Velocity)>()?);
///
/// let entity = ecs.create_entity()?;
/// ecs.add_attribute(entity, Position::default())?;
/// ecs.add_attribute(entity, Velocity { x: 1.0, y: 0.0, z: 0.0 })?;
/// ecs.update_systems(1.0 / 60.0)?;
/// ```
pub struct EcsManager {
	config: EcsConfig,
	attributes: AttributeRegistry,
	entities: EntityManager,
	archetypes: ArchetypeManager,
	systems: SystemManager,
	announced: usize,
}

impl EcsManager {
	/// Creates a manager with the default [EcsConfig].
	pub fn new() -> Self {
		Self::build(EcsConfig::default())
	}

	/// Creates a manager with the given capacities and policies.
	/// Fails with [InvalidConfig](crate::EcsError::InvalidConfig) if `config` holds unusable values.
	pub fn with_config(config: EcsConfig) -> EcsResult<Self> {
		config.validate()?;
		Ok(Self::build(config))
	}

	fn build(config: EcsConfig) -> Self {
		let archetypes = ArchetypeManager::new(config.chunk_size, config.migration_policy);
		Self {
			attributes: AttributeRegistry::new(config.max_attribute_types),
			entities: EntityManager::new(config.max_entities),
			announced: archetypes.len(),
			systems: SystemManager::new(),
			archetypes,
			config,
		}
	}

	/// Register `T` as an attribute type, or return its existing [AttributeType].
	pub fn register_attribute<T: Attribute>(&mut self) -> EcsResult<AttributeType> {
		let descriptor = self.attributes.register::<T>()?;
		self.archetypes.register_attribute_type(descriptor.id(), descriptor.size());
		Ok(descriptor.id())
	}

	/// The [AttributeType] assigned to `T`.
	pub fn attribute_type<T: Attribute>(&self) -> EcsResult<AttributeType> {
		self.attributes.require::<T>()
	}

	/// Build the [Signature] of a tuple of registered attribute types.
	pub fn signature_of<S: AttributeSet>(&self) -> EcsResult<Signature> {
		S::signature(&self.attributes)
	}

	/// Creates a new [Entity] without any attribute.
	/// Fails with [OutOfIdentifiers](crate::EcsError::OutOfIdentifiers) once every id is in use.
	pub fn create_entity(&mut self) -> EcsResult<Entity> {
		let entity = self.entities.create_entity()?;
		if let Err(err) = self.archetypes.add_entity(entity.id(), &Signature::EMPTY) {
			self.entities.destroy_entity(entity.id());
			return Err(err);
		}
		Ok(entity)
	}

	/// Destroys `entity` and frees its id for reuse.
	pub fn destroy_entity(&mut self, entity: Entity) -> EcsResult<()> {
		let id = self.entities.validate(entity)?;
		self.archetypes.remove_entity(id)?;
		self.entities.destroy_entity(id);
		Ok(())
	}

	#[inline(always)]
	pub fn is_alive(&self, entity: Entity) -> bool {
		self.entities.is_alive(entity)
	}

	/// Attach `value` to `entity`, moving it to the matching archetype.
	///
	/// Returns `false` without touching the stored value if `entity` already carries a `T`.
	pub fn add_attribute<T: Attribute>(&mut self, entity: Entity, value: T) -> EcsResult<bool> {
		let id = self.entities.validate(entity)?;
		let attribute = self.attributes.require::<T>()?;
		let signature = self.entities.signature(id)?;
		if signature.get(usize::from(attribute)) {
			return Ok(false);
		}

		let signature = signature.clone().with(usize::from(attribute));
		let result = self.archetypes.update_entity_archetype(id, &signature);
		self.announce_archetypes();
		result?;

		self.entities.set_signature(id, signature)?;
		self.archetypes.write(&self.attributes, id, value)?;
		Ok(true)
	}

	/// Detach attribute `T` from `entity`, moving it to the matching archetype.
	///
	/// Returns `false` if `entity` doesn't carry a `T`.
	pub fn remove_attribute<T: Attribute>(&mut self, entity: Entity) -> EcsResult<bool> {
		let id = self.entities.validate(entity)?;
		let attribute = self.attributes.require::<T>()?;
		let signature = self.entities.signature(id)?;
		if !signature.get(usize::from(attribute)) {
			return Ok(false);
		}

		let signature = signature.clone().without(usize::from(attribute));
		let result = self.archetypes.update_entity_archetype(id, &signature);
		self.announce_archetypes();
		result?;

		self.entities.set_signature(id, signature)?;
		Ok(true)
	}

	/// Check whether `entity` is alive and carries a `T`.
	pub fn has_attribute<T: Attribute>(&self, entity: Entity) -> bool {
		let (Ok(id), Some(attribute)) = (self.entities.validate(entity), self.attributes.get::<T>()) else {
			return false;
		};

		match self.entities.signature(id) {
			Ok(signature) => signature.get(usize::from(attribute)),
			Err(_) => false,
		}
	}

	/// A copy of the `T` attached to `entity`.
	pub fn get_attribute<T: Attribute>(&self, entity: Entity) -> EcsResult<T> {
		let id = self.entities.validate(entity)?;
		self.archetypes.read(&self.attributes, id)
	}

	/// Overwrite the `T` attached to `entity`.
	pub fn set_attribute<T: Attribute>(&mut self, entity: Entity, value: T) -> EcsResult<()> {
		let id = self.entities.validate(entity)?;
		self.archetypes.write(&self.attributes, id, value)
	}

	/// Modify the `T` attached to `entity` in place, returning whatever `func` returns.
	pub fn update_attribute<T: Attribute, R>(&mut self, entity: Entity, func: impl FnOnce(&mut T) -> R) -> EcsResult<R> {
		let id = self.entities.validate(entity)?;
		self.archetypes.modify(&self.attributes, id, func)
	}

	/// Add a new [system](System) that will visit every archetype matching `signature`.
	///
	/// # Panics
	/// Panics if `T` was already registered or if systems have already been started.
	pub fn register_system<T: System + Default>(&mut self, signature: Signature) {
		self.systems.register_system::<T>(signature, &self.archetypes);
	}

	/// Recompute the archetypes every system visits.
	pub fn rebuild_archetype_cache(&mut self) {
		self.systems.rebuild_archetype_cache(&self.archetypes);
	}

	/// Start all [systems](System).
	/// [update_systems](Self::update_systems) does this on its first call if it hasn't happened yet.
	pub fn start_systems(&mut self) -> EcsResult<()> {
		self.systems.start_systems(&mut self.archetypes, &self.attributes)
	}

	/// Run one tick of every [system](System).
	pub fn update_systems(&mut self, delta_time: f32) -> EcsResult<()> {
		self.systems.update_systems(&mut self.archetypes, &self.attributes, delta_time)
	}

	pub fn system<T: System>(&self) -> EcsResult<&T> {
		self.systems.system::<T>()
	}

	pub fn system_mut<T: System>(&mut self) -> EcsResult<&mut T> {
		self.systems.system_mut::<T>()
	}

	/// Every archetype carrying at least the attributes of `signature`.
	pub fn query_archetypes<'l>(&'l self, signature: &'l Signature) -> impl Iterator<Item = &'l Archetype> {
		self.archetypes.query_archetypes(signature)
	}

	pub fn config(&self) -> &EcsConfig {
		&self.config
	}

	pub fn attributes(&self) -> &AttributeRegistry {
		&self.attributes
	}

	pub fn entities(&self) -> &EntityManager {
		&self.entities
	}

	pub fn archetypes(&self) -> &ArchetypeManager {
		&self.archetypes
	}

	pub fn systems(&self) -> &SystemManager {
		&self.systems
	}

	/// Hand every archetype created since the last call to the systems.
	fn announce_archetypes(&mut self) {
		while self.announced < self.archetypes.len() {
			let archetype = &self.archetypes[ArchetypeId { index: self.announced }];
			self.systems.on_archetype_created(archetype);
			self.announced += 1;
		}
	}
}

impl Default for EcsManager {
	fn default() -> Self {
		Self::new()
	}
}
