use crate::archetypes::{Archetype, ArchetypeId};
use crate::error::{EcsError, EcsResult};
use crate::attributes::{Attribute, AttributeRegistry, AttributeType};
use crate::data_structures::Signature;
use crate::config::MigrationPolicy;
use std::hash::BuildHasherDefault;
use crate::entities::EntityId;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::ops::Index;
use tracing::{debug, trace};

type EntityHasher = BuildHasherDefault<NoHashHasher<EntityId>>;
type AttributeHasher = BuildHasherDefault<NoHashHasher<AttributeType>>;

/// Owns every [Archetype] and knows which one each entity lives in.
///
/// Archetypes are created the first time their signature is needed and are never freed,
/// even once empty. They are kept in creation order, with the empty archetype always first.
pub struct ArchetypeManager {
	chunk_size: usize,
	policy: MigrationPolicy,
	archetypes: Vec<Archetype>,
	signatures: HashMap<Signature, ArchetypeId>,
	attribute_sizes: HashMap<AttributeType, usize, AttributeHasher>,
	entity_to_archetype: HashMap<EntityId, ArchetypeId, EntityHasher>,
}

impl ArchetypeManager {
	pub fn new(chunk_size: usize, policy: MigrationPolicy) -> Self {
		Self {
			chunk_size,
			policy,
			archetypes: vec![Archetype::empty(chunk_size)],
			signatures: HashMap::from([(Signature::new(), ArchetypeId::EMPTY)]),
			attribute_sizes: HashMap::default(),
			entity_to_archetype: HashMap::default(),
		}
	}

	/// Record the byte size of an attribute type.
	/// Registering a type again overwrites its size; this only affects archetypes created afterwards.
	pub fn register_attribute_type(&mut self, attribute: AttributeType, size: usize) {
		self.attribute_sizes.insert(attribute, size);
	}

	pub fn attribute_size(&self, attribute: AttributeType) -> Option<usize> {
		self.attribute_sizes.get(&attribute).copied()
	}

	/// Get the archetype for `signature`, creating it if it doesn't exist yet.
	pub fn get_or_create_archetype(&mut self, signature: &Signature) -> EcsResult<ArchetypeId> {
		if let Some(archetype) = self.signatures.get(signature) {
			return Ok(*archetype);
		}

		let mut sizes = Vec::with_capacity(signature.count());
		let mut types = Vec::with_capacity(signature.count());
		for bit in signature.iter_ones() {
			let attribute = AttributeType::try_from(bit).map_err(|_| EcsError::UnregisteredAttributeType(bit))?;
			let size = self.attribute_size(attribute).ok_or(EcsError::UnregisteredAttributeType(bit))?;
			types.push(attribute);
			sizes.push(size);
		}

		let id = ArchetypeId { index: self.archetypes.len() };
		let archetype = Archetype::new(id, signature.clone(), &sizes, &types, self.chunk_size)?;
		debug!(
			archetype = id.index,
			?signature,
			stride = archetype.entity_stride(),
			"created archetype"
		);

		self.signatures.insert(signature.clone(), id);
		self.archetypes.push(archetype);
		Ok(id)
	}

	/// Place entity `id` in the archetype matching `signature`.
	pub fn add_entity(&mut self, id: EntityId, signature: &Signature) -> EcsResult<ArchetypeId> {
		let archetype = self.get_or_create_archetype(signature)?;
		self.archetypes[archetype.index].add_entity(id);
		self.entity_to_archetype.insert(id, archetype);
		Ok(archetype)
	}

	/// Remove entity `id` from whichever archetype holds it.
	pub fn remove_entity(&mut self, id: EntityId) -> EcsResult<()> {
		let archetype = self.entity_to_archetype.remove(&id).ok_or(EcsError::EntityNotFound(id))?;
		self.archetypes[archetype.index].remove_entity(id)?;
		Ok(())
	}

	/// Move entity `id` to the archetype matching `signature`.
	///
	/// Under [MigrationPolicy::CarryShared] the attributes present in both archetypes keep their value;
	/// under [MigrationPolicy::Discard] every attribute of the destination must be set again.
	/// If the destination archetype can't be created the entity stays where it was.
	pub fn update_entity_archetype(&mut self, id: EntityId, signature: &Signature) -> EcsResult<ArchetypeId> {
		let src = self.archetype_of(id).ok_or(EcsError::EntityNotFound(id))?;
		let dst = self.get_or_create_archetype(signature)?;
		if src == dst {
			return Ok(dst);
		}

		let carry = self.policy == MigrationPolicy::CarryShared;
		let (from, to) = self.pair_mut(src, dst);
		to.add_entity(id);
		if carry {
			if let Err(err) = from.copy_shared_attributes(id, to) {
				to.remove_entity(id)?;
				return Err(err);
			}
		}
		from.remove_entity(id)?;

		self.entity_to_archetype.insert(id, dst);
		trace!(id, from = src.index, to = dst.index, "migrated entity");
		Ok(dst)
	}

	/// The raw bytes of `attribute` for entity `id`.
	pub fn attribute(&self, id: EntityId, attribute: AttributeType) -> EcsResult<&[u8]> {
		let archetype = self.archetype_of(id).ok_or(EcsError::EntityNotFound(id))?;
		self.archetypes[archetype.index].attribute(id, attribute)
	}

	/// The raw bytes of `attribute` for entity `id`.
	pub fn attribute_mut(&mut self, id: EntityId, attribute: AttributeType) -> EcsResult<&mut [u8]> {
		let archetype = self.archetype_of(id).ok_or(EcsError::EntityNotFound(id))?;
		self.archetypes[archetype.index].attribute_mut(id, attribute)
	}

	/// Overwrite `attribute` for entity `id` with `bytes`.
	pub fn set_attribute(&mut self, id: EntityId, attribute: AttributeType, bytes: &[u8]) -> EcsResult<()> {
		let archetype = self.archetype_of(id).ok_or(EcsError::EntityNotFound(id))?;
		self.archetypes[archetype.index].set_attribute(id, attribute, bytes)
	}

	/// Read attribute `T` of entity `id`.
	///
	/// Slots are tightly packed, so the value is copied out rather than borrowed.
	pub fn read<T: Attribute>(&self, attributes: &AttributeRegistry, id: EntityId) -> EcsResult<T> {
		let attribute = attributes.get::<T>().ok_or(missing::<T>(id))?;
		let bytes = self.attribute(id, attribute).map_err(|err| not_found::<T>(err, id))?;
		Ok(bytemuck::pod_read_unaligned(bytes))
	}

	/// Overwrite attribute `T` of entity `id`.
	pub fn write<T: Attribute>(&mut self, attributes: &AttributeRegistry, id: EntityId, value: T) -> EcsResult<()> {
		let attribute = attributes.get::<T>().ok_or(missing::<T>(id))?;
		self.set_attribute(id, attribute, bytemuck::bytes_of(&value)).map_err(|err| not_found::<T>(err, id))
	}

	/// Read attribute `T` of entity `id`, let `func` modify it and write it back.
	pub fn modify<T: Attribute, R>(
		&mut self, attributes: &AttributeRegistry, id: EntityId, func: impl FnOnce(&mut T) -> R,
	) -> EcsResult<R> {
		let mut value = self.read::<T>(attributes, id)?;
		let result = func(&mut value);
		self.write(attributes, id, value)?;
		Ok(result)
	}

	/// Every archetype carrying at least the attributes of `signature`, in creation order.
	pub fn query_archetypes<'l>(&'l self, signature: &'l Signature) -> impl Iterator<Item = &'l Archetype> {
		self.archetypes.iter().filter(move |archetype| signature.is_subset_of(archetype.signature()))
	}

	/// The archetype entity `id` currently lives in.
	pub fn archetype_of(&self, id: EntityId) -> Option<ArchetypeId> {
		self.entity_to_archetype.get(&id).copied()
	}

	pub fn find(&self, signature: &Signature) -> Option<ArchetypeId> {
		self.signatures.get(signature).copied()
	}

	pub fn archetype(&self, archetype: ArchetypeId) -> Option<&Archetype> {
		self.archetypes.get(archetype.index)
	}

	pub fn archetype_mut(&mut self, archetype: ArchetypeId) -> Option<&mut Archetype> {
		self.archetypes.get_mut(archetype.index)
	}

	/// All archetypes, in creation order.
	pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
		self.archetypes.iter()
	}

	/// Number of archetypes, the empty one included.
	pub fn len(&self) -> usize {
		self.archetypes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.archetypes.is_empty()
	}

	pub fn policy(&self) -> MigrationPolicy {
		self.policy
	}

	fn pair_mut(&mut self, a: ArchetypeId, b: ArchetypeId) -> (&mut Archetype, &mut Archetype) {
		debug_assert_ne!(a, b);
		if a.index < b.index {
			let (head, tail) = self.archetypes.split_at_mut(b.index);
			(&mut head[a.index], &mut tail[0])
		} else {
			let (head, tail) = self.archetypes.split_at_mut(a.index);
			(&mut tail[0], &mut head[b.index])
		}
	}
}

impl Index<ArchetypeId> for ArchetypeManager {
	type Output = Archetype;

	/// # Panics
	/// Panics if `archetype` was handed out by another manager.
	#[inline(always)]
	fn index(&self, archetype: ArchetypeId) -> &Self::Output {
		&self.archetypes[archetype.index]
	}
}

#[inline(always)]
fn missing<T: Attribute>(entity: EntityId) -> EcsError {
	EcsError::AttributeNotFound { entity, attribute: T::NAME }
}

fn not_found<T: Attribute>(err: EcsError, entity: EntityId) -> EcsError {
	match err {
		EcsError::AttributeNotInArchetype { .. } => missing::<T>(entity),
		err => err,
	}
}
