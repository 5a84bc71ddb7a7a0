use crate::archetypes::{Archetype, ArchetypeId, ArchetypeManager};
use crate::attributes::{Attribute, AttributeRegistry};
use crate::entities::EntityId;
use crate::error::EcsResult;

/// What a [System](crate::systems::System) sees while it visits one archetype.
///
/// Attribute values can be read and written for any entity,
/// but entities can't be created, destroyed or moved between archetypes.
pub struct SystemContext<'l> {
	current: ArchetypeId,
	archetypes: &'l mut ArchetypeManager,
	attributes: &'l AttributeRegistry,
}

impl<'l> SystemContext<'l> {
	pub(crate) fn new(
		current: ArchetypeId, archetypes: &'l mut ArchetypeManager, attributes: &'l AttributeRegistry,
	) -> Self {
		Self {
			current,
			archetypes,
			attributes,
		}
	}

	/// The archetype being visited.
	#[inline(always)]
	pub fn archetype(&self) -> &Archetype {
		&self.archetypes[self.current]
	}

	#[inline(always)]
	pub fn archetype_id(&self) -> ArchetypeId {
		self.current
	}

	/// Number of entities in the archetype being visited.
	pub fn len(&self) -> usize {
		self.archetype().len()
	}

	pub fn is_empty(&self) -> bool {
		self.archetype().is_empty()
	}

	/// Visit every entity of the current archetype as `(id, dense index)`, in dense order.
	///
	/// The context is handed back to `visit` so attributes can be read and written along the way.
	/// Iteration stops at the first error.
	pub fn for_each<F>(&mut self, mut visit: F) -> EcsResult<()>
	where
		F: FnMut(&mut Self, EntityId, usize) -> EcsResult<()>,
	{
		let mut index = 0;
		while let Some(id) = self.archetype().entities().get(index).copied() {
			visit(self, id, index)?;
			index += 1;
		}
		Ok(())
	}

	/// Read attribute `T` of entity `id`.
	#[inline(always)]
	pub fn get<T: Attribute>(&self, id: EntityId) -> EcsResult<T> {
		self.archetypes.read(self.attributes, id)
	}

	/// Overwrite attribute `T` of entity `id`.
	#[inline(always)]
	pub fn set<T: Attribute>(&mut self, id: EntityId, value: T) -> EcsResult<()> {
		self.archetypes.write(self.attributes, id, value)
	}

	/// Modify attribute `T` of entity `id` in place.
	#[inline(always)]
	pub fn update<T: Attribute, R>(&mut self, id: EntityId, func: impl FnOnce(&mut T) -> R) -> EcsResult<R> {
		self.archetypes.modify(self.attributes, id, func)
	}

	/// Every archetype, for systems that need to look beyond the current one.
	pub fn archetypes(&self) -> &ArchetypeManager {
		&*self.archetypes
	}

	pub fn attributes(&self) -> &AttributeRegistry {
		self.attributes
	}
}
