use std::fmt;

/// The raw slot index of an [Entity].
///
/// Ids are unique among live entities and get recycled once an entity is destroyed.
pub type EntityId = u32;

/// A unique handle to an entity.
///
/// The `generation` is bumped every time the slot is freed,
/// which lets stale handles to a recycled id be told apart from the live one.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
	pub(crate) id: EntityId,
	pub(crate) generation: u32,
}

impl Entity {
	#[inline(always)]
	pub const fn id(&self) -> EntityId {
		self.id
	}

	#[inline(always)]
	pub const fn generation(&self) -> u32 {
		self.generation
	}
}

impl fmt::Debug for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Entity({}v{})", self.id, self.generation)
	}
}
