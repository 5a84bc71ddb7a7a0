use crate::entities::{Entity, EntityId};
use crate::error::{EcsError, EcsResult};
use crate::data_structures::Signature;
use std::collections::VecDeque;
use tracing::{trace, warn};

static EMPTY_SIGNATURE: Signature = Signature::EMPTY;

/// Per-slot bookkeeping.
#[derive(Default, Clone)]
struct EntitySlot {
	alive: bool,
	generation: u32,
	signature: Signature,
}

/// Allocates and recycles entity identifiers and keeps track of each entity's [Signature].
///
/// Freed ids are reused in the order they were freed, before any never-used id is handed out.
pub struct EntityManager {
	capacity: u32,
	next_fresh: u32,
	alive: usize,
	slots: Vec<EntitySlot>,
	available: VecDeque<EntityId>,
}

impl EntityManager {
	/// Create a manager that can hold up to `capacity` live entities.
	pub fn new(capacity: u32) -> Self {
		Self {
			capacity,
			next_fresh: 0,
			alive: 0,
			slots: Vec::default(),
			available: VecDeque::default(),
		}
	}

	/// Creates a new [Entity] with an empty [Signature].
	/// Fails with [EcsError::OutOfIdentifiers] once every id is in use.
	pub fn create_entity(&mut self) -> EcsResult<Entity> {
		let id = match self.available.pop_front() {
			Some(id) => id,
			None if self.next_fresh < self.capacity => {
				self.next_fresh += 1;
				self.next_fresh - 1
			},
			None => {
				warn!(capacity = self.capacity, "out of entity identifiers");
				return Err(EcsError::OutOfIdentifiers { capacity: self.capacity });
			},
		};

		let slot = self.slot_mut(id);
		slot.alive = true;
		slot.signature.clear();
		let generation = slot.generation;
		self.alive += 1;

		trace!(id, generation, "created entity");
		Ok(Entity { id, generation })
	}

	/// Returns `id` to the back of the pool of available identifiers.
	///
	/// Liveness is not validated: destroying an id that is not alive will hand it out twice.
	/// Ids outside the capacity are ignored.
	pub fn destroy_entity(&mut self, id: EntityId) {
		if id >= self.capacity {
			return;
		}

		let slot = self.slot_mut(id);
		let was_alive = slot.alive;
		slot.alive = false;
		slot.signature.clear();
		slot.generation = slot.generation.wrapping_add(1);

		if was_alive {
			self.alive -= 1;
		}
		self.available.push_back(id);
		trace!(id, "destroyed entity");
	}

	/// Check whether `entity` refers to a live entity of the current generation.
	pub fn is_alive(&self, entity: Entity) -> bool {
		match self.slots.get(entity.id as usize) {
			Some(slot) => slot.alive && slot.generation == entity.generation,
			None => false,
		}
	}

	/// Fails with [EcsError::StaleEntity] unless `entity` is alive.
	pub fn validate(&self, entity: Entity) -> EcsResult<EntityId> {
		match self.is_alive(entity) {
			true => Ok(entity.id),
			false => Err(EcsError::StaleEntity(entity)),
		}
	}

	/// The current [Signature] of `id`.
	pub fn signature(&self, id: EntityId) -> EcsResult<&Signature> {
		self.check_bounds(id)?;
		Ok(self.slots.get(id as usize).map_or(&EMPTY_SIGNATURE, |slot| &slot.signature))
	}

	/// Overwrite the [Signature] of `id`.
	pub fn set_signature(&mut self, id: EntityId, signature: Signature) -> EcsResult<()> {
		self.check_bounds(id)?;
		self.slot_mut(id).signature = signature;
		Ok(())
	}

	/// The current generation of slot `id`, or 0 if it was never used.
	pub fn generation(&self, id: EntityId) -> u32 {
		self.slots.get(id as usize).map_or(0, |slot| slot.generation)
	}

	/// Number of live entities.
	pub fn alive_count(&self) -> usize {
		self.alive
	}

	pub fn capacity(&self) -> u32 {
		self.capacity
	}

	fn check_bounds(&self, id: EntityId) -> EcsResult<()> {
		match id < self.capacity {
			true => Ok(()),
			false => Err(EcsError::EntityOutOfBounds {
				id,
				capacity: self.capacity,
			}),
		}
	}

	fn slot_mut(&mut self, id: EntityId) -> &mut EntitySlot {
		let index = id as usize;
		if self.slots.len() <= index {
			self.slots.resize(index + 1, EntitySlot::default());
		}
		&mut self.slots[index]
	}
}
