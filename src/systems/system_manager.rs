use crate::archetypes::{Archetype, ArchetypeId, ArchetypeManager};
use crate::systems::{AnySystem, System, SystemContext};
use crate::error::{EcsError, EcsResult};
use crate::attributes::AttributeRegistry;
use crate::data_structures::Signature;
use std::hash::BuildHasherDefault;
use std::any::{type_name, TypeId};
use nohash_hasher::NoHashHasher;
use std::collections::HashSet;
use tracing::{debug, warn};

type ArchetypeHasher = BuildHasherDefault<NoHashHasher<usize>>;

struct SystemEntry {
	type_id: TypeId,
	name: &'static str,
	signature: Signature,
	system: Box<dyn AnySystem>,
	archetypes: Vec<ArchetypeId>,
	started: HashSet<ArchetypeId, ArchetypeHasher>,
}

impl SystemEntry {
	/// Run `start_archetype` for every cached archetype it hasn't succeeded on yet.
	/// A failed start is retried on the next pass.
	fn start_pending(&mut self, archetypes: &mut ArchetypeManager, attributes: &AttributeRegistry) -> EcsResult<()> {
		for archetype in &self.archetypes {
			if !self.started.contains(archetype) {
				let mut ctx = SystemContext::new(*archetype, archetypes, attributes);
				self.system.start_archetype(&mut ctx)?;
				self.started.insert(*archetype);
			}
		}
		Ok(())
	}

	fn tick(&mut self, archetypes: &mut ArchetypeManager, attributes: &AttributeRegistry, delta_time: f32) -> EcsResult<()> {
		self.system.tick(delta_time);
		for archetype in &self.archetypes {
			let mut ctx = SystemContext::new(*archetype, archetypes, attributes);
			self.system.tick_archetype(&mut ctx, delta_time)?;
		}
		Ok(())
	}
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	#[default]
	Registering,
	Started,
}

/// Owns every [System] and the archetypes each of them is dispatched over.
///
/// A system registered with signature `R` visits every archetype whose signature `A`
/// satisfies `(A & R) == R`. Systems run in registration order,
/// and each one visits its archetypes in the order they were cached.
pub struct SystemManager {
	state: State,
	set: HashSet<TypeId>,
	systems: Vec<SystemEntry>,
}

impl SystemManager {
	pub fn new() -> Self {
		Self {
			set: HashSet::default(),
			state: State::default(),
			systems: Vec::default(),
		}
	}

	/// Create an instance of `T` that will visit every archetype matching `signature`.
	///
	/// # Panics
	/// Panics if `T` was already registered or if systems have already been started.
	pub fn register_system<T: System + Default>(&mut self, signature: Signature, archetypes: &ArchetypeManager) {
		match self.state {
			State::Registering => {
				let inserted = self.set.insert(TypeId::of::<T>());
				assert!(inserted, "System `{}` was already registered", type_name::<T>());

				let cached = archetypes.query_archetypes(&signature).map(Archetype::id).collect::<Vec<_>>();
				debug!(system = type_name::<T>(), ?signature, archetypes = cached.len(), "registered system");

				self.systems.push(SystemEntry {
					type_id: TypeId::of::<T>(),
					name: type_name::<T>(),
					signature,
					system: Box::new(T::default()),
					archetypes: cached,
					started: HashSet::default(),
				});
			},
			State::Started => {
				panic!("Cannot register systems after they have been started");
			},
		}
	}

	/// Add a freshly created archetype to the cache of every system it matches.
	pub fn on_archetype_created(&mut self, archetype: &Archetype) {
		for entry in &mut self.systems {
			if entry.signature.is_subset_of(archetype.signature()) && !entry.archetypes.contains(&archetype.id()) {
				entry.archetypes.push(archetype.id());
			}
		}
	}

	/// Recompute every system's archetype cache from scratch.
	///
	/// Archetypes a system was already started on don't get `start_archetype` called again.
	pub fn rebuild_archetype_cache(&mut self, archetypes: &ArchetypeManager) {
		for entry in &mut self.systems {
			entry.archetypes.clear();
			entry.archetypes.extend(archetypes.query_archetypes(&entry.signature).map(Archetype::id));
		}
	}

	/// Call [System::start] on every system, then `start_archetype` for every cached archetype.
	/// Calling this more than once has no effect.
	pub fn start_systems(&mut self, archetypes: &mut ArchetypeManager, attributes: &AttributeRegistry) -> EcsResult<()> {
		match self.state {
			State::Registering => {
				self.state = State::Started;
				self.systems.iter_mut().for_each(|entry| entry.system.start());
				for entry in &mut self.systems {
					entry.start_pending(archetypes, attributes)?;
				}
				Ok(())
			},
			State::Started => {
				warn!("systems have already been started");
				Ok(())
			},
		}
	}

	/// Run one tick of every system, starting them first if needed.
	pub fn update_systems(
		&mut self, archetypes: &mut ArchetypeManager, attributes: &AttributeRegistry, delta_time: f32,
	) -> EcsResult<()> {
		if self.state == State::Registering {
			self.start_systems(archetypes, attributes)?;
		}

		for entry in &mut self.systems {
			entry.start_pending(archetypes, attributes)?;
			entry.tick(archetypes, attributes, delta_time)?;
		}
		Ok(())
	}

	/// The instance of `T` created at registration.
	pub fn system<T: System>(&self) -> EcsResult<&T> {
		self.entry::<T>()
			.and_then(|entry| entry.system.as_any().downcast_ref::<T>())
			.ok_or(EcsError::SystemNotFound(type_name::<T>()))
	}

	pub fn system_mut<T: System>(&mut self) -> EcsResult<&mut T> {
		let type_id = TypeId::of::<T>();
		self.systems
			.iter_mut()
			.find(|entry| entry.type_id == type_id)
			.and_then(|entry| entry.system.as_any_mut().downcast_mut::<T>())
			.ok_or(EcsError::SystemNotFound(type_name::<T>()))
	}

	/// The archetypes `T` is dispatched over, in visiting order.
	pub fn archetypes_of<T: System>(&self) -> EcsResult<&[ArchetypeId]> {
		match self.entry::<T>() {
			Some(entry) => Ok(&entry.archetypes),
			None => Err(EcsError::SystemNotFound(type_name::<T>())),
		}
	}

	/// Names of the registered systems, in registration order.
	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.systems.iter().map(|entry| entry.name)
	}

	pub fn is_started(&self) -> bool {
		self.state == State::Started
	}

	pub fn len(&self) -> usize {
		self.systems.len()
	}

	pub fn is_empty(&self) -> bool {
		self.systems.is_empty()
	}

	fn entry<T: System>(&self) -> Option<&SystemEntry> {
		let type_id = TypeId::of::<T>();
		self.systems.iter().find(|entry| entry.type_id == type_id)
	}
}

impl Default for SystemManager {
	fn default() -> Self {
		Self::new()
	}
}
