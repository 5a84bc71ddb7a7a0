use crate::systems::SystemContext;
use crate::error::EcsResult;
use std::any::Any;

/// Provides the logic for modifying the [attributes](crate::attributes::Attribute)
/// of every entity whose archetype matches the signature the system was registered with.
///
/// The manager never hands a system individual entities;
/// it visits each matching archetype once per tick and the system iterates its entities itself.
pub trait System: 'static {
	/// Called once, before any other hook.
	/// **This function should not be called by user code.**
	fn start(&mut self) {}

	/// Called once for every matching archetype, before its first [tick_archetype](Self::tick_archetype).
	fn start_archetype(&mut self, _ctx: &mut SystemContext) -> EcsResult<()> {
		Ok(())
	}

	/// Called once per tick, before any archetype is visited.
	fn tick(&mut self, _delta_time: f32) {}

	/// Called once per tick for every matching archetype.
	fn tick_archetype(&mut self, ctx: &mut SystemContext, delta_time: f32) -> EcsResult<()>;
}

/// Lets boxed systems be handed back as their concrete type.
pub(crate) trait AnySystem: System {
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: System> AnySystem for T {
	#[inline(always)]
	fn as_any(&self) -> &dyn Any {
		self
	}

	#[inline(always)]
	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
