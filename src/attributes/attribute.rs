use bytemuck::Pod;
use std::any::TypeId;
use std::mem::size_of;

/// A runtime identifier assigned to an [Attribute] type when it gets registered.
///
/// Ids are handed out in registration order, starting from 0,
/// and double as the bit index of the attribute in a [Signature](crate::data_structures::Signature).
pub type AttributeType = u16;

/// A plain data payload that can be attached to an [entity](crate::entities::Entity).
///
/// Attributes are stored as raw bytes inside archetype chunks and copied byte by byte,
/// which is why every attribute must be [`Pod`].
/// Use #\[derive([`Attribute`](sable_ecs_derive::Attribute))] rather than implementing this by hand.
pub trait Attribute: Pod {
	/// Human readable name, used in diagnostics.
	const NAME: &'static str;
}

/// A runtime description of a registered [Attribute] type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDescriptor {
	id: AttributeType,
	name: &'static str,
	size: usize,
	type_id: TypeId,
}

impl AttributeDescriptor {
	pub(crate) fn of<T: Attribute>(id: AttributeType) -> Self {
		Self {
			id,
			name: T::NAME,
			size: size_of::<T>(),
			type_id: TypeId::of::<T>(),
		}
	}

	pub const fn id(&self) -> AttributeType {
		self.id
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}

	/// Size of the attribute in bytes.
	pub const fn size(&self) -> usize {
		self.size
	}

	pub fn type_id(&self) -> TypeId {
		self.type_id
	}
}
