use crate::attributes::{Attribute, AttributeDescriptor, AttributeType};
use crate::error::{EcsError, EcsResult};
use std::collections::HashMap;
use std::any::TypeId;
use tracing::debug;

/// Maps native [Attribute] types to their [AttributeType] and byte size.
pub struct AttributeRegistry {
	limit: usize,
	types: HashMap<TypeId, AttributeType>,
	descriptors: Vec<AttributeDescriptor>,
}

impl AttributeRegistry {
	/// Create an empty registry that accepts at most `limit` attribute types.
	pub fn new(limit: usize) -> Self {
		Self {
			limit,
			types: HashMap::default(),
			descriptors: Vec::default(),
		}
	}

	/// Register `T`, assigning it the next free [AttributeType].
	/// Registering the same type again returns its existing descriptor.
	pub fn register<T: Attribute>(&mut self) -> EcsResult<AttributeDescriptor> {
		if let Some(id) = self.types.get(&TypeId::of::<T>()) {
			return Ok(self.descriptors[usize::from(*id)]);
		}

		if self.descriptors.len() >= self.limit {
			return Err(EcsError::AttributeLimitReached { limit: self.limit });
		}

		let id = self.descriptors.len() as AttributeType;
		let descriptor = AttributeDescriptor::of::<T>(id);
		self.types.insert(TypeId::of::<T>(), id);
		self.descriptors.push(descriptor);

		debug!(attribute = T::NAME, id, size = descriptor.size(), "registered attribute");
		Ok(descriptor)
	}

	/// The [AttributeType] assigned to `T`, if it was registered.
	#[inline(always)]
	pub fn get<T: Attribute>(&self) -> Option<AttributeType> {
		self.types.get(&TypeId::of::<T>()).copied()
	}

	/// Like [get](Self::get), but fails with [EcsError::UnregisteredAttribute].
	pub fn require<T: Attribute>(&self) -> EcsResult<AttributeType> {
		self.get::<T>().ok_or(EcsError::UnregisteredAttribute(T::NAME))
	}

	pub fn descriptor(&self, id: AttributeType) -> Option<&AttributeDescriptor> {
		self.descriptors.get(usize::from(id))
	}

	pub fn iter(&self) -> impl Iterator<Item = &AttributeDescriptor> {
		self.descriptors.iter()
	}

	pub fn len(&self) -> usize {
		self.descriptors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}

	pub fn limit(&self) -> usize {
		self.limit
	}
}
