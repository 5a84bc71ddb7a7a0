use crate::data_structures::{copy_between, Chunk, Signature};
use crate::error::{EcsError, EcsResult};
use crate::attributes::AttributeType;
use std::hash::BuildHasherDefault;
use crate::entities::EntityId;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::ops::Range;

type EntityHasher = BuildHasherDefault<NoHashHasher<EntityId>>;
type AttributeHasher = BuildHasherDefault<NoHashHasher<AttributeType>>;

/// A handle to an [Archetype] owned by an [ArchetypeManager](crate::archetypes::ArchetypeManager).
///
/// Archetypes are never destroyed, so a handle stays valid for the lifetime of its manager.
#[derive(Default, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Copy, Clone)]
pub struct ArchetypeId {
	pub(crate) index: usize,
}

impl ArchetypeId {
	/// The archetype of entities without attributes.
	pub const EMPTY: ArchetypeId = ArchetypeId { index: 0 };

	pub const fn index(&self) -> usize {
		self.index
	}
}

/// Where an attribute lives inside an entity's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
	pub attribute: AttributeType,
	pub offset: usize,
	pub size: usize,
}

impl AttributeLayout {
	#[inline(always)]
	fn range(&self, slot_offset: usize) -> Range<usize> {
		slot_offset + self.offset..slot_offset + self.offset + self.size
	}
}

/// Storage for every entity sharing one exact [Signature].
///
/// Each entity owns a slot of `entity_stride` bytes holding all of its attributes back to back,
/// in ascending attribute type order. Slots are packed into fixed-size [chunks](Chunk)
/// and never straddle two chunks. Entity ids are kept densely packed:
/// removing an entity moves the last one, bytes included, into the hole.
pub struct Archetype {
	id: ArchetypeId,
	signature: Signature,
	layout: Vec<AttributeLayout>,
	attribute_to_index: HashMap<AttributeType, usize, AttributeHasher>,

	chunk_size: usize,
	entity_stride: usize,
	entities_per_chunk: usize,

	chunks: Vec<Chunk>,
	entities: Vec<EntityId>,
	entity_to_index: HashMap<EntityId, usize, EntityHasher>,
}

impl Archetype {
	/// Create an archetype storing the given attributes.
	///
	/// # Arguments
	/// * `sizes` - The byte size of each attribute
	/// * `types` - The attribute types, parallel to `sizes`
	/// * `chunk_size` - The size of each storage chunk in bytes
	pub fn new(
		id: ArchetypeId, signature: Signature, sizes: &[usize], types: &[AttributeType], chunk_size: usize,
	) -> EcsResult<Self> {
		if sizes.len() != types.len() {
			return Err(EcsError::LayoutMismatch {
				sizes: sizes.len(),
				types: types.len(),
			});
		}

		let mut offset = 0;
		let mut layout = Vec::with_capacity(types.len());
		let mut attribute_to_index = HashMap::default();

		for (i, (attribute, size)) in types.iter().zip(sizes).enumerate() {
			layout.push(AttributeLayout {
				attribute: *attribute,
				offset,
				size: *size,
			});
			attribute_to_index.insert(*attribute, i);
			offset += size;
		}

		let entity_stride = offset;
		let entities_per_chunk = match entity_stride {
			0 => usize::MAX,
			stride => chunk_size / stride,
		};

		if entities_per_chunk == 0 {
			return Err(EcsError::StrideExceedsChunk {
				stride: entity_stride,
				chunk_size,
			});
		}

		Ok(Self {
			id,
			signature,
			layout,
			attribute_to_index,
			chunk_size,
			entity_stride,
			entities_per_chunk,
			chunks: Vec::default(),
			entities: Vec::default(),
			entity_to_index: HashMap::default(),
		})
	}

	/// The archetype of entities without any attribute.
	pub(crate) fn empty(chunk_size: usize) -> Self {
		Self {
			id: ArchetypeId::EMPTY,
			signature: Signature::new(),
			layout: Vec::default(),
			attribute_to_index: HashMap::default(),
			chunk_size,
			entity_stride: 0,
			entities_per_chunk: usize::MAX,
			chunks: Vec::default(),
			entities: Vec::default(),
			entity_to_index: HashMap::default(),
		}
	}

	/// Append an entity and return its dense index, allocating a new chunk if all are full.
	///
	/// The attribute bytes of the new slot are unspecified until they are written.
	/// Adding an entity that is already present returns its current index.
	pub fn add_entity(&mut self, id: EntityId) -> usize {
		if let Some(index) = self.entity_to_index.get(&id) {
			return *index;
		}

		let index = self.entities.len();
		if self.entity_stride != 0 && index / self.entities_per_chunk >= self.chunks.len() {
			self.chunks.push(Chunk::new(self.chunk_size));
		}

		self.entity_to_index.insert(id, index);
		self.entities.push(id);
		index
	}

	/// Remove an entity by swapping the last entity into its slot.
	///
	/// Returns the id of the entity that took over the freed index, if any.
	/// Trailing chunks are freed once more than one of them is unused.
	pub fn remove_entity(&mut self, id: EntityId) -> EcsResult<Option<EntityId>> {
		let index = self.entity_to_index.remove(&id).ok_or(EcsError::EntityNotFound(id))?;
		let last = self.entities.len() - 1;

		let moved = match index == last {
			true => None,
			false => {
				let last_id = self.entities[last];
				self.entities[index] = last_id;
				self.entity_to_index.insert(last_id, index);
				self.move_slot(last, index);
				Some(last_id)
			},
		};

		self.entities.pop();
		self.release_chunks();
		Ok(moved)
	}

	/// The raw bytes of `attribute` for entity `id`.
	pub fn attribute(&self, id: EntityId, attribute: AttributeType) -> EcsResult<&[u8]> {
		let (index, layout) = self.resolve(id, attribute)?;
		if layout.size == 0 {
			return Ok(&[]);
		}

		let (chunk, offset) = self.slot_position(index);
		Ok(self.chunks[chunk].bytes(layout.range(offset)))
	}

	/// The raw bytes of `attribute` for entity `id`.
	pub fn attribute_mut(&mut self, id: EntityId, attribute: AttributeType) -> EcsResult<&mut [u8]> {
		let (index, layout) = self.resolve(id, attribute)?;
		if layout.size == 0 {
			return Ok(&mut []);
		}

		let (chunk, offset) = self.slot_position(index);
		Ok(self.chunks[chunk].bytes_mut(layout.range(offset)))
	}

	/// Overwrite `attribute` for entity `id` with `bytes`,
	/// which must be exactly as long as the attribute.
	pub fn set_attribute(&mut self, id: EntityId, attribute: AttributeType, bytes: &[u8]) -> EcsResult<()> {
		let slot = self.attribute_mut(id, attribute)?;
		if slot.len() != bytes.len() {
			return Err(EcsError::SizeMismatch {
				attribute,
				expected: slot.len(),
				actual: bytes.len(),
			});
		}

		slot.copy_from_slice(bytes);
		Ok(())
	}

	/// Copy every attribute stored by both archetypes from entity `id` in `self` to the same entity in `dst`.
	pub(crate) fn copy_shared_attributes(&self, id: EntityId, dst: &mut Archetype) -> EcsResult<()> {
		for layout in &self.layout {
			if !dst.has_attribute(layout.attribute) {
				continue;
			}

			let bytes = self.attribute(id, layout.attribute)?;
			dst.set_attribute(id, layout.attribute, bytes)?;
		}
		Ok(())
	}

	/// Visit every entity as `(id, dense index)`, in dense order.
	pub fn for_each(&self, mut visit: impl FnMut(EntityId, usize)) {
		for (index, id) in self.entities.iter().enumerate() {
			visit(*id, index);
		}
	}

	pub fn id(&self) -> ArchetypeId {
		self.id
	}

	pub fn signature(&self) -> &Signature {
		&self.signature
	}

	/// Entity ids in dense order.
	pub fn entities(&self) -> &[EntityId] {
		&self.entities
	}

	pub fn entity_index(&self, id: EntityId) -> Option<usize> {
		self.entity_to_index.get(&id).copied()
	}

	pub fn contains(&self, id: EntityId) -> bool {
		self.entity_to_index.contains_key(&id)
	}

	pub fn has_attribute(&self, attribute: AttributeType) -> bool {
		self.attribute_to_index.contains_key(&attribute)
	}

	/// Attribute placement within an entity slot, in ascending attribute type order.
	pub fn layout(&self) -> &[AttributeLayout] {
		&self.layout
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	/// Size of a single entity's slot in bytes.
	pub fn entity_stride(&self) -> usize {
		self.entity_stride
	}

	/// How many entities a chunk holds; `usize::MAX` when entities take no space.
	pub fn entities_per_chunk(&self) -> usize {
		self.entities_per_chunk
	}

	pub fn chunk_count(&self) -> usize {
		self.chunks.len()
	}

	pub fn chunk_size(&self) -> usize {
		self.chunk_size
	}

	fn resolve(&self, id: EntityId, attribute: AttributeType) -> EcsResult<(usize, AttributeLayout)> {
		let index = self.entity_index(id).ok_or(EcsError::EntityNotFound(id))?;
		match self.attribute_to_index.get(&attribute) {
			Some(i) => Ok((index, self.layout[*i])),
			None => Err(EcsError::AttributeNotInArchetype { entity: id, attribute }),
		}
	}

	/// `(chunk index, byte offset of the slot within the chunk)` for a dense index.
	#[inline(always)]
	fn slot_position(&self, index: usize) -> (usize, usize) {
		let chunk = index / self.entities_per_chunk;
		let offset = (index % self.entities_per_chunk) * self.entity_stride;
		(chunk, offset)
	}

	/// Keep at most one spare chunk past the ones holding entities.
	fn release_chunks(&mut self) {
		if self.entity_stride == 0 {
			return;
		}

		let used = (self.entities.len() + self.entities_per_chunk - 1) / self.entities_per_chunk;
		self.chunks.truncate(used + 1);
	}

	fn move_slot(&mut self, from: usize, to: usize) {
		if self.entity_stride == 0 {
			return;
		}

		let src = self.slot_position(from);
		let dst = self.slot_position(to);
		match src.0 == dst.0 {
			true => self.chunks[src.0].copy_within(src.1, dst.1, self.entity_stride),
			false => copy_between(&mut self.chunks, src, dst, self.entity_stride),
		}
	}
}
