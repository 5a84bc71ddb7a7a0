use crate::archetypes::{Archetype, ArchetypeId, AttributeLayout};
use crate::data_structures::Signature;
use crate::error::{EcsError, ErrorKind};
use crate::attributes::AttributeType;
use crate::entities::EntityId;
use rand::prelude::SliceRandom;
use rand::thread_rng;

fn archetype(sizes: &[usize], types: &[AttributeType], chunk_size: usize) -> Archetype {
	let bits = types.iter().map(|t| usize::from(*t)).collect::<Vec<_>>();
	Archetype::new(ArchetypeId { index: 1 }, Signature::from(bits.as_slice()), sizes, types, chunk_size)
		.expect("Archetype construction failed")
}

fn value_of(id: EntityId) -> [u8; 8] {
	(u64::from(id) * 7 + 3).to_le_bytes()
}

#[test]
pub fn construction_requires_one_entity_per_chunk() {
	let fits = Archetype::new(ArchetypeId::default(), Signature::from([0, 1].as_slice()), &[8, 8], &[0, 1], 16);
	assert_eq!(fits.map(|a| a.entities_per_chunk()).ok(), Some(1));

	let result = Archetype::new(ArchetypeId::default(), Signature::from([0, 1].as_slice()), &[8, 8], &[0, 1], 15);
	match result {
		Err(err) => {
			assert_eq!(err, EcsError::StrideExceedsChunk { stride: 16, chunk_size: 15 });
			assert_eq!(err.kind(), ErrorKind::Configuration);
		},
		Ok(_) => panic!("A 16 byte stride cannot fit in a 15 byte chunk"),
	}
}

#[test]
pub fn construction_rejects_mismatched_layout() {
	let result = Archetype::new(ArchetypeId::default(), Signature::from([0, 1].as_slice()), &[4], &[0, 1], 64);
	assert!(matches!(result, Err(EcsError::LayoutMismatch { sizes: 1, types: 2 })));
}

#[test]
pub fn offsets_are_prefix_sums() {
	let archetype = archetype(&[4, 12, 2], &[0, 3, 5], 64);
	assert_eq!(archetype.entity_stride(), 18);
	assert_eq!(archetype.entities_per_chunk(), 3);
	assert_eq!(
		archetype.layout(),
		[
			AttributeLayout { attribute: 0, offset: 0, size: 4 },
			AttributeLayout { attribute: 3, offset: 4, size: 12 },
			AttributeLayout { attribute: 5, offset: 16, size: 2 },
		]
	);
}

#[test]
pub fn zero_stride_allocates_no_chunks() {
	let mut archetype = archetype(&[], &[], 16);
	for id in 0..1000 {
		assert_eq!(archetype.add_entity(id), id as usize);
	}

	assert_eq!(archetype.entities_per_chunk(), usize::MAX);
	assert_eq!(archetype.chunk_count(), 0);
	assert_eq!(archetype.remove_entity(0), Ok(Some(999)));
	assert_eq!(archetype.len(), 999);
}

#[test]
pub fn chunks_are_allocated_on_demand() {
	let mut archetype = archetype(&[8], &[0], 32);
	assert_eq!(archetype.chunk_count(), 0);

	for id in 0..9 {
		archetype.add_entity(id);
	}
	assert_eq!(archetype.entities_per_chunk(), 4);
	assert_eq!(archetype.chunk_count(), 3);
	assert_eq!(archetype.add_entity(4), 4, "Adding a present entity must return its index");
	assert_eq!(archetype.len(), 9);
}

#[test]
pub fn written_values_read_back() {
	let mut archetype = archetype(&[8, 4], &[0, 1], 64);
	for id in 0..20 {
		archetype.add_entity(id);
		archetype.set_attribute(id, 0, &value_of(id)).unwrap();
		archetype.set_attribute(id, 1, &(id * 2).to_le_bytes()).unwrap();
	}

	for id in 0..20 {
		assert_eq!(archetype.attribute(id, 0).unwrap(), value_of(id));
		assert_eq!(archetype.attribute(id, 1).unwrap(), (id * 2).to_le_bytes());
	}

	archetype.attribute_mut(5, 1).unwrap().copy_from_slice(&[9, 9, 9, 9]);
	assert_eq!(archetype.attribute(5, 1).unwrap(), [9, 9, 9, 9]);
	assert_eq!(archetype.attribute(5, 0).unwrap(), value_of(5), "Neighbouring attribute was overwritten");
	assert_eq!(archetype.attribute(6, 1).unwrap(), 12u32.to_le_bytes(), "Neighbouring entity was overwritten");
}

#[test]
pub fn invalid_access_is_reported() {
	let mut archetype = archetype(&[8], &[2], 64);
	archetype.add_entity(1);

	assert_eq!(archetype.attribute(0, 2), Err(EcsError::EntityNotFound(0)));
	assert_eq!(
		archetype.attribute(1, 3),
		Err(EcsError::AttributeNotInArchetype { entity: 1, attribute: 3 })
	);
	assert_eq!(
		archetype.set_attribute(1, 2, &[0; 4]),
		Err(EcsError::SizeMismatch { attribute: 2, expected: 8, actual: 4 })
	);
	assert_eq!(archetype.remove_entity(7), Err(EcsError::EntityNotFound(7)));
	assert_eq!(EcsError::EntityNotFound(7).kind(), ErrorKind::NotFound);
}

#[test]
pub fn swap_remove_moves_last_entity() {
	let mut archetype = archetype(&[8], &[0], 64);
	for id in 0..3 {
		archetype.add_entity(id);
		archetype.set_attribute(id, 0, &value_of(id)).unwrap();
	}

	assert_eq!(archetype.remove_entity(0), Ok(Some(2)));
	assert_eq!(archetype.entities(), [2, 1]);
	assert_eq!(archetype.entity_index(2), Some(0));
	assert_eq!(archetype.attribute(2, 0).unwrap(), value_of(2));
	assert_eq!(archetype.attribute(1, 0).unwrap(), value_of(1));
	assert_eq!(archetype.attribute(0, 0), Err(EcsError::EntityNotFound(0)));
	assert!(!archetype.contains(0));

	assert_eq!(archetype.remove_entity(1), Ok(None), "Removing the last entity moves nothing");
	assert_eq!(archetype.entities(), [2]);
}

#[test]
pub fn shuffled_removal_keeps_values() {
	let count = 1024;

	// 8 entities per chunk, so most removals move a slot across chunks.
	let mut archetype = archetype(&[8], &[0], 64);
	for id in 0..count {
		archetype.add_entity(id);
		archetype.set_attribute(id, 0, &value_of(id)).unwrap();
	}

	let mut ids = (0..count).collect::<Vec<_>>();
	ids.shuffle(&mut thread_rng());
	let (removed, kept) = ids.split_at(count as usize / 2);

	for id in removed {
		archetype.remove_entity(*id).unwrap();
	}

	assert_eq!(archetype.len(), kept.len());
	for id in kept {
		let index = archetype.entity_index(*id).expect("Kept entity is missing");
		assert_eq!(archetype.entities()[index], *id);
		assert_eq!(archetype.attribute(*id, 0).unwrap(), value_of(*id), "Value of entity {id} was lost");
	}
	for id in removed {
		assert!(!archetype.contains(*id));
	}
}

#[test]
pub fn for_each_visits_in_dense_order() {
	let mut archetype = archetype(&[8], &[0], 64);
	for id in 0..5 {
		archetype.add_entity(id);
	}
	archetype.remove_entity(1).unwrap();

	let mut visited = Vec::new();
	archetype.for_each(|id, index| visited.push((id, index)));
	assert_eq!(visited, [(0, 0), (4, 1), (2, 2), (3, 3)]);
}

#[test]
pub fn unused_chunks_are_released() {
	let mut archetype = archetype(&[8], &[0], 32);
	for id in 0..16 {
		archetype.add_entity(id);
		archetype.set_attribute(id, 0, &value_of(id)).unwrap();
	}
	assert_eq!(archetype.chunk_count(), 4);

	for id in (8..16).rev() {
		archetype.remove_entity(id).unwrap();
	}
	assert_eq!(archetype.chunk_count(), 3, "One spare chunk is kept");

	for id in (4..8).rev() {
		archetype.remove_entity(id).unwrap();
	}
	assert_eq!(archetype.chunk_count(), 2);
	for id in 0..4 {
		assert_eq!(archetype.attribute(id, 0).unwrap(), value_of(id));
	}

	for id in 0..4 {
		archetype.remove_entity(id).unwrap();
	}
	assert_eq!(archetype.chunk_count(), 1);

	for id in 0..5 {
		archetype.add_entity(id);
		archetype.set_attribute(id, 0, &value_of(id)).unwrap();
	}
	assert_eq!(archetype.chunk_count(), 2);
	assert_eq!(archetype.attribute(4, 0).unwrap(), value_of(4));
}
