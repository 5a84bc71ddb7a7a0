use crate::error::{EcsError, ErrorKind};
use crate::data_structures::Signature;
use crate::entities::EntityManager;

#[test]
pub fn fresh_ids_are_sequential() {
	let mut manager = EntityManager::new(16);
	for i in 0..16 {
		let entity = manager.create_entity().unwrap();
		assert_eq!(entity.id(), i);
		assert_eq!(entity.generation(), 0);
	}
	assert_eq!(manager.alive_count(), 16);
}

#[test]
pub fn freed_ids_are_reused_in_fifo_order() {
	let mut manager = EntityManager::new(16);
	let entities = (0..4).map(|_| manager.create_entity().unwrap()).collect::<Vec<_>>();

	manager.destroy_entity(entities[2].id());
	manager.destroy_entity(entities[0].id());
	assert_eq!(manager.alive_count(), 2);

	let ids = (0..3).map(|_| manager.create_entity().unwrap().id()).collect::<Vec<_>>();
	assert_eq!(ids, [2, 0, 4], "Freed ids must be handed out first, oldest first");
}

#[test]
pub fn destroyed_handles_become_stale() {
	let mut manager = EntityManager::new(4);
	let old = manager.create_entity().unwrap();
	manager.destroy_entity(old.id());

	let new = manager.create_entity().unwrap();
	assert_eq!(new.id(), old.id());
	assert_eq!(new.generation(), old.generation() + 1);
	assert!(manager.is_alive(new));
	assert!(!manager.is_alive(old));

	let err = manager.validate(old).unwrap_err();
	assert_eq!(err, EcsError::StaleEntity(old));
	assert_eq!(err.kind(), ErrorKind::NotFound);
	assert_eq!(manager.validate(new), Ok(new.id()));
}

#[test]
pub fn exhaustion_is_reported() {
	let mut manager = EntityManager::new(2);
	manager.create_entity().unwrap();
	let last = manager.create_entity().unwrap();

	let err = manager.create_entity().unwrap_err();
	assert_eq!(err, EcsError::OutOfIdentifiers { capacity: 2 });
	assert_eq!(err.kind(), ErrorKind::Capacity);

	manager.destroy_entity(last.id());
	assert_eq!(manager.create_entity().map(|e| e.id()), Ok(last.id()));
}

#[test]
pub fn signatures_are_tracked_per_entity() {
	let mut manager = EntityManager::new(4);
	let entity = manager.create_entity().unwrap();
	assert!(manager.signature(entity.id()).unwrap().is_empty());

	let signature = Signature::new().with(1).with(3);
	manager.set_signature(entity.id(), signature.clone()).unwrap();
	assert_eq!(manager.signature(entity.id()), Ok(&signature));

	manager.destroy_entity(entity.id());
	let entity = manager.create_entity().unwrap();
	assert!(manager.signature(entity.id()).unwrap().is_empty(), "Recycled ids start without attributes");
	assert!(manager.signature(3).unwrap().is_empty(), "Never used ids have an empty signature");
}

#[test]
pub fn out_of_bounds_ids_are_rejected() {
	let mut manager = EntityManager::new(4);
	let out_of_bounds = EcsError::EntityOutOfBounds { id: 4, capacity: 4 };

	assert_eq!(manager.signature(4), Err(out_of_bounds.clone()));
	assert_eq!(manager.set_signature(4, Signature::new()), Err(out_of_bounds));

	manager.destroy_entity(100);
	assert_eq!(manager.create_entity().map(|e| e.id()), Ok(0), "Out of bounds ids must not enter the pool");
}
