//! [Entities](Entity) represent the individual "things" in your game or application.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Attributes](crate::attributes::Attribute)) belong together.

mod entity;
mod entity_manager;

pub use entity::*;
pub use entity_manager::*;
