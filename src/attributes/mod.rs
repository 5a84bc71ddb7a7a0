//! [Attributes](Attribute) are the plain data payloads attached to [entities](crate::entities::Entity).
//!
//! Every attribute type must be registered with
//! [register_attribute](crate::EcsManager::register_attribute) before use,
//! which assigns it an [AttributeType] and records its byte size.

mod attribute;
mod attribute_set;
mod attribute_registry;

pub use attribute::*;
pub use attribute_set::*;
pub use attribute_registry::*;
pub use sable_ecs_derive::Attribute;
