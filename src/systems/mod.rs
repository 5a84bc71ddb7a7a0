//! [Systems](System) provide the logic for modifying the [attributes](crate::attributes::Attribute)
//! of [entities](crate::entities::Entity).
//!
//! A [System] must be registered with an [EcsManager](crate::EcsManager), together with the
//! [Signature](crate::data_structures::Signature) it requires, for it to run during
//! [update_systems](crate::EcsManager::update_systems).

mod system;
mod system_context;
mod system_manager;

pub use system::*;
pub use system_context::*;
pub use system_manager::*;
