use crate::attributes::Attribute;
use bytemuck::{Pod, Zeroable};

mod archetype_tests;
mod entity_manager_tests;
mod config_tests;

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable, Attribute)]
pub struct Position {
	pub x: f32,
	pub y: f32,
	pub z: f32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable, Attribute)]
pub struct Velocity {
	pub x: f32,
	pub y: f32,
	pub z: f32,
}

#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Pod, Zeroable, Attribute)]
pub struct Health(pub u32);

impl Position {
	pub fn new(x: f32, y: f32, z: f32) -> Self {
		Self { x, y, z }
	}
}

impl Velocity {
	pub fn new(x: f32, y: f32, z: f32) -> Self {
		Self { x, y, z }
	}
}
