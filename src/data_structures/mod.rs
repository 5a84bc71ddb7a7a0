mod chunk;
mod signature;

pub use chunk::*;
pub use signature::*;
