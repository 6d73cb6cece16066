pub mod component;
mod engines;
pub mod layer;
pub mod positioning;
pub mod sequence;

// Public re-export of the engine builder for easier access
pub use engines::EngineBuilder;
