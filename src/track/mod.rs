//! Track layout: the ordered checkpoint registry

mod registry;

pub use registry::CheckpointRegistry;
