//! API endpoint implementations

pub mod archetype;

pub use archetype::ArchetypeEndpoints;
