//! Shared types for the Archetype API client
//!
//! This crate holds the pieces every other crate in the workspace agrees on.
//! It has no I/O and can be used independently.
//!
//! # Key Types
//!
//! - [`ArchetypeError`], [`ErrorKind`] - Error taxonomy for every fallible call
//! - [`StrategyArchetypes`] - Archetype IDs registered under a strategy
//! - [`Archetype`] - Portfolio allocation of a single archetype

pub mod error;
pub mod models;

// Re-export commonly used types
pub use error::*;
pub use models::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
