//! Shared types used across the fixture-seeder crates.

pub mod types;

pub use types::DocumentId;
