//! Synthetic record generation for the fixture seeder.
//!
//! This crate provides:
//! - [`WordLists`] for the on-disk name/occupation/place fixtures
//! - [`rand_in_range`], the half-open uniform integer primitive every
//!   generated quantity is drawn with
//! - [`Customer`] and [`Visit`] record shapes
//! - [`FixtureGenerator`] producing shape-valid random records

pub mod customer;
pub mod error;
pub mod generator;
pub mod random;
pub mod visit;
pub mod words;

pub use customer::Customer;
pub use error::{FixtureError, Result};
pub use generator::FixtureGenerator;
pub use random::rand_in_range;
pub use visit::{TIMESTAMP_FORMAT, Visit};
pub use words::WordLists;
