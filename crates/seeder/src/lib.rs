//! Database fixture bootstrap pipeline.
//!
//! Sequences the whole seeding run against a [`DocumentStore`]: drop
//! and recreate the database, sync the on-disk views, generate
//! customers, select a subset through two view queries and generate
//! their visits, then compute the final observations through four more
//! queries.
//!
//! [`DocumentStore`]: doc_store::DocumentStore

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::Config;
pub use error::{Result, SeederError};
pub use pipeline::{LatestVisit, Observations, SeedSummary, Seeder};
pub use report::summary_lines;
