//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **catalog**: reqwest client for the external pokémon catalog
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters convert between domain types and infrastructure representations
//! and contain no business logic.

pub mod catalog;
pub mod persistence;
