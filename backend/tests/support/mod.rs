//! Shared helpers for the Diesel adapter suites.
//!
//! Each integration test compiles as its own crate, so suites pull these in
//! with `mod support;` and use the subset they need.

#![allow(dead_code)]

pub mod cluster_skip;
pub mod embedded_postgres;
pub mod registry;
pub mod shared_cluster;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{drop_table, provision_registry_database};
pub use registry::{RegistryContext, new_pokemon, new_trainer, setup_registry_context};
pub use shared_cluster::shared_cluster_handle;

/// Render a `postgres` error including SQLSTATE, detail, and hint.
///
/// The `Display` implementation reduces server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}
