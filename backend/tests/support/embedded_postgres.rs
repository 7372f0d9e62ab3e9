//! Per-test registry databases cloned from a migrated template.
//!
//! The template is named after a hash of `migrations/`, so schema changes
//! produce a fresh template while unchanged schemas reuse the existing one.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use backend::outbound::persistence::run_pending_migrations;
use color_eyre::eyre::{Result, WrapErr, eyre};
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::format_postgres_error;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "registry_template";
const PROVISION_RETRIES: usize = 5;
const PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| eyre!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Create the template on first use and apply migrations through the
/// backend's own migration runner.
fn ensure_template_database(cluster: &ClusterHandle, runtime: &Runtime) -> Result<String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| eyre!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| eyre!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        runtime
            .block_on(run_pending_migrations(&url))
            .wrap_err("migrate template")?;
    }

    Ok(template_name)
}

fn provision_attempt(
    cluster: &ClusterHandle,
    runtime: &Runtime,
    attempt: usize,
) -> Result<TemporaryDatabase> {
    let template_name = ensure_template_database(cluster, runtime)
        .wrap_err_with(|| format!("attempt {attempt}/{PROVISION_RETRIES}"))?;
    let db_name = format!("registry_test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|err| {
            eyre!("clone template: attempt {attempt}/{PROVISION_RETRIES}: {err:?}")
        })
}

/// Provision an isolated, fully migrated database for one test.
///
/// The database is dropped when the returned guard goes out of scope.
pub fn provision_registry_database(
    cluster: &ClusterHandle,
    runtime: &Runtime,
) -> Result<TemporaryDatabase> {
    let mut last_error = None;
    for attempt in 1..=PROVISION_RETRIES {
        match provision_attempt(cluster, runtime, attempt) {
            Ok(database) => return Ok(database),
            Err(error) => last_error = Some(error),
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error.unwrap_or_else(|| eyre!("clone template: exhausted retries")))
}

/// Drop `table` (and dependants) to simulate schema loss.
pub fn drop_table(url: &str, table: &str) -> Result<()> {
    let mut client =
        Client::connect(url, NoTls).map_err(|err| eyre!(format_postgres_error(&err)))?;
    let escaped = table.replace('"', "\"\"");
    client
        .batch_execute(&format!(r#"DROP TABLE IF EXISTS "{escaped}" CASCADE"#))
        .map_err(|err| eyre!(format_postgres_error(&err)))?;
    Ok(())
}
