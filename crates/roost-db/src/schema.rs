//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, Deserialize)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users (principals)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['FARMER', 'WORKER', 'VET'];
DEFINE FIELD is_active ON TABLE user TYPE bool DEFAULT true;
DEFINE FIELD is_verified ON TABLE user TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Farms (owned by exactly one user)
-- =======================================================================
DEFINE TABLE farm SCHEMAFULL;
DEFINE FIELD owner_id ON TABLE farm TYPE string;
DEFINE FIELD name ON TABLE farm TYPE string;
DEFINE FIELD location ON TABLE farm TYPE string;
DEFINE FIELD is_active ON TABLE farm TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE farm TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE farm TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_farm_owner ON TABLE farm COLUMNS owner_id;

-- =======================================================================
-- Worker memberships (user <-> farm, with permission strings)
-- =======================================================================
DEFINE TABLE worker SCHEMAFULL;
DEFINE FIELD user_id ON TABLE worker TYPE string;
DEFINE FIELD farm_id ON TABLE worker TYPE string;
DEFINE FIELD title ON TABLE worker TYPE string;
DEFINE FIELD permissions ON TABLE worker TYPE array<string> DEFAULT [];
DEFINE FIELD is_active ON TABLE worker TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE worker TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE worker TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_worker_user_farm ON TABLE worker \
    COLUMNS user_id, farm_id;

-- =======================================================================
-- Flocks (belong to exactly one farm)
-- =======================================================================
DEFINE TABLE flock SCHEMAFULL;
DEFINE FIELD farm_id ON TABLE flock TYPE string;
DEFINE FIELD name ON TABLE flock TYPE string;
DEFINE FIELD breed ON TABLE flock TYPE string;
DEFINE FIELD bird_count ON TABLE flock TYPE int;
DEFINE FIELD hatched_on ON TABLE flock TYPE datetime;
DEFINE FIELD created_at ON TABLE flock TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE flock TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_flock_farm ON TABLE flock COLUMNS farm_id;

-- =======================================================================
-- Daily feed records
-- =======================================================================
DEFINE TABLE feed_record SCHEMAFULL;
DEFINE FIELD flock_id ON TABLE feed_record TYPE string;
DEFINE FIELD recorded_by ON TABLE feed_record TYPE string;
DEFINE FIELD feed_type ON TABLE feed_record TYPE string;
DEFINE FIELD quantity_kg ON TABLE feed_record TYPE float;
DEFINE FIELD created_at ON TABLE feed_record TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_feed_record_flock ON TABLE feed_record COLUMNS flock_id;

-- =======================================================================
-- Daily health records
-- =======================================================================
DEFINE TABLE health_record SCHEMAFULL;
DEFINE FIELD flock_id ON TABLE health_record TYPE string;
DEFINE FIELD recorded_by ON TABLE health_record TYPE string;
DEFINE FIELD symptoms ON TABLE health_record TYPE string;
DEFINE FIELD diagnosis ON TABLE health_record TYPE option<string>;
DEFINE FIELD mortality_count ON TABLE health_record TYPE int DEFAULT 0;
DEFINE FIELD created_at ON TABLE health_record TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_health_record_flock ON TABLE health_record \
    COLUMNS flock_id;
";

/// Apply any pending schema migrations.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
