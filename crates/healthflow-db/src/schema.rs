//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode. UUIDs are stored as record
//! keys in string form. Enums are stored as lowercase strings with ASSERT
//! constraints. Resource status is derived on read and has no column.

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

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
        sql: SCHEMA_V1,
    },
    Migration {
        version: 2,
        name: "seed_resources",
        sql: SEED_V2,
    },
];

// -----------------------------------------------------------------------
// Schema v1 — table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Resources
-- =======================================================================
DEFINE TABLE resource SCHEMAFULL;
DEFINE FIELD name ON TABLE resource TYPE string;
DEFINE FIELD resource_type ON TABLE resource TYPE string;
DEFINE FIELD total_count ON TABLE resource TYPE int ASSERT $value >= 0;
DEFINE FIELD available_count ON TABLE resource TYPE int ASSERT $value >= 0;
DEFINE FIELD location ON TABLE resource TYPE option<string>;
DEFINE FIELD created_at ON TABLE resource TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE resource TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Emergency events
-- =======================================================================
DEFINE TABLE emergency_event SCHEMAFULL;
DEFINE FIELD title ON TABLE emergency_event TYPE string;
DEFINE FIELD description ON TABLE emergency_event TYPE string;
DEFINE FIELD severity ON TABLE emergency_event TYPE string \
    ASSERT $value IN ['low', 'medium', 'high', 'critical'];
DEFINE FIELD status ON TABLE emergency_event TYPE string \
    DEFAULT 'active' \
    ASSERT $value IN ['active', 'resolved'];
DEFINE FIELD affected_resources ON TABLE emergency_event \
    TYPE option<string>;
DEFINE FIELD created_at ON TABLE emergency_event TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD resolved_at ON TABLE emergency_event TYPE option<datetime>;
DEFINE INDEX idx_emergency_event_status ON TABLE emergency_event \
    COLUMNS status;

-- =======================================================================
-- Notifications
-- =======================================================================
DEFINE TABLE notification SCHEMAFULL;
DEFINE FIELD title ON TABLE notification TYPE string;
DEFINE FIELD message ON TABLE notification TYPE string;
DEFINE FIELD kind ON TABLE notification TYPE string DEFAULT 'info' \
    ASSERT $value IN ['info', 'success', 'warning', 'error'];
DEFINE FIELD is_read ON TABLE notification TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE notification TYPE datetime \
    DEFAULT time::now();
";

// -----------------------------------------------------------------------
// Seed v2 — initial resource pool
// -----------------------------------------------------------------------

/// Record keys of the seeded resources, in listing order: beds, ICU
/// units, doctors, ambulances.
pub const SEED_RESOURCE_IDS: [&str; 4] = [
    "018d0e3c-4a00-7000-8000-000000000001",
    "018d0e3c-4a00-7000-8000-000000000002",
    "018d0e3c-4a00-7000-8000-000000000003",
    "018d0e3c-4a00-7000-8000-000000000004",
];

const SEED_V2: &str = "\
CREATE type::record('resource', '018d0e3c-4a00-7000-8000-000000000001') SET \
    name = 'Hospital Beds', resource_type = 'beds', \
    total_count = 120, available_count = 85, location = 'General Ward';
CREATE type::record('resource', '018d0e3c-4a00-7000-8000-000000000002') SET \
    name = 'ICU Units', resource_type = 'icu', \
    total_count = 20, available_count = 18, location = 'ICU';
CREATE type::record('resource', '018d0e3c-4a00-7000-8000-000000000003') SET \
    name = 'Doctors', resource_type = 'staff', \
    total_count = 25, available_count = 15, location = 'Hospital';
CREATE type::record('resource', '018d0e3c-4a00-7000-8000-000000000004') SET \
    name = 'Ambulances', resource_type = 'vehicles', \
    total_count = 8, available_count = 3, location = 'Parking';
";

// -----------------------------------------------------------------------
// Migration runner
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB instance.
///
/// Each pending migration runs in its own transaction together with the
/// `_migration` row that records it, so a failed migration leaves neither
/// partial schema nor a bookkeeping entry behind. Versions already
/// recorded are skipped, which makes re-running a no-op and inserts the
/// seed data exactly once.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(format!("Cannot create _migration table: {e}")))?;

    let mut result = db.query("SELECT VALUE version FROM _migration").await?;
    let applied: Vec<u32> = result.take(0)?;

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|m| !applied.contains(&m.version))
        .collect();

    for migration in &pending {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );

        let statement = format!(
            "BEGIN TRANSACTION;\n{}\nCREATE _migration SET version = $version, name = $name;\n\
             COMMIT TRANSACTION;",
            migration.sql
        );
        db.query(statement)
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "v{} '{}' rolled back: {e}",
                    migration.version, migration.name
                ))
            })?;
    }

    info!(
        applied = pending.len(),
        already_present = applied.len(),
        "Schema is up to date"
    );
    Ok(())
}
