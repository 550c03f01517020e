//! Database schema migrations
//!
//! Versioned migrations tracked in the `schema_version` table. Fresh databases
//! get the current shape from `init.rs`; these bring older databases forward.
//!
//! # Migration Guidelines
//!
//! 1. **Never modify existing migrations** - databases in the field depend on them
//! 2. **Always add new migrations** - one function per schema change
//! 3. **Check before altering** - every migration must be safe to run twice
//!
//! # Example Migration
//!
//! ```rust,ignore
//! async fn migrate_v4(pool: &PgPool) -> Result<()> {
//!     if column_exists(pool, "cities", "timezone").await? {
//!         return Ok(());
//!     }
//!     sqlx::query("ALTER TABLE cities ADD COLUMN timezone VARCHAR(50)")
//!         .execute(pool)
//!         .await?;
//!     Ok(())
//! }
//! ```

use crate::Result;
use sqlx::PgPool;
use tracing::{info, warn};

/// Current schema version
///
/// **IMPORTANT:** Increment this when adding new migrations
pub const CURRENT_SCHEMA_VERSION: i32 = 3;

/// Get current schema version from database
///
/// Returns 0 if schema_version table doesn't exist or has no rows
pub async fn get_schema_version(pool: &PgPool) -> Result<i32> {
    if !crate::db::init::table_exists(pool, "schema_version").await? {
        return Ok(0);
    }

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

async fn set_schema_version(pool: &PgPool, version: i32) -> Result<()> {
    sqlx::query("INSERT INTO schema_version (version) VALUES ($1) ON CONFLICT (version) DO NOTHING")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Check whether a column exists in the current schema
pub async fn column_exists(pool: &PgPool, table: &str, column: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM information_schema.columns
            WHERE table_schema = current_schema()
              AND table_name = $1
              AND column_name = $2
        )
        "#,
    )
    .bind(table)
    .bind(column)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

async fn constraint_exists(pool: &PgPool, constraint: &str) -> Result<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_constraint WHERE conname = $1)")
            .bind(constraint)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

/// Run all pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let current_version = get_schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        return Ok(());
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    if current_version < 1 {
        migrate_v1(pool).await?;
        set_schema_version(pool, 1).await?;
        info!("✓ Migration v1 completed");
    }

    if current_version < 2 {
        migrate_v2(pool).await?;
        set_schema_version(pool, 2).await?;
        info!("✓ Migration v2 completed");
    }

    if current_version < 3 {
        migrate_v3(pool).await?;
        set_schema_version(pool, 3).await?;
        info!("✓ Migration v3 completed");
    }

    Ok(())
}

/// Migration v1: continents.ai_model_id provenance column
async fn migrate_v1(pool: &PgPool) -> Result<()> {
    if column_exists(pool, "continents", "ai_model_id").await? {
        info!("  continents.ai_model_id already exists - skipping");
        return Ok(());
    }

    sqlx::query(
        "ALTER TABLE continents ADD COLUMN ai_model_id INTEGER REFERENCES ai_models(ai_model_id)",
    )
    .execute(pool)
    .await?;

    info!("  ✓ Added ai_model_id column to continents table");
    Ok(())
}

/// Migration v2: countries.continent_id
async fn migrate_v2(pool: &PgPool) -> Result<()> {
    if column_exists(pool, "countries", "continent_id").await? {
        info!("  countries.continent_id already exists - skipping");
        return Ok(());
    }

    sqlx::query(
        "ALTER TABLE countries ADD COLUMN continent_id INTEGER REFERENCES continents(continent_id)",
    )
    .execute(pool)
    .await?;

    info!("  ✓ Added continent_id column to countries table");
    Ok(())
}

/// Migration v3: unique (country_id, name) on cities, the city upsert key
///
/// Duplicate rows from earlier insert-only runs are collapsed first, keeping
/// the most recently updated row.
async fn migrate_v3(pool: &PgPool) -> Result<()> {
    if constraint_exists(pool, "cities_country_id_name_key").await? {
        info!("  cities_country_id_name_key already exists - skipping");
        return Ok(());
    }

    let removed = sqlx::query(
        r#"
        DELETE FROM cities a
        USING cities b
        WHERE a.country_id = b.country_id
          AND a.name = b.name
          AND (a.updated_at, a.city_id) < (b.updated_at, b.city_id)
        "#,
    )
    .execute(pool)
    .await?
    .rows_affected();

    if removed > 0 {
        warn!("  Removed {} duplicate city rows", removed);
    }

    sqlx::query(
        "ALTER TABLE cities ADD CONSTRAINT cities_country_id_name_key UNIQUE (country_id, name)",
    )
    .execute(pool)
    .await?;

    info!("  ✓ Added unique (country_id, name) constraint to cities table");
    Ok(())
}
