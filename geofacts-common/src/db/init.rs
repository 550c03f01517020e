//! Database connection and schema creation
//!
//! Tables are created with `CREATE TABLE IF NOT EXISTS` in dependency order
//! (ai_models → continents → countries → cities, glossary standalone), then
//! versioned migrations bring older databases up to the current shape.

use crate::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, warn};

/// Tables owned by geofacts, in creation order
pub const TABLES: [&str; 5] = ["ai_models", "continents", "countries", "cities", "glossary"];

/// Open a connection pool and verify connectivity
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    info!("✓ Connected to database");
    Ok(pool)
}

/// Build a pool without connecting; connections are opened on first use
pub fn connect_lazy(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(database_url)?;
    Ok(pool)
}

/// Create all tables if needed and run pending migrations
pub async fn init_database(pool: &PgPool) -> Result<()> {
    create_schema_version_table(pool).await?;
    create_ai_models_table(pool).await?;
    create_continents_table(pool).await?;
    create_countries_table(pool).await?;
    create_cities_table(pool).await?;
    create_glossary_table(pool).await?;

    crate::db::migrations::run_migrations(pool).await?;

    info!("Database schema ready");
    Ok(())
}

/// Check whether a table exists in the current schema
pub async fn table_exists(pool: &PgPool, table_name: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = $1
        )
        "#,
    )
    .bind(table_name)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Count rows in one of the geofacts tables
pub async fn count_rows(pool: &PgPool, table_name: &str) -> Result<i64> {
    if !TABLES.contains(&table_name) {
        return Err(crate::Error::InvalidInput(format!(
            "Unknown table: {}",
            table_name
        )));
    }

    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table_name))
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Drop every geofacts table (children first)
///
/// WARNING: permanently deletes all data.
pub async fn drop_all_tables(pool: &PgPool) -> Result<()> {
    for table in ["cities", "countries", "continents", "ai_models", "glossary", "schema_version"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {} CASCADE", table))
            .execute(pool)
            .await?;
        warn!("Dropped table {}", table);
    }
    Ok(())
}

async fn create_schema_version_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_ai_models_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ai_models (
            ai_model_id SERIAL PRIMARY KEY,
            model_provider VARCHAR(50) NOT NULL,
            model_name VARCHAR(100) NOT NULL,
            description VARCHAR(250),
            supports_structured_output BOOLEAN NOT NULL DEFAULT TRUE,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            CONSTRAINT ai_models_provider_name_key UNIQUE (model_provider, model_name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_continents_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS continents (
            continent_id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL UNIQUE,
            description VARCHAR(250),
            area_sq_mile DOUBLE PRECISION,
            area_sq_km DOUBLE PRECISION,
            population BIGINT,
            num_country INTEGER,
            ai_model_id INTEGER REFERENCES ai_models(ai_model_id),
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_countries_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS countries (
            country_id SERIAL PRIMARY KEY,
            ai_model_id INTEGER REFERENCES ai_models(ai_model_id),
            continent_id INTEGER REFERENCES continents(continent_id),
            name VARCHAR(100) NOT NULL UNIQUE,
            description VARCHAR(250),
            interesting_fact VARCHAR(250),
            area_sq_mile DOUBLE PRECISION,
            area_sq_km DOUBLE PRECISION,
            population BIGINT,
            ppp DOUBLE PRECISION,
            life_expectancy DOUBLE PRECISION,
            travel_risk_level VARCHAR(50),
            global_peace_index_score DOUBLE PRECISION,
            global_peace_index_rank INTEGER,
            happiness_index_score DOUBLE PRECISION,
            happiness_index_rank INTEGER,
            gdp DOUBLE PRECISION,
            gdp_growth_rate DOUBLE PRECISION,
            inflation_rate DOUBLE PRECISION,
            unemployment_rate DOUBLE PRECISION,
            govt_debt DOUBLE PRECISION,
            credit_rating VARCHAR(10),
            poverty_rate DOUBLE PRECISION,
            gini_coefficient DOUBLE PRECISION,
            military_spending DOUBLE PRECISION,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_cities_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cities (
            city_id SERIAL PRIMARY KEY,
            country_id INTEGER REFERENCES countries(country_id),
            name VARCHAR(100) NOT NULL,
            is_capital BOOLEAN,
            description VARCHAR(250),
            interesting_fact VARCHAR(250),
            area_sq_mile DOUBLE PRECISION,
            area_sq_km DOUBLE PRECISION,
            population BIGINT,
            sci_score DOUBLE PRECISION,
            sci_rank INTEGER,
            numbeo_si DOUBLE PRECISION,
            numbeo_ci DOUBLE PRECISION,
            airport_code VARCHAR(3),
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            CONSTRAINT cities_country_id_name_key UNIQUE (country_id, name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_glossary_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS glossary (
            glossary_id SERIAL PRIMARY KEY,
            entry VARCHAR(50) NOT NULL UNIQUE,
            meaning TEXT NOT NULL,
            range VARCHAR(25),
            interpretation VARCHAR(25),
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
