//! Schema and glossary tests against a live PostgreSQL
//!
//! Skipped unless TEST_DATABASE_URL points at a disposable database.
//! Each test drops and recreates the schema, so they run serially.

use geofacts_common::db::{
    count_rows, drop_all_tables, get_schema_version, init_database, table_exists,
    CURRENT_SCHEMA_VERSION,
};
use geofacts_common::glossary::{upsert_glossary_entries, GlossaryEntry};
use serial_test::serial;
use sqlx::PgPool;

async fn fresh_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set - skipping");
        return None;
    };
    let pool = geofacts_common::db::connect(&url).await.ok()?;
    drop_all_tables(&pool).await.ok()?;
    init_database(&pool).await.ok()?;
    Some(pool)
}

#[tokio::test]
#[serial]
async fn test_init_creates_tables_at_current_version() {
    let Some(pool) = fresh_pool().await else { return };

    for table in ["ai_models", "continents", "countries", "cities", "glossary"] {
        assert!(table_exists(&pool, table).await.unwrap(), "{} missing", table);
    }
    assert_eq!(get_schema_version(&pool).await.unwrap(), CURRENT_SCHEMA_VERSION);

    // Second run is a no-op
    init_database(&pool).await.unwrap();
    assert_eq!(get_schema_version(&pool).await.unwrap(), CURRENT_SCHEMA_VERSION);
}

#[tokio::test]
#[serial]
async fn test_count_rows_rejects_unknown_table() {
    let Some(pool) = fresh_pool().await else { return };

    assert_eq!(count_rows(&pool, "countries").await.unwrap(), 0);
    assert!(count_rows(&pool, "pg_user; DROP TABLE countries").await.is_err());
}

#[tokio::test]
#[serial]
async fn test_glossary_upsert_updates_existing_entry() {
    let Some(pool) = fresh_pool().await else { return };

    let mut entry = GlossaryEntry {
        entry: "PPP".to_string(),
        meaning: "Purchasing power parity".to_string(),
        range: None,
        interpretation: None,
    };
    assert_eq!(upsert_glossary_entries(&pool, &[entry.clone()]).await.unwrap(), 1);

    entry.meaning = "GDP per capita at purchasing power parity".to_string();
    upsert_glossary_entries(&pool, &[entry]).await.unwrap();

    assert_eq!(count_rows(&pool, "glossary").await.unwrap(), 1);
    let meaning: String = sqlx::query_scalar("SELECT meaning FROM glossary WHERE entry = 'PPP'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(meaning, "GDP per capita at purchasing power parity");
}

#[tokio::test]
#[serial]
async fn test_glossary_over_long_row_writes_nothing() {
    let Some(pool) = fresh_pool().await else { return };

    let entries = [
        GlossaryEntry {
            entry: "GDP".to_string(),
            meaning: "Gross domestic product".to_string(),
            range: None,
            interpretation: None,
        },
        GlossaryEntry {
            entry: "Unemployment".to_string(),
            meaning: "Share of the labour force without work".to_string(),
            range: Some("0-100 percent of the labour force".to_string()),
            interpretation: None,
        },
    ];

    let err = upsert_glossary_entries(&pool, &entries).await.unwrap_err();
    assert!(err.to_string().contains("'Unemployment': 'range'"));
    assert_eq!(count_rows(&pool, "glossary").await.unwrap(), 0);
}
