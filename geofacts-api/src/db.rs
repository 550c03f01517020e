//! Read queries behind the REST endpoints
//!
//! Name lookups compare `lower(column) = lower($1)`: case-insensitive and
//! exact, so `%` and `_` in user input match only themselves.

use geofacts_common::db::{AiModel, City, Continent, Country, GlossaryRow};
use sqlx::PgPool;

pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

// Continents

pub async fn list_continents(pool: &PgPool) -> Result<Vec<Continent>, sqlx::Error> {
    sqlx::query_as::<_, Continent>("SELECT * FROM continents ORDER BY continent_id")
        .fetch_all(pool)
        .await
}

pub async fn get_continent(pool: &PgPool, id: i32) -> Result<Option<Continent>, sqlx::Error> {
    sqlx::query_as::<_, Continent>("SELECT * FROM continents WHERE continent_id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_continent_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<Continent>, sqlx::Error> {
    sqlx::query_as::<_, Continent>(
        "SELECT * FROM continents WHERE lower(name) = lower($1) ORDER BY continent_id LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

// Countries

pub async fn list_countries(pool: &PgPool) -> Result<Vec<Country>, sqlx::Error> {
    sqlx::query_as::<_, Country>("SELECT * FROM countries ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn get_country(pool: &PgPool, id: i32) -> Result<Option<Country>, sqlx::Error> {
    sqlx::query_as::<_, Country>("SELECT * FROM countries WHERE country_id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_country_by_name(pool: &PgPool, name: &str) -> Result<Option<Country>, sqlx::Error> {
    sqlx::query_as::<_, Country>(
        "SELECT * FROM countries WHERE lower(name) = lower($1) ORDER BY country_id LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn countries_by_continent_id(
    pool: &PgPool,
    continent_id: i32,
) -> Result<Vec<Country>, sqlx::Error> {
    sqlx::query_as::<_, Country>("SELECT * FROM countries WHERE continent_id = $1 ORDER BY name")
        .bind(continent_id)
        .fetch_all(pool)
        .await
}

pub async fn countries_by_continent_name(
    pool: &PgPool,
    continent: &str,
) -> Result<Vec<Country>, sqlx::Error> {
    sqlx::query_as::<_, Country>(
        r#"
        SELECT co.* FROM countries co
        JOIN continents ct ON co.continent_id = ct.continent_id
        WHERE lower(ct.name) = lower($1)
        ORDER BY co.name
        "#,
    )
    .bind(continent)
    .fetch_all(pool)
    .await
}

pub async fn countries_by_model_id(
    pool: &PgPool,
    ai_model_id: i32,
) -> Result<Vec<Country>, sqlx::Error> {
    sqlx::query_as::<_, Country>("SELECT * FROM countries WHERE ai_model_id = $1 ORDER BY name")
        .bind(ai_model_id)
        .fetch_all(pool)
        .await
}

/// Countries whose facts came from any model of `provider`
pub async fn countries_by_model_provider(
    pool: &PgPool,
    provider: &str,
) -> Result<Vec<Country>, sqlx::Error> {
    sqlx::query_as::<_, Country>(
        r#"
        SELECT co.* FROM countries co
        JOIN ai_models m ON co.ai_model_id = m.ai_model_id
        WHERE lower(m.model_provider) = lower($1)
        ORDER BY co.name
        "#,
    )
    .bind(provider)
    .fetch_all(pool)
    .await
}

// Cities

pub async fn list_cities(pool: &PgPool) -> Result<Vec<City>, sqlx::Error> {
    sqlx::query_as::<_, City>("SELECT * FROM cities ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn get_city(pool: &PgPool, id: i32) -> Result<Option<City>, sqlx::Error> {
    sqlx::query_as::<_, City>("SELECT * FROM cities WHERE city_id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// First match by id; city names are only unique per country
pub async fn get_city_by_name(pool: &PgPool, name: &str) -> Result<Option<City>, sqlx::Error> {
    sqlx::query_as::<_, City>("SELECT * FROM cities WHERE lower(name) = lower($1) ORDER BY city_id LIMIT 1")
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub async fn cities_by_country_id(pool: &PgPool, country_id: i32) -> Result<Vec<City>, sqlx::Error> {
    sqlx::query_as::<_, City>("SELECT * FROM cities WHERE country_id = $1 ORDER BY name")
        .bind(country_id)
        .fetch_all(pool)
        .await
}

pub async fn cities_by_country_name(pool: &PgPool, country: &str) -> Result<Vec<City>, sqlx::Error> {
    sqlx::query_as::<_, City>(
        r#"
        SELECT ci.* FROM cities ci
        JOIN countries co ON ci.country_id = co.country_id
        WHERE lower(co.name) = lower($1)
        ORDER BY ci.name
        "#,
    )
    .bind(country)
    .fetch_all(pool)
    .await
}

// AI models

pub async fn list_ai_models(pool: &PgPool) -> Result<Vec<AiModel>, sqlx::Error> {
    sqlx::query_as::<_, AiModel>("SELECT * FROM ai_models ORDER BY ai_model_id")
        .fetch_all(pool)
        .await
}

pub async fn get_ai_model(pool: &PgPool, id: i32) -> Result<Option<AiModel>, sqlx::Error> {
    sqlx::query_as::<_, AiModel>("SELECT * FROM ai_models WHERE ai_model_id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

// Glossary

pub async fn list_glossary(pool: &PgPool) -> Result<Vec<GlossaryRow>, sqlx::Error> {
    sqlx::query_as::<_, GlossaryRow>("SELECT * FROM glossary ORDER BY entry")
        .fetch_all(pool)
        .await
}

pub async fn get_glossary_entry(pool: &PgPool, id: i32) -> Result<Option<GlossaryRow>, sqlx::Error> {
    sqlx::query_as::<_, GlossaryRow>("SELECT * FROM glossary WHERE glossary_id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_glossary_by_entry(
    pool: &PgPool,
    entry: &str,
) -> Result<Option<GlossaryRow>, sqlx::Error> {
    sqlx::query_as::<_, GlossaryRow>(
        "SELECT * FROM glossary WHERE lower(entry) = lower($1) ORDER BY glossary_id LIMIT 1",
    )
    .bind(entry)
    .fetch_optional(pool)
    .await
}
