//! Upserts for extracted facts
//!
//! Each write runs in its own transaction. A failed statement drops the
//! transaction, which rolls it back, and the error is returned.
//! Provenance (`ai_model_id`) is overwritten on every upsert so a row always
//! names the model that produced its current values.

use crate::models::{CityInfo, ContinentInfo, CountryInfo, ModelIdentity};
use sqlx::PgPool;

/// Insert or touch an ai_models row; returns `ai_model_id`
pub async fn upsert_ai_model(pool: &PgPool, identity: &ModelIdentity) -> Result<i32, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let ai_model_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO ai_models (model_provider, model_name)
        VALUES ($1, $2)
        ON CONFLICT (model_provider, model_name) DO UPDATE SET
            updated_at = now()
        RETURNING ai_model_id
        "#,
    )
    .bind(&identity.model_provider)
    .bind(&identity.model_name)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        ai_model_id,
        provider = %identity.model_provider,
        model = %identity.model_name,
        "Upserted ai_model"
    );
    Ok(ai_model_id)
}

/// Insert or update a continent keyed on `name`; returns `continent_id`
pub async fn upsert_continent(
    pool: &PgPool,
    name: &str,
    info: &ContinentInfo,
    ai_model_id: i32,
) -> Result<i32, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let continent_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO continents (
            name, description, area_sq_mile, area_sq_km, population, num_country, ai_model_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (name) DO UPDATE SET
            description = EXCLUDED.description,
            area_sq_mile = EXCLUDED.area_sq_mile,
            area_sq_km = EXCLUDED.area_sq_km,
            population = EXCLUDED.population,
            num_country = EXCLUDED.num_country,
            ai_model_id = EXCLUDED.ai_model_id,
            updated_at = now()
        RETURNING continent_id
        "#,
    )
    .bind(name)
    .bind(&info.description)
    .bind(info.area_sq_mile)
    .bind(info.area_sq_km)
    .bind(info.population)
    .bind(info.num_country)
    .bind(ai_model_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(continent_id, continent = name, "Upserted continent");
    Ok(continent_id)
}

/// Case-insensitive continent lookup
pub async fn get_continent_id(pool: &PgPool, name: &str) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar("SELECT continent_id FROM continents WHERE lower(name) = lower($1) LIMIT 1")
        .bind(name)
        .fetch_optional(pool)
        .await
}

/// Insert or update a country keyed on `name`; returns `country_id`
pub async fn upsert_country(
    pool: &PgPool,
    name: &str,
    info: &CountryInfo,
    ai_model_id: i32,
    continent_id: Option<i32>,
) -> Result<i32, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let country_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO countries (
            name, description, interesting_fact, area_sq_mile, area_sq_km, population,
            ppp, life_expectancy, travel_risk_level,
            global_peace_index_score, global_peace_index_rank,
            happiness_index_score, happiness_index_rank,
            gdp, gdp_growth_rate, inflation_rate, unemployment_rate, govt_debt,
            credit_rating, poverty_rate, gini_coefficient, military_spending,
            ai_model_id, continent_id
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
            $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24
        )
        ON CONFLICT (name) DO UPDATE SET
            description = EXCLUDED.description,
            interesting_fact = EXCLUDED.interesting_fact,
            area_sq_mile = EXCLUDED.area_sq_mile,
            area_sq_km = EXCLUDED.area_sq_km,
            population = EXCLUDED.population,
            ppp = EXCLUDED.ppp,
            life_expectancy = EXCLUDED.life_expectancy,
            travel_risk_level = EXCLUDED.travel_risk_level,
            global_peace_index_score = EXCLUDED.global_peace_index_score,
            global_peace_index_rank = EXCLUDED.global_peace_index_rank,
            happiness_index_score = EXCLUDED.happiness_index_score,
            happiness_index_rank = EXCLUDED.happiness_index_rank,
            gdp = EXCLUDED.gdp,
            gdp_growth_rate = EXCLUDED.gdp_growth_rate,
            inflation_rate = EXCLUDED.inflation_rate,
            unemployment_rate = EXCLUDED.unemployment_rate,
            govt_debt = EXCLUDED.govt_debt,
            credit_rating = EXCLUDED.credit_rating,
            poverty_rate = EXCLUDED.poverty_rate,
            gini_coefficient = EXCLUDED.gini_coefficient,
            military_spending = EXCLUDED.military_spending,
            ai_model_id = EXCLUDED.ai_model_id,
            continent_id = EXCLUDED.continent_id,
            updated_at = now()
        RETURNING country_id
        "#,
    )
    .bind(name)
    .bind(&info.description)
    .bind(&info.interesting_fact)
    .bind(info.area_sq_mile)
    .bind(info.area_sq_km)
    .bind(info.population)
    .bind(info.ppp)
    .bind(info.life_expectancy)
    .bind(&info.travel_risk_level)
    .bind(info.global_peace_index_score)
    .bind(info.global_peace_index_rank)
    .bind(info.happiness_index_score)
    .bind(info.happiness_index_rank)
    .bind(info.gdp)
    .bind(info.gdp_growth_rate)
    .bind(info.inflation_rate)
    .bind(info.unemployment_rate)
    .bind(info.govt_debt)
    .bind(&info.credit_rating)
    .bind(info.poverty_rate)
    .bind(info.gini_coefficient)
    .bind(info.military_spending)
    .bind(ai_model_id)
    .bind(continent_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(country_id, country = name, "Upserted country");
    Ok(country_id)
}

/// Insert or update a city keyed on `(country_id, name)`; returns `city_id`
pub async fn upsert_city(pool: &PgPool, city: &CityInfo, country_id: i32) -> Result<i32, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let city_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO cities (
            country_id, name, is_capital, description, interesting_fact,
            area_sq_mile, area_sq_km, population,
            sci_score, sci_rank, numbeo_si, numbeo_ci, airport_code
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        ON CONFLICT (country_id, name) DO UPDATE SET
            is_capital = EXCLUDED.is_capital,
            description = EXCLUDED.description,
            interesting_fact = EXCLUDED.interesting_fact,
            area_sq_mile = EXCLUDED.area_sq_mile,
            area_sq_km = EXCLUDED.area_sq_km,
            population = EXCLUDED.population,
            sci_score = EXCLUDED.sci_score,
            sci_rank = EXCLUDED.sci_rank,
            numbeo_si = EXCLUDED.numbeo_si,
            numbeo_ci = EXCLUDED.numbeo_ci,
            airport_code = EXCLUDED.airport_code,
            updated_at = now()
        RETURNING city_id
        "#,
    )
    .bind(country_id)
    .bind(&city.name)
    .bind(city.is_capital)
    .bind(&city.description)
    .bind(&city.interesting_fact)
    .bind(city.area_sq_mile)
    .bind(city.area_sq_km)
    .bind(city.population)
    .bind(city.sci_score)
    .bind(city.sci_rank)
    .bind(city.numbeo_si)
    .bind(city.numbeo_ci)
    .bind(&city.airport_code)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(city_id, city = %city.name, country_id, "Upserted city");
    Ok(city_id)
}
