//! Country and city facts via LLM structured output
//!
//! **Usage:**
//! ```bash
//! country-info Nigeria
//! country-info "South Africa" --skip-cities
//! country-info Brazil --provider anthropic
//! ```
//!
//! Without `--provider` the LLM assigned to the country in the countries
//! CSV is used.

use anyhow::bail;
use clap::Parser;
use geofacts_common::countries::CountryAssignments;
use geofacts_extract::cli::{finish, group_thousands, preview, CommonArgs, Context};
use geofacts_extract::pipeline::{process_country, resolve_country_target};
use geofacts_extract::providers::{create_provider, ProviderKind};
use geofacts_extract::retry::RetryPolicy;
use std::process::ExitCode;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "country-info", version)]
#[command(about = "Get country information using LLM structured output")]
struct Args {
    /// Name of the country to query
    country: String,

    /// LLM provider (default: auto-detect from the countries CSV)
    #[arg(long, value_enum)]
    provider: Option<ProviderKind>,

    /// Skip retrieving city information
    #[arg(long)]
    skip_cities: bool,

    #[command(flatten)]
    common: CommonArgs,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let ctx = Context::load(&args.common)?;

    let assignments = match CountryAssignments::load(&ctx.settings.countries_csv) {
        Ok(assignments) => assignments,
        Err(e) if args.provider.is_some() => {
            warn!("{} - continent will be NULL", e);
            CountryAssignments::default()
        }
        Err(e) => bail!("{} (pass --provider to run without it)", e),
    };

    let target = resolve_country_target(&args.country, args.provider, &assignments)?;
    let provider = create_provider(target.provider, &ctx.toml)?;
    let pool = ctx.connect().await?;
    let policy = RetryPolicy::from_settings(&ctx.settings);

    println!("\n=== Processing: {} ({}) ===\n", target.country, target.provider);
    let result = process_country(
        &pool,
        provider.as_ref(),
        &target.country,
        target.continent.as_deref(),
        args.skip_cities,
        &policy,
    )
    .await?;

    let info = &result.country;
    println!("    Description: {}", preview(&info.description, 50));
    println!("    Area (sq mi): {:.2}", info.area_sq_mile);
    println!("    Area (sq km): {:.2}", info.area_sq_km);
    println!("    Population: {}", group_thousands(info.population));
    println!("    GDP: ${:.0}", info.gdp);
    println!("    Life Expectancy: {:.1} years", info.life_expectancy);

    if !result.cities.is_empty() {
        println!("\n    Cities:");
        for city in &result.cities {
            let capital = if city.is_capital { " (capital)" } else { "" };
            println!(
                "    - {}{}: pop {}",
                city.name,
                capital,
                group_thousands(city.population)
            );
        }
    }

    println!("\n=== Complete ===");
    println!("    ai_model_id: {}", result.ai_model_id);
    match result.continent_id {
        Some(id) => println!("    continent_id: {}", id),
        None => println!("    continent_id: NULL"),
    }
    println!("    country_id: {}", result.country_id);
    if !args.skip_cities {
        println!("    city_ids: {:?}", result.city_ids);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    finish(run(Args::parse()).await)
}
