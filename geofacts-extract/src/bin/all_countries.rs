//! Batch run over every country assigned to one LLM
//!
//! **Usage:**
//! ```bash
//! all-countries --provider cohere --dry-run
//! all-countries --provider mistral --continent Africa --skip-cities
//! ```
//!
//! Countries are processed one at a time. A failed country is recorded and
//! the run continues; the exit code is 1 if any country failed.

use clap::Parser;
use geofacts_common::countries::CountryAssignments;
use geofacts_extract::cli::{finish, CommonArgs, Context};
use geofacts_extract::pipeline::process_country;
use geofacts_extract::providers::{create_provider, ProviderKind};
use geofacts_extract::retry::RetryPolicy;
use std::process::ExitCode;
use std::time::Instant;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "all-countries", version)]
#[command(about = "Process every country assigned to an LLM in the countries CSV")]
struct Args {
    /// LLM whose assigned countries are processed
    #[arg(long, value_enum)]
    provider: ProviderKind,

    /// Skip retrieving city information
    #[arg(long)]
    skip_cities: bool,

    /// List the countries without calling the LLM
    #[arg(long)]
    dry_run: bool,

    /// Only countries on this continent
    #[arg(long)]
    continent: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
struct Summary {
    successful: usize,
    failed: Vec<(String, String)>,
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let ctx = Context::load(&args.common)?;
    let assignments = CountryAssignments::load(&ctx.settings.countries_csv)?;

    let mut countries: Vec<String> = assignments
        .countries_by_llm(args.provider.display_name())?
        .to_vec();

    if let Some(continent) = &args.continent {
        let on_continent = assignments.countries_by_continent(continent)?;
        countries.retain(|c| on_continent.contains(c));
    }

    println!(
        "\n=== {} countries assigned to {} ===\n",
        countries.len(),
        args.provider
    );
    for (i, country) in countries.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, country);
    }

    if args.dry_run {
        println!("\n[DRY RUN] No LLM calls made");
        return Ok(true);
    }

    let provider = create_provider(args.provider, &ctx.toml)?;
    let pool = ctx.connect().await?;
    let policy = RetryPolicy::from_settings(&ctx.settings);

    let start = Instant::now();
    let mut summary = Summary::default();
    let total = countries.len();

    for (i, country) in countries.iter().enumerate() {
        println!("\n[{}/{}] {}", i + 1, total, country);

        let continent = assignments
            .country_info(country)
            .ok()
            .map(|a| a.continent.clone());

        match process_country(
            &pool,
            provider.as_ref(),
            country,
            continent.as_deref(),
            args.skip_cities,
            &policy,
        )
        .await
        {
            Ok(result) => {
                println!(
                    "    [OK] country_id={} cities={}",
                    result.country_id,
                    result.city_ids.len()
                );
                summary.successful += 1;
            }
            Err(e) => {
                error!(country = %country, error = %e, "Country failed");
                println!("    [X] {}", e);
                summary.failed.push((country.clone(), e.to_string()));
            }
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    let average = if total > 0 { elapsed / total as f64 } else { 0.0 };

    println!("\n=== Summary ===");
    println!("    Total: {}", total);
    println!("    Successful: {}", summary.successful);
    println!("    Failed: {}", summary.failed.len());
    println!("    Elapsed: {:.1}s ({:.1}s per country)", elapsed, average);

    if !summary.failed.is_empty() {
        println!("\n    Failed countries:");
        for (country, reason) in &summary.failed {
            println!("    - {}: {}", country, reason);
        }
    }

    Ok(summary.failed.is_empty())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => finish(Err(e)),
    }
}
