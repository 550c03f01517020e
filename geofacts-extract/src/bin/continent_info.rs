//! Continent facts via LLM structured output
//!
//! **Usage:**
//! ```bash
//! continent-info Africa
//! continent-info "North America" --provider google
//! ```

use anyhow::bail;
use clap::Parser;
use geofacts_extract::cli::{finish, group_thousands, preview, CommonArgs, Context};
use geofacts_extract::pipeline::{process_continent, validate_continent_name};
use geofacts_extract::providers::{create_provider, ProviderKind};
use geofacts_extract::retry::RetryPolicy;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "continent-info", version)]
#[command(about = "Get continent information using LLM structured output")]
#[command(after_help = "Valid continents: Africa, Antarctica, Asia, Europe, North America, Oceania, South America")]
struct Args {
    /// Name of the continent to query
    continent: String,

    /// Skip continent name validation
    #[arg(long)]
    skip_validation: bool,

    /// LLM provider (openai, google, groq or mistral)
    #[arg(long, value_enum, default_value = "openai")]
    provider: ProviderKind,

    #[command(flatten)]
    common: CommonArgs,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let ctx = Context::load(&args.common)?;

    if !args.provider.supports_continent() {
        bail!(
            "{} does not support continent queries (use openai, google, groq or mistral)",
            args.provider
        );
    }

    let continent = validate_continent_name(&args.continent, args.skip_validation)?;

    let provider = create_provider(args.provider, &ctx.toml)?;
    let pool = ctx.connect().await?;
    let policy = RetryPolicy::from_settings(&ctx.settings);

    println!("\n=== Processing: {} ===\n", continent);
    let result = process_continent(&pool, provider.as_ref(), &continent, &policy).await?;

    let info = &result.continent;
    println!("    Description: {}", preview(&info.description, 50));
    println!("    Area (sq mi): {:.2}", info.area_sq_mile);
    println!("    Area (sq km): {:.2}", info.area_sq_km);
    println!("    Population: {}", group_thousands(info.population));
    println!("    Countries: {}", info.num_country);

    println!("\n=== Complete ===");
    println!("    ai_model_id: {}", result.ai_model_id);
    println!("    continent_id: {}", result.continent_id);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    finish(run(Args::parse()).await)
}
