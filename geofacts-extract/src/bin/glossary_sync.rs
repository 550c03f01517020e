//! Load the glossary CSV into the `glossary` table
//!
//! **Usage:**
//! ```bash
//! glossary-sync [--dry-run]
//! ```

use clap::Parser;
use geofacts_common::glossary::{upsert_glossary_entries, Glossary};
use geofacts_extract::cli::{finish, preview, CommonArgs, Context};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "glossary-sync", version)]
#[command(about = "Upsert glossary CSV entries into the database")]
struct Args {
    /// Print the entries without writing to the database
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    common: CommonArgs,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let ctx = Context::load(&args.common)?;
    let glossary = Glossary::load(&ctx.settings.glossary_csv)?;

    println!(
        "\n=== {} glossary entries from {} ===\n",
        glossary.entries().len(),
        ctx.settings.glossary_csv.display()
    );

    if args.dry_run {
        for entry in glossary.entries() {
            println!("  {}: {}", entry.entry, preview(&entry.meaning, 60));
        }
        println!("\n[DRY RUN] Database not modified");
        return Ok(());
    }

    let pool = ctx.connect().await?;
    let written = upsert_glossary_entries(&pool, glossary.entries()).await?;
    println!("    Upserted {} entries", written);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    finish(run(Args::parse()).await)
}
