//! Schema management for the geofacts database
//!
//! **Usage:**
//! ```bash
//! geofacts-db init
//! geofacts-db status
//! geofacts-db drop --yes
//! ```

use anyhow::bail;
use clap::{Parser, Subcommand};
use geofacts_common::db::{
    count_rows, drop_all_tables, get_schema_version, init_database, table_exists,
    CURRENT_SCHEMA_VERSION, TABLES,
};
use geofacts_extract::cli::{finish, CommonArgs, Context};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "geofacts-db", version)]
#[command(about = "Create, inspect or drop the geofacts schema")]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create missing tables and run pending migrations
    Init,
    /// Show tables, row counts and schema version
    Status,
    /// Drop every geofacts table
    Drop {
        /// Confirm permanent deletion
        #[arg(long)]
        yes: bool,
    },
}

async fn run(args: Args) -> anyhow::Result<()> {
    let ctx = Context::load(&args.common)?;
    let pool = ctx.connect().await?;

    match args.command {
        Command::Init => {
            init_database(&pool).await?;
            println!(
                "[OK] Schema ready (version {})",
                get_schema_version(&pool).await?
            );
        }
        Command::Status => {
            let version = get_schema_version(&pool).await?;
            println!("Schema version: {} (current: {})", version, CURRENT_SCHEMA_VERSION);
            for table in TABLES {
                if table_exists(&pool, table).await? {
                    println!("  {:<12} {:>8} rows", table, count_rows(&pool, table).await?);
                } else {
                    println!("  {:<12} missing", table);
                }
            }
        }
        Command::Drop { yes } => {
            if !yes {
                bail!("Refusing to drop tables without --yes");
            }
            drop_all_tables(&pool).await?;
            println!("[OK] All geofacts tables dropped");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    finish(run(Args::parse()).await)
}
