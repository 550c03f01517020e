//! geofacts-api - read-only REST service for continents, countries, cities,
//! AI model provenance and the glossary
//!
//! **Usage:**
//! ```bash
//! geofacts-api --port 8017
//! geofacts-api --config ./geofacts.toml --database-url postgresql://localhost/geofacts
//! ```

use anyhow::Result;
use clap::Parser;
use geofacts_api::{build_router, AppState};
use geofacts_common::config::{self, Settings, SettingsOverrides};
use geofacts_common::db;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "geofacts-api", version)]
#[command(about = "REST API over the geofacts database")]
struct Args {
    /// Bind address (overrides WEB_HOST and the config file)
    #[arg(long)]
    host: Option<String>,

    /// Port (overrides WEB_PORT and the config file)
    #[arg(long)]
    port: Option<u16>,

    /// PostgreSQL URL (overrides DATABASE_URL and the config file)
    #[arg(long, value_name = "URL")]
    database_url: Option<String>,

    /// Config file (default: $GEOFACTS_CONFIG or ~/.config/geofacts/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (overrides LOG_LEVEL and the config file)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    config::load_dotenv();
    let toml = config::load_toml_config(args.config.as_deref())?;
    let settings = Settings::resolve(
        &SettingsOverrides {
            host: args.host,
            port: args.port,
            database_url: args.database_url,
            log_level: args.log_level,
        },
        &toml,
    )?;

    config::init_tracing(&settings.log_level);
    config::log_config_source(&toml);

    info!(
        "Starting {} (geofacts-api) v{}",
        settings.app_name,
        env!("CARGO_PKG_VERSION")
    );

    // Serve even when the database is down; /api/v1/health reports it
    let pool = match db::connect(&settings.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            warn!("Database unavailable at startup: {}", e);
            db::connect_lazy(&settings.database_url)?
        }
    };

    let bind_address = settings.bind_address();
    let state = AppState::new(pool, settings);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("geofacts-api listening on http://{}", bind_address);
    info!("Health check: http://{}/api/v1/health", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
