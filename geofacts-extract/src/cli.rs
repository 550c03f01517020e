//! Shared setup for the command-line tools

use anyhow::Context as _;
use clap::Args;
use geofacts_common::config::{self, ExtractionSettings, TomlConfig};
use sqlx::PgPool;
use std::path::PathBuf;
use std::process::ExitCode;

/// Options every tool accepts
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Config file (default: $GEOFACTS_CONFIG or ~/.config/geofacts/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// PostgreSQL URL (overrides DATABASE_URL and the config file)
    #[arg(long, value_name = "URL")]
    pub database_url: Option<String>,
}

/// Loaded configuration for one tool run
pub struct Context {
    pub toml: TomlConfig,
    pub settings: ExtractionSettings,
}

impl Context {
    /// `.env`, layered config, then tracing at the resolved level
    pub fn load(args: &CommonArgs) -> anyhow::Result<Self> {
        config::load_dotenv();
        let toml = config::load_toml_config(args.config.as_deref())?;

        config::init_tracing(&config::resolve_log_level(None, &toml));
        config::log_config_source(&toml);

        let settings = ExtractionSettings::resolve(args.database_url.as_deref(), &toml);
        Ok(Self { toml, settings })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        geofacts_common::db::connect(&self.settings.database_url)
            .await
            .context("Failed to connect to database")
    }
}

/// Print `[X] Error: <msg>` and map to the process exit code
pub fn finish(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n[X] Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Truncate for console display on a character boundary
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

/// `1234567` → `1,234,567`
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(223_800_000), "223,800,000");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 50), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
    }
}
