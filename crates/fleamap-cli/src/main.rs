mod backfill;
mod resolve;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use fleamap_geocoder::Geocoder;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fleamap-cli")]
#[command(about = "Fleamap geocoding command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve one location and print the coordinate as JSON
    Resolve {
        /// Free-text location, e.g. "관악구 조원동 새숲어린이공원 일대"
        location: String,
        /// Event title used to mine a building name when the location fails
        #[arg(long)]
        market_name: Option<String>,
    },
    /// Fill in missing coordinates for a JSON list of markets
    Backfill {
        /// JSON array of `{id, market_name, place, lat, lng}` records
        #[arg(long)]
        input: PathBuf,
        /// Where to write the updated list (defaults to overwriting `--input`)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Where to write markets that could not be geocoded
        #[arg(long, default_value = "geocoding_failures.json")]
        failures: PathBuf,
        /// Pause between geocoding calls (defaults to `FLEAMAP_BATCH_DELAY_MS`)
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Report what would be geocoded without calling the provider
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("fleamap-cli: pass a subcommand (resolve, backfill); see --help");
        return Ok(());
    };

    let config = fleamap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let geocoder = Geocoder::from_app_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build geocoder: {e}"))?;

    match command {
        Commands::Resolve {
            location,
            market_name,
        } => resolve::run_resolve(&geocoder, &location, market_name.as_deref()).await,
        Commands::Backfill {
            input,
            output,
            failures,
            delay_ms,
            dry_run,
        } => {
            let options = backfill::BackfillOptions {
                output: output.unwrap_or_else(|| input.clone()),
                input,
                failures,
                delay: Duration::from_millis(delay_ms.unwrap_or(config.batch_delay_ms)),
                dry_run,
            };
            backfill::run_backfill(&geocoder, &options).await
        }
    }
}
