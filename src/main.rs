//! # Cellar Map CLI (`cellar`)
//!
//! Browse the wine catalog from the terminal or serve it over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! cellar [--config ./config/cellar.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cellar list` | List wines, optionally filtered |
//! | `cellar get <id>` | Show one wine with food pairings |
//! | `cellar facets` | List types, regions, and countries |
//! | `cellar stats` | Collection statistics |
//! | `cellar near <lat> <lng>` | Wines closest to a point |
//! | `cellar distance <lat1> <lng1> <lat2> <lng2>` | Great-circle distance |
//! | `cellar validate` | Check the dataset loads cleanly |
//! | `cellar serve` | Start the JSON HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Favourite reds from France
//! cellar list --type red --favorite true --country france
//!
//! # Anything mentioning cherry, as JSON
//! cellar list --keyword cherry --json
//!
//! # Serve the API on the configured address
//! cellar serve --config ./config/cellar.toml
//! ```

use cellar_map::config;
use cellar_map::facets::run_facets;
use cellar_map::geo::{run_distance, run_near};
use cellar_map::get::run_get;
use cellar_map::models::{FilterCriteria, WineType};
use cellar_map::search::run_search;
use cellar_map::server::run_server;
use cellar_map::stats::run_stats;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "./config/cellar.toml";

/// Cellar Map — a static wine-collection catalog.
///
/// Every command reads the bundled dataset (or the one named in the
/// config file) and never writes anything.
#[derive(Parser)]
#[command(
    name = "cellar",
    about = "Cellar Map — browse a wine collection from the terminal or over HTTP",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/cellar.toml`. When that file does not exist,
    /// built-in defaults and the embedded dataset are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List wines matching every given filter.
    List {
        /// Wine type: red, white, rosé, sparkling, dessert, fortified.
        #[arg(long = "type")]
        wine_type: Option<WineType>,

        /// Only favourites (`true`) or only non-favourites (`false`).
        #[arg(long)]
        favorite: Option<bool>,

        /// Case-insensitive substring of the region.
        #[arg(long)]
        region: Option<String>,

        /// Case-insensitive substring of the country.
        #[arg(long)]
        country: Option<String>,

        /// Free text matched against name, notes, winery, region, country,
        /// aromas, varietals, and tags.
        #[arg(long)]
        keyword: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show one wine by id.
    ///
    /// Exits with status 1 if no wine has that id.
    Get {
        id: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List the wine types, regions, and countries in the catalog.
    Facets,

    /// Show collection statistics.
    Stats {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List the wines closest to a point.
    Near {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lng: f64,

        /// Maximum number of wines to show.
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },

    /// Great-circle distance between two points, in kilometres.
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },

    /// Load and validate the dataset.
    Validate,

    /// Start the JSON HTTP server.
    ///
    /// Binds to the address configured in `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Commands that don't need the dataset
    if let Commands::Distance {
        lat1,
        lng1,
        lat2,
        lng2,
    } = cli.command
    {
        return run_distance(lat1, lng1, lat2, lng2);
    }

    let explicit = cli.config.is_some();
    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let cfg = config::load_or_default(&config_path, explicit)?;
    let catalog = cfg.load_catalog()?;

    match cli.command {
        Commands::List {
            wine_type,
            favorite,
            region,
            country,
            keyword,
            json,
        } => {
            let criteria = FilterCriteria {
                wine_type,
                favorite,
                region,
                country,
                keyword,
            };
            run_search(&catalog, &criteria, json)?;
        }
        Commands::Get { id, json } => {
            run_get(&catalog, &id, json)?;
        }
        Commands::Facets => {
            run_facets(&catalog)?;
        }
        Commands::Stats { json } => {
            run_stats(&catalog, json)?;
        }
        Commands::Near { lat, lng, limit } => {
            run_near(&catalog, lat, lng, limit)?;
        }
        Commands::Validate => {
            println!("Dataset OK: {} wines.", catalog.len());
        }
        Commands::Serve => {
            run_server(&cfg, catalog).await?;
        }
        Commands::Distance { .. } => {
            // Handled above (before dataset loading)
            unreachable!()
        }
    }

    Ok(())
}
