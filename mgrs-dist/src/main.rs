//! Point d'entrée CLI pour mgrs-dist

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

use mgrs_dist::config::{DistanceUnit, OutputConfig};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::{Commands, DistanceArgs};

/// Calculer la distance géodésique entre deux coordonnées MGRS
#[derive(Parser)]
#[command(name = "mgrs-dist")]
#[command(author, version)]
#[command(about = "Compute the geodesic distance between two MGRS coordinates (WGS84)")]
#[command(long_about = "Converts MGRS references to WGS84 latitude/longitude and computes the Vincenty distance between them.\n\nBy default, takes two MGRS references and prints the distance. Use 'convert', 'batch' or 'to-geojson' for the other modes.")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Distance unit (défaut : env MGRS_DIST_UNIT / km)
    #[arg(long, global = true, value_enum)]
    unit: Option<DistanceUnit>,

    /// Decimal places (défaut : env MGRS_DIST_DECIMALS / 3)
    #[arg(long, global = true)]
    decimals: Option<u8>,

    /// Path to a JSON config file ({"unit": "km", "decimals": 3})
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sous-commande (défaut: distance entre deux références)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Arguments pour la distance (commande par défaut)
    #[command(flatten)]
    distance: Option<DistanceArgs>,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    let output = OutputConfig::resolve(cli.config.as_deref(), cli.unit, cli.decimals)?;
    debug!(unit = ?output.unit, decimals = output.decimals, "Output configuration");

    match cli.command {
        Some(Commands::Convert { mgrs, json }) => cli::cmd_convert(&mgrs, json)?,
        Some(Commands::Batch { path, output: report, jobs }) => {
            cli::cmd_batch(&path, report.as_deref(), jobs, &output)?
        }
        Some(Commands::ToGeojson { from, to, output: path }) => {
            cli::cmd_to_geojson(&from, &to, &path, &output)?
        }
        None => {
            // Commande par défaut: distance
            let args = cli
                .distance
                .context("Two MGRS references are required (FROM TO)")?;
            cli::cmd_distance(&args.from, &args.to, &output)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
