//! Définition et implémentation des commandes CLI
//!
//! - défaut : distance entre deux références MGRS
//! - `convert` : MGRS -> latitude/longitude
//! - `batch` : distances pour un fichier de paires
//! - `to-geojson` : export GeoJSON du segment

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use mgrs::{convert_mgrs_to_geodetic, geodesic_distance_meters, GeodeticCoordinate};
use mgrs_dist::config::OutputConfig;
use mgrs_dist::export::geojson::{export_to_geojson, NamedPoint};
use mgrs_dist::report::{BatchReport, PairError, PairResult};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert MGRS references to WGS84 latitude/longitude
    Convert {
        /// MGRS references (e.g. 52SCH456178)
        #[arg(required = true)]
        mgrs: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute distances for every pair listed in a file (one "FROM TO" per line)
    Batch {
        /// Path to the pairs file
        #[arg(short, long)]
        path: PathBuf,

        /// Save the report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of worker threads
        #[arg(long, alias = "threads")]
        jobs: Option<usize>,
    },

    /// Export both points and the connecting segment to GeoJSON
    ToGeojson {
        /// First MGRS reference
        #[arg(long)]
        from: String,

        /// Second MGRS reference
        #[arg(long)]
        to: String,

        /// Output GeoJSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Arguments de la commande par défaut
#[derive(Args)]
pub struct DistanceArgs {
    /// First MGRS reference (quote it if it contains spaces)
    pub from: String,

    /// Second MGRS reference
    pub to: String,
}

/// Convertit une référence en précisant laquelle a échoué
fn convert_labeled(label: &str, mgrs: &str) -> Result<GeodeticCoordinate> {
    convert_mgrs_to_geodetic(mgrs).with_context(|| format!("{} coordinate '{}'", label, mgrs))
}

/// Exécute la commande par défaut : distance entre deux références
pub fn cmd_distance(from: &str, to: &str, output: &OutputConfig) -> Result<()> {
    let p1 = convert_labeled("First", from)?;
    let p2 = convert_labeled("Second", to)?;

    let distance = geodesic_distance_meters(p1, p2);
    info!(from, to, distance_m = distance, "Distance computed");

    println!("Distance: {}", output.format_distance(distance));
    Ok(())
}

/// Ligne de sortie de la commande convert
#[derive(Debug, Serialize)]
struct ConvertOutput {
    mgrs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Exécute la commande convert
pub fn cmd_convert(inputs: &[String], json: bool) -> Result<()> {
    let outputs: Vec<ConvertOutput> = inputs
        .iter()
        .map(|mgrs| match convert_mgrs_to_geodetic(mgrs) {
            Ok(geo) => ConvertOutput {
                mgrs: mgrs.clone(),
                latitude: Some(geo.latitude),
                longitude: Some(geo.longitude),
                error: None,
            },
            Err(e) => ConvertOutput {
                mgrs: mgrs.clone(),
                latitude: None,
                longitude: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else {
        for out in &outputs {
            match (&out.error, out.latitude, out.longitude) {
                (Some(err), _, _) => println!("{}: {}", out.mgrs, err),
                (None, Some(lat), Some(lon)) => println!("{}: {:.7}, {:.7}", out.mgrs, lat, lon),
                _ => {}
            }
        }
    }

    let failed = outputs.iter().filter(|o| o.error.is_some()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} conversions failed", failed, outputs.len());
    }
    Ok(())
}

/// Découpe une ligne de fichier de paires
///
/// Séparateurs acceptés : virgule, point-virgule, tabulation, ou espaces
/// (dans ce dernier cas, exactement deux références sans espace interne).
/// Retourne `None` pour les lignes vides et les commentaires (`#`).
pub fn parse_pair_line(line: &str) -> Option<Result<(String, String), String>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let fields: Vec<&str> = if line.contains([',', ';', '\t']) {
        line.split([',', ';', '\t']).map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    };

    Some(match fields.as_slice() {
        [from, to] if !from.is_empty() && !to.is_empty() => Ok((from.to_string(), to.to_string())),
        _ => Err(format!("Expected two MGRS references, got {} fields", fields.len())),
    })
}

fn compute_pair(line: usize, raw: &str, from: &str, to: &str) -> Result<PairResult, PairError> {
    let fail = |message: String| PairError {
        line,
        input: raw.to_string(),
        message,
    };

    let p1 = convert_mgrs_to_geodetic(from).map_err(|e| fail(e.to_string()))?;
    let p2 = convert_mgrs_to_geodetic(to).map_err(|e| fail(e.to_string()))?;

    Ok(PairResult {
        line,
        from: from.to_string(),
        to: to.to_string(),
        from_lat: p1.latitude,
        from_lon: p1.longitude,
        to_lat: p2.latitude,
        to_lon: p2.longitude,
        distance_m: geodesic_distance_meters(p1, p2),
    })
}

/// Calcule toutes les paires d'un contenu texte
pub fn run_batch(source: &str, content: &str) -> BatchReport {
    let mut report = BatchReport::new(source);

    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .collect();

    let outcomes: Vec<Result<PairResult, PairError>> = lines
        .par_iter()
        .filter_map(|&(line, raw)| {
            parse_pair_line(raw).map(|parsed| match parsed {
                Ok((from, to)) => compute_pair(line, raw.trim(), &from, &to),
                Err(message) => Err(PairError {
                    line,
                    input: raw.trim().to_string(),
                    message,
                }),
            })
        })
        .collect();

    for outcome in outcomes {
        match outcome {
            Ok(result) => report.record_result(result),
            Err(error) => {
                debug!(line = error.line, error = %error.message, "Pair skipped");
                report.record_error(error);
            }
        }
    }

    report.finalize();
    report
}

/// Exécute la commande batch
pub fn cmd_batch(
    path: &Path,
    output_path: Option<&Path>,
    jobs: Option<usize>,
    output: &OutputConfig,
) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read pairs file {}", path.display()))?;

    let jobs = jobs.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    });
    info!(path = %path.display(), jobs, "Starting batch");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to build thread pool")?;

    let start = Instant::now();
    let mut report = pool.install(|| run_batch(&path.display().to_string(), &content));
    report.set_duration(start.elapsed());

    report.display(output);

    if let Some(output_path) = output_path {
        report
            .save_to_file(output_path)
            .with_context(|| format!("Cannot write report {}", output_path.display()))?;
        println!("Report saved to {}", output_path.display());
    }

    if report.pairs_failed > 0 {
        warn!("{}", report.summary());
    }

    Ok(())
}

/// Exécute la commande to-geojson
pub fn cmd_to_geojson(from: &str, to: &str, output_path: &Path, output: &OutputConfig) -> Result<()> {
    let start = NamedPoint {
        mgrs: from.to_string(),
        position: convert_labeled("First", from)?,
    };
    let end = NamedPoint {
        mgrs: to.to_string(),
        position: convert_labeled("Second", to)?,
    };

    let distance = geodesic_distance_meters(start.position, end.position);
    export_to_geojson(&start, &end, distance, output_path)?;

    println!(
        "Exported {} -> {} ({}) to {}",
        from,
        to,
        output.format_distance(distance),
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mgrs_dist::report::BatchStatus;

    #[test]
    fn test_parse_pair_line_separators() {
        assert_eq!(
            parse_pair_line("52SCH456178 52SCH100400"),
            Some(Ok(("52SCH456178".to_string(), "52SCH100400".to_string())))
        );
        assert_eq!(
            parse_pair_line("52S CH 456 178, 52S CH 100 400"),
            Some(Ok(("52S CH 456 178".to_string(), "52S CH 100 400".to_string())))
        );
        assert_eq!(
            parse_pair_line("52SCH456178;52SCH100400"),
            Some(Ok(("52SCH456178".to_string(), "52SCH100400".to_string())))
        );
    }

    #[test]
    fn test_parse_pair_line_skips() {
        assert_eq!(parse_pair_line(""), None);
        assert_eq!(parse_pair_line("   "), None);
        assert_eq!(parse_pair_line("# commentaire"), None);
    }

    #[test]
    fn test_parse_pair_line_invalid() {
        assert!(matches!(parse_pair_line("52SCH456178"), Some(Err(_))));
        assert!(matches!(parse_pair_line("a b c"), Some(Err(_))));
        assert!(matches!(parse_pair_line("52SCH456178,"), Some(Err(_))));
    }

    #[test]
    fn test_run_batch() {
        let content = "# paires de test\n\
                       52SCH456178 52SCH100400\n\
                       \n\
                       52SCH456178 52SIH100400\n\
                       52SCH456178,52SCH456178\n";

        let report = run_batch("inline", content);
        assert_eq!(report.pairs_computed, 2);
        assert_eq!(report.pairs_failed, 1);
        assert_eq!(report.status, BatchStatus::PartialSuccess);

        assert_eq!(report.results[0].line, 2);
        assert!((report.results[0].distance_m - 41956.143).abs() < 0.1);
        assert_eq!(report.results[1].distance_m, 0.0);
        assert_eq!(report.errors[0].line, 4);
        assert!(report.errors[0].message.contains("Invalid MGRS format"));
    }

    #[test]
    fn test_convert_labeled_reports_which_input() {
        let err = convert_labeled("Second", "52SCH4").unwrap_err();
        assert!(format!("{:#}", err).contains("Second coordinate '52SCH4'"));
    }
}
