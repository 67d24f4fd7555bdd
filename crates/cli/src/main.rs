//! Terratab CLI - Land-use cross-tabulation toolkit

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use terratab_algorithms::{
    buffer_lines, rasterize, reclassify, zonal_histogram, BufferParams, RemapRule, RemapTable,
};
use terratab_core::io::{read_geotiff, read_line_layer, write_geotiff};
use terratab_report::{build_report, write_workbook, Workspace};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "terratab")]
#[command(author, version, about = "Land-use cross-tabulation toolkit", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a raster file
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// Reclassify a raster into categorical buckets
    Reclass {
        /// Input raster file
        input: PathBuf,
        /// Output file (i32 classes)
        output: PathBuf,
        /// Remap rules as "min max class;value class;min max NODATA;..."
        #[arg(long)]
        rules: String,
    },
    /// Rasterize a fixed-distance buffer around a line layer
    Buffer {
        /// Input line layer (GeoJSON)
        input: PathBuf,
        /// Template raster defining grid and georeferencing
        template: PathBuf,
        /// Output file (1 inside the buffer, no-data outside)
        output: PathBuf,
        /// Buffer distance in map units (default: 6 miles in metres)
        #[arg(short, long, default_value = "9656.064")]
        distance: f64,
        /// Segments approximating round joins
        #[arg(long, default_value = "16")]
        segments: usize,
    },
    /// Full land-use cross-tabulation: elevation bands and rail
    /// proximity to a multi-sheet workbook
    Crosstab {
        /// Elevation raster (feet)
        #[arg(long)]
        dem: PathBuf,
        /// Land-use raster (NLCD codes)
        #[arg(long)]
        landuse: PathBuf,
        /// Railroad line layer (GeoJSON)
        #[arg(long)]
        railroad: PathBuf,
        /// Workspace directory for intermediate rasters and tables
        #[arg(short, long)]
        workspace: PathBuf,
        /// Output workbook (.xlsx)
        output: PathBuf,
        /// Rail buffer distance in map units (default: 6 miles in metres)
        #[arg(short, long, default_value = "9656.064")]
        distance: f64,
    },
}

// ─── Remap tables ───────────────────────────────────────────────────────

/// Elevation bands: below sea level and up to 1000ft share class 1,
/// then 400ft bands to 2200ft. Sea level itself is unclassified.
fn elevation_remap() -> RemapTable {
    RemapTable::new(vec![
        RemapRule::Range { min: -9999.0, max: -1.0, class: 1 },
        RemapRule::NoData { min: 0.0, max: 0.0 },
        RemapRule::Range { min: 1.0, max: 1000.0, class: 1 },
        RemapRule::Range { min: 1001.0, max: 1400.0, class: 2 },
        RemapRule::Range { min: 1401.0, max: 1800.0, class: 3 },
        RemapRule::Range { min: 1801.0, max: 2200.0, class: 4 },
    ])
}

/// NLCD codes folded into the nine Anderson level-I groups
fn landuse_remap() -> RemapTable {
    RemapTable::new(vec![
        RemapRule::NoData { min: 0.0, max: 10.0 },
        RemapRule::Range { min: 11.0, max: 12.0, class: 1 },
        RemapRule::Range { min: 21.0, max: 23.0, class: 2 },
        RemapRule::Range { min: 31.0, max: 33.0, class: 3 },
        RemapRule::Range { min: 41.0, max: 43.0, class: 4 },
        RemapRule::Range { min: 51.0, max: 51.0, class: 5 },
        RemapRule::Range { min: 61.0, max: 61.0, class: 6 },
        RemapRule::Range { min: 71.0, max: 71.0, class: 7 },
        RemapRule::Range { min: 81.0, max: 85.0, class: 8 },
        RemapRule::Range { min: 91.0, max: 92.0, class: 9 },
    ])
}

fn is_nodata_class(s: &str) -> bool {
    s.eq_ignore_ascii_case("nodata") || s.eq_ignore_ascii_case("nd")
}

fn parse_rules(s: &str) -> Result<RemapTable> {
    let mut rules = Vec::new();
    for entry in s.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let parts: Vec<&str> = entry.split_whitespace().collect();
        let rule = match parts.as_slice() {
            [value, class] => {
                let value: f64 = value.parse().context("Invalid remap value")?;
                if is_nodata_class(class) {
                    RemapRule::NoData { min: value, max: value }
                } else {
                    let class: i32 = class.parse().context("Invalid remap class")?;
                    RemapRule::Value { value, class }
                }
            }
            [min, max, class] => {
                let min: f64 = min.parse().context("Invalid remap minimum")?;
                let max: f64 = max.parse().context("Invalid remap maximum")?;
                if is_nodata_class(class) {
                    RemapRule::NoData { min, max }
                } else {
                    let class: i32 = class.parse().context("Invalid remap class")?;
                    RemapRule::Range { min, max, class }
                }
            }
            _ => anyhow::bail!(
                "Remap entry must be 'min max class' or 'value class', got: {}",
                entry
            ),
        };
        rules.push(rule);
    }
    if rules.is_empty() {
        anyhow::bail!("At least one remap rule is required");
    }
    Ok(RemapTable::new(rules))
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_raster(path: &PathBuf) -> Result<terratab_core::Raster<f64>> {
    let pb = spinner("Reading raster...");
    let raster: terratab_core::Raster<f64> =
        read_geotiff(path).context("Failed to read raster")?;
    pb.finish_and_clear();
    info!("Input: {} x {}", raster.cols(), raster.rows());
    Ok(raster)
}

fn write_classes(raster: &terratab_core::Raster<i32>, path: &PathBuf) -> Result<()> {
    let pb = spinner("Writing output...");
    write_geotiff(raster, path).context("Failed to write output")?;
    pb.finish_and_clear();
    Ok(())
}

fn buffer_layer(
    path: &PathBuf,
    params: &BufferParams,
) -> Result<geo_types::MultiPolygon<f64>> {
    let layer = read_line_layer(path).context("Failed to read line layer")?;
    let lines = layer.line_strings();
    if lines.is_empty() {
        anyhow::bail!("No line features in {}", path.display());
    }
    info!("Buffering {} line(s) at distance {}", lines.len(), params.distance);
    buffer_lines(&lines, params).context("Failed to buffer line layer")
}

fn done(name: &str, path: &PathBuf, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let raster = read_raster(&input)?;
            let (rows, cols) = raster.shape();
            let bounds = raster.bounds();
            let stats = raster.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, raster.len());
            println!("Cell size: {}", raster.cell_size());
            println!(
                "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                bounds.0, bounds.1, bounds.2, bounds.3
            );
            if let Some(nodata) = raster.nodata() {
                println!("NoData: {}", nodata);
            }
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
            println!(
                "  Valid cells: {} ({:.1}%)",
                stats.valid_count,
                100.0 * stats.valid_count as f64 / raster.len() as f64
            );
        }

        // ── Reclass ──────────────────────────────────────────────────
        Commands::Reclass {
            input,
            output,
            rules,
        } => {
            let table = parse_rules(&rules)?;
            let raster = read_raster(&input)?;
            let start = Instant::now();
            let result = reclassify(&raster, &table).context("Failed to reclassify")?;
            let elapsed = start.elapsed();
            write_classes(&result, &output)?;
            done("Reclassification", &output, elapsed);
        }

        // ── Buffer ───────────────────────────────────────────────────
        Commands::Buffer {
            input,
            template,
            output,
            distance,
            segments,
        } => {
            let params = BufferParams { distance, segments };
            let template = read_raster(&template)?;
            let start = Instant::now();
            let zone = buffer_layer(&input, &params)?;
            let result =
                rasterize(&zone, &template, 1).context("Failed to rasterize buffer")?;
            let elapsed = start.elapsed();
            write_classes(&result, &output)?;
            done("Buffer", &output, elapsed);
        }

        // ── Crosstab ─────────────────────────────────────────────────
        Commands::Crosstab {
            dem,
            landuse,
            railroad,
            workspace,
            output,
            distance,
        } => {
            let ws = Workspace::create(&workspace).context("Failed to create workspace")?;
            let dem = read_raster(&dem)?;
            let lu = read_raster(&landuse)?;

            let start = Instant::now();

            let pb = spinner("Reclassifying...");
            let dem_reclass = reclassify(&dem, &elevation_remap())
                .context("Failed to reclassify elevation")?;
            let lu_reclass = reclassify(&lu, &landuse_remap())
                .context("Failed to reclassify land use")?;
            pb.finish_and_clear();
            write_classes(&dem_reclass, &ws.raster_path("dem_reclass"))?;
            write_classes(&lu_reclass, &ws.raster_path("lu_reclass"))?;

            let pb = spinner("Buffering railroad...");
            let params = BufferParams {
                distance,
                ..BufferParams::default()
            };
            let zone = buffer_layer(&railroad, &params)?;
            let rr_zones = rasterize(&zone, &lu_reclass, 1)
                .context("Failed to rasterize rail buffer")?;
            pb.finish_and_clear();
            write_classes(&rr_zones, &ws.raster_path("railroad_buffer"))?;

            let pb = spinner("Cross-tabulating...");
            let lu_by_elev = zonal_histogram(&dem_reclass, &lu_reclass, None)
                .context("Failed to tabulate land use by elevation")?;
            let lu_by_rrdist = zonal_histogram(&rr_zones, &lu_reclass, Some(&dem_reclass))
                .context("Failed to tabulate land use by rail proximity")?;
            pb.finish_and_clear();

            ws.write_histogram("lu_by_elev", &lu_by_elev, "Value")
                .context("Failed to persist elevation table")?;
            ws.write_histogram("lu_by_rrdist", &lu_by_rrdist, "OBJECTID")
                .context("Failed to persist rail proximity table")?;

            // Re-materialize from the workspace so the report always
            // reflects the persisted tables.
            let lu_by_elev = ws
                .read_histogram("lu_by_elev")
                .context("Failed to load elevation table")?;
            let lu_by_rrdist = ws
                .read_histogram("lu_by_rrdist")
                .context("Failed to load rail proximity table")?;

            let report = build_report(&lu_by_elev, &lu_by_rrdist)
                .context("Failed to assemble report")?;
            write_workbook(&report, &output).context("Failed to write workbook")?;
            let elapsed = start.elapsed();

            println!("{} completed", output.display());
            println!("  Processing time: {:.2?}", elapsed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rules_ranges_and_values() {
        let table = parse_rules("-9999 -1 1;0 NODATA;1 1000 1;1001 1400 2").unwrap();
        assert_eq!(table.class_of(-50.0), Some(1));
        assert_eq!(table.class_of(0.0), None);
        assert_eq!(table.class_of(1000.0), Some(1));
        assert_eq!(table.class_of(1001.0), Some(2));

        let table = parse_rules("0 10 nd;11 12 1").unwrap();
        assert_eq!(table.class_of(5.0), None);
        assert_eq!(table.class_of(11.0), Some(1));
    }

    #[test]
    fn test_parse_rules_rejects_garbage() {
        assert!(parse_rules("").is_err());
        assert!(parse_rules("1 2 3 4").is_err());
        assert!(parse_rules("a b c").is_err());
    }

    #[test]
    fn test_builtin_remaps_cover_expected_codes() {
        assert_eq!(elevation_remap().classes(), vec![1, 2, 3, 4]);
        assert_eq!(
            landuse_remap().classes(),
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9]
        );
        assert_eq!(landuse_remap().class_of(42.0), Some(4));
        assert_eq!(landuse_remap().class_of(5.0), None);
    }
}
