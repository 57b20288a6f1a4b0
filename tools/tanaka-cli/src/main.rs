//! tanaka: illuminated contour lines from an elevation raster.
//!
//! Usage:
//!   tanaka dem.tif 0.05 "(0, 1000, 100)"
//!   tanaka N25E056.hgt 0.1 0:2000:50 --output hormuz.geojson --mesh hormuz.ply --seed 7

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tanaka_contour::{build_contours, write_geojson, ContourConfig, LevelRange, Levels};
use tanaka_core::ContourSet;
use tanaka_terrain::{load_raster, ply::write_ply, thin_points, Tin};

#[derive(Parser, Debug)]
#[command(name = "tanaka")]
#[command(about = "Generate Tanaka (illuminated) contours from an elevation raster", long_about = None)]
struct Cli {
    /// Elevation raster: GeoTIFF (.tif), ESRI ASCII grid (.asc) or SRTM/NASADEM tile (.hgt)
    input: PathBuf,

    /// Fraction of raster cells kept as triangulation vertices, in [0, 1]
    #[arg(value_parser = parse_ratio)]
    thinning: f64,

    /// Contour levels as start,stop,step (stop excluded), e.g. "(0, 1000, 100)"
    #[arg(allow_hyphen_values = true)]
    range: LevelRange,

    /// Output GeoJSON path
    #[arg(short, long, default_value = "mycontours.geojson")]
    output: PathBuf,

    /// Also write the triangulation as an ASCII PLY mesh
    #[arg(long)]
    mesh: Option<PathBuf>,

    /// Seed for point thinning (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with orientation and illumination settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Process levels one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log per-level extraction details
    #[arg(short, long)]
    verbose: bool,
}

fn parse_ratio(s: &str) -> Result<f64, String> {
    let ratio: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("thinning must be within [0, 1], got {ratio}"))
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::Warn
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}

fn load_config(cli: &Cli) -> Result<ContourConfig> {
    let mut config = match &cli.config {
        Some(path) => ContourConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ContourConfig::default(),
    };
    if cli.sequential {
        config.parallel = false;
    }
    Ok(config)
}

fn build_tin(cli: &Cli) -> Result<Tin> {
    let raster = load_raster(&cli.input)
        .with_context(|| format!("Failed to load raster {}", cli.input.display()))?;
    info!(
        "Loaded {}x{} raster from {}",
        raster.header.width,
        raster.header.height,
        cli.input.display()
    );
    if let Some((lo, hi)) = raster.elevation_range() {
        info!("Elevation range {lo} .. {hi}");
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points = thin_points(
        raster.valid_points(),
        cli.thinning,
        raster.cell_count(),
        &mut rng,
    )
    .context("Point thinning failed")?;
    info!("Kept {} points (seed {seed})", points.len());

    let tin = Tin::from_points(points).context("Triangulation failed")?;
    info!(
        "Triangulation created: {} vertices, {} triangles",
        tin.vertices().len(),
        tin.triangle_count()
    );
    Ok(tin)
}

fn report(set: &ContourSet, levels: &Levels) {
    info!(
        "{} of {} levels contoured, {} segments",
        set.isolines.len(),
        levels.len(),
        set.segment_count()
    );
    for failed in &set.failed {
        warn!("Level {} failed: {}", failed.height, failed.reason);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let start = Instant::now();

    let levels = Levels::from_range(&cli.range).context("Invalid contour range")?;
    let config = load_config(cli)?;
    info!("{} contour levels from {}", levels.len(), cli.range);

    let tin = build_tin(cli)?;
    if let Some(mesh) = &cli.mesh {
        write_ply(&tin, mesh)
            .with_context(|| format!("Failed to write mesh {}", mesh.display()))?;
        info!("Wrote triangulation to {}", mesh.display());
    }

    let set = build_contours(&tin, &levels, &config);
    write_geojson(&set, &cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    report(&set, &levels);
    info!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["tanaka", "dem.asc", "0.25", "(0, 1000, 100)"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("dem.asc"));
        assert_eq!(cli.thinning, 0.25);
        assert_eq!(cli.range, LevelRange::new(0.0, 1000.0, 100.0));
        assert_eq!(cli.output, PathBuf::from("mycontours.geojson"));
        assert!(cli.mesh.is_none());
        assert!(!cli.sequential);
    }

    #[test]
    fn test_negative_range_start() {
        let cli = Cli::try_parse_from(["tanaka", "dem.asc", "1", "-100:100:50"]).unwrap();
        assert_eq!(cli.range, LevelRange::new(-100.0, 100.0, 50.0));
    }

    #[test]
    fn test_thinning_out_of_bounds_rejected() {
        assert!(Cli::try_parse_from(["tanaka", "dem.asc", "1.5", "0:10:1"]).is_err());
        assert!(Cli::try_parse_from(["tanaka", "dem.asc", "-0.1", "0:10:1"]).is_err());
        assert!(Cli::try_parse_from(["tanaka", "dem.asc", "half", "0:10:1"]).is_err());
    }

    #[test]
    fn test_malformed_range_rejected() {
        assert!(Cli::try_parse_from(["tanaka", "dem.asc", "0.5", "0:10"]).is_err());
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["tanaka", "dem.asc", "0.5", "0:10:1", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_sequential_flag_disables_parallelism() {
        let cli = Cli::try_parse_from(["tanaka", "dem.asc", "0.5", "0:10:1", "--sequential"])
            .unwrap();
        assert!(!load_config(&cli).unwrap().parallel);
    }
}
