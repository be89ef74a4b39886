//! Climate ingestion report
//!
//! Loads a climate raster, downsamples it and prints the resulting grid
//! size and climate histogram. Optionally writes the grid as JSON.

use std::path::PathBuf;

use clap::Parser;

use koppen_realms::core::error::Result;
use koppen_realms::world::ClimateMap;

/// Inspect a Köppen climate raster
#[derive(Parser, Debug)]
#[command(name = "ingest_raster")]
#[command(about = "Convert a climate raster into the game's climate grid")]
struct Args {
    /// Grayscale image or JSON raster document
    raster: PathBuf,

    /// Integer downsample factor
    #[arg(long, default_value_t = 1)]
    downsample: usize,

    /// Write the climate grid and land mask as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("koppen_realms=info")),
        )
        .init();

    let args = Args::parse();
    let map = ClimateMap::load(&args.raster, args.downsample)?;

    println!(
        "{}x{} grid, {} land / {} water",
        map.width(),
        map.height(),
        map.land_count(),
        map.width() * map.height() - map.land_count()
    );
    for (climate, count) in map.histogram() {
        println!("  {:<5} {:<40} {}", climate.code(), climate.label(), count);
    }

    if let Some(path) = &args.output {
        std::fs::write(path, serde_json::to_string(&map)?)?;
        tracing::info!("Wrote climate grid to {}", path.display());
    }
    Ok(())
}
