// Example runner for the `icon_vision` library: decodes two image files, builds
// their icons and reports the raw metrics together with the verdict.

use anyhow::{Context, Result};
use clap::Parser;
use icon_vision::{Thresholds, build_icon, euclidean_metric, proportion_metric};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare two images for near-duplication", long_about = None)]
struct Args {
    /// First image
    image_a: PathBuf,
    /// Second image
    image_b: PathBuf,
    /// Also accept the images when one is a ±90° rotation of the other
    #[arg(short, long)]
    rotations: bool,
    /// Y-channel Euclidean threshold
    #[arg(long, default_value_t = icon_vision::THRESHOLD_Y)]
    threshold_y: f64,
    /// Cb/Cr-channel Euclidean threshold
    #[arg(long, default_value_t = icon_vision::THRESHOLD_CB_CR)]
    threshold_cbcr: f64,
    /// Proportion threshold
    #[arg(long, default_value_t = icon_vision::THRESHOLD_PROPORTION)]
    threshold_proportion: f64,
}

fn load_icon(path: &Path) -> Result<icon_vision::Icon> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgb8();
    let icon = build_icon(&image)
        .with_context(|| format!("Failed to build icon for {}", path.display()))?;
    info!(
        "Built icon for {} ({}x{})",
        path.display(),
        icon.source_size().x,
        icon.source_size().y
    );
    Ok(icon)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Override with RUST_LOG, e.g. RUST_LOG=icon_vision=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let thresholds = Thresholds {
        y: args.threshold_y,
        cb_cr: args.threshold_cbcr,
        proportion: args.threshold_proportion,
    };
    info!("{}", thresholds);

    let icon_a = load_icon(&args.image_a)?;
    let icon_b = load_icon(&args.image_b)?;

    let (m1, m2, m3) = euclidean_metric(&icon_a, &icon_b);
    println!("proportion metric: {:.5}", proportion_metric(&icon_a, &icon_b));
    println!("euclidean metric (Y, Cb, Cr): {:.1}, {:.1}, {:.1}", m1, m2, m3);

    let verdict = if args.rotations {
        thresholds.similar_90_270(&icon_a, &icon_b)
    } else {
        thresholds.similar(&icon_a, &icon_b)
    };
    println!("{}", if verdict { "similar" } else { "different" });

    Ok(())
}
