// THEORY:
// The icon builder is the whole signature pipeline in one place:
//
//   raw image --resize (nearest)--> 276x276 raster
//             --block average (12x12)--> 23x23 intermediate icon (RGB)
//             --3x3 box filter at odd cells + YCbCr--> 11x11 icon
//             --normalize--> stored icon
//
// The two-stage downsample approximates a low-pass filtered resample: the block
// average throws away resampling noise, and the box filter centred on every other
// cell smooths the remaining blockiness before decimation. Doing it this way is far
// less sensitive to compression and resampling artifacts than shrinking straight
// to 11x11.
//
// The arithmetic here must stay exactly as it is; icons built by different
// versions of the pipeline must remain comparable.

use crate::core_modules::chunk::Chunk;
use crate::core_modules::icon::{ICON_SIZE, Icon, LARGE_ICON_SIZE, RESIZED_IMG_SIZE, SAMPLES};
use crate::core_modules::normalizer::normalize;
use crate::core_modules::pixel::ycbcr;
use crate::core_modules::point::Point;
use crate::core_modules::raster::{GridFactory, MakeRaster, Raster};
use crate::core_modules::resizer::resize_by_nearest;
use crate::error::Result;
use tracing::debug;

const ONE_NINTH: f64 = 1.0 / 9.0;

/// Generates a normalized image signature ("icon").
///
/// This is the entry point to use for anything that will be compared. Icons can be
/// stored and compared later with [`similar`](crate::core_modules::similarity::similar).
pub fn build_icon<R: Raster + ?Sized>(image: &R) -> Result<Icon> {
    build_icon_with(&GridFactory, image)
}

/// Same as [`build_icon`], resizing into a raster made by `factory`.
pub fn build_icon_with<F, R>(factory: &F, image: &R) -> Result<Icon>
where
    F: MakeRaster,
    R: Raster + ?Sized,
{
    let mut icon = build_icon_raw_with(factory, image)?;
    // Maximizing contrast compensates for the information lost while resampling,
    // and mirrors how high-contrast images are easier for people to tell apart.
    normalize(&mut icon);
    Ok(icon)
}

/// Generates a NON-normalized icon.
///
/// Mostly for experiments and diagnostics: to look at the pipeline before
/// normalization or to apply a custom one. The default thresholds are tuned for
/// normalized icons, so do not compare these with them.
pub fn build_icon_raw<R: Raster + ?Sized>(image: &R) -> Result<Icon> {
    build_icon_raw_with(&GridFactory, image)
}

pub fn build_icon_raw_with<F, R>(factory: &F, image: &R) -> Result<Icon>
where
    F: MakeRaster,
    R: Raster + ?Sized,
{
    let side = RESIZED_IMG_SIZE as u32;
    let (resized, source_size) = resize_by_nearest(factory, image, Point::new(side, side))?;

    let large_icon = block_average(&resized);
    let mut icon = box_filter_ycbcr(&large_icon);
    icon.set_source_size(source_size);

    debug!(
        width = source_size.x,
        height = source_size.y,
        "Built icon"
    );
    Ok(icon)
}

/// Stage 1: collapses each `SAMPLES` x `SAMPLES` block of the resized raster into one
/// RGB cell of a `LARGE_ICON_SIZE` icon.
fn block_average<R: Raster + ?Sized>(resized: &R) -> Icon {
    let mut large_icon = Icon::sized(LARGE_ICON_SIZE);
    let samples = SAMPLES as u32;

    for x in 0..LARGE_ICON_SIZE as u32 {
        for y in 0..LARGE_ICON_SIZE as u32 {
            let chunk = Chunk::extract(resized, x * samples, y * samples, samples, samples);
            let (r, g, b) = chunk.average_rgb();
            large_icon.set(Point::new(x, y), r, g, b);
        }
    }

    large_icon
}

/// Stage 2: averages the 3x3 neighbourhood of every odd cell of the intermediate
/// icon, converts it to YCbCr and stores it at half the coordinates.
fn box_filter_ycbcr(large_icon: &Icon) -> Icon {
    let mut icon = Icon::sized(ICON_SIZE);

    for x in (1..LARGE_ICON_SIZE - 1).step_by(2) {
        let xd = (x / 2) as u32;
        for y in (1..LARGE_ICON_SIZE - 1).step_by(2) {
            let yd = (y / 2) as u32;
            let mut s1 = 0.0;
            let mut s2 = 0.0;
            let mut s3 = 0.0;
            for nx in x - 1..=x + 1 {
                for ny in y - 1..=y + 1 {
                    let (c1, c2, c3) = large_icon.get(Point::new(nx as u32, ny as u32));
                    s1 += c1;
                    s2 += c2;
                    s3 += c3;
                }
            }
            let (yc, cb, cr) = ycbcr(s1 * ONE_NINTH, s2 * ONE_NINTH, s3 * ONE_NINTH);
            icon.set(Point::new(xd, yd), yc, cb, cr);
        }
    }

    icon
}
