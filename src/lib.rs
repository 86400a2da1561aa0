// THEORY:
// This file is the main entry point for the `icon_vision` library crate. It defines
// the public API exposed to consumers: build a compact perceptual signature (an
// `Icon`) from any raster, then compare two icons to decide whether their source
// images are near-duplicates.
//
// The pipeline lives in `core_modules`, one stage per module:
//   resizer -> chunk (block averages) -> icon_builder -> normalizer
// and the comparison side:
//   similarity (proportion + Euclidean filters) -> rotator (for ±90° checks)
//
// Everything is a pure, synchronous transform over explicitly owned values. There
// is no shared state, so callers may build and compare icons on as many threads as
// they like.

pub mod core_modules;
pub mod error;

pub use crate::core_modules::icon::{ICON_SIZE, Icon};
pub use crate::core_modules::icon_builder::{
    build_icon, build_icon_raw, build_icon_raw_with, build_icon_with,
};
pub use crate::core_modules::intensity::Intensity;
pub use crate::core_modules::point::Point;
pub use crate::core_modules::raster::{
    GridFactory, ImageBufferFactory, MakeRaster, PixelGrid, Raster,
};
pub use crate::core_modules::resizer::resize_by_nearest;
pub use crate::core_modules::rotator::rotate90;
pub use crate::core_modules::similarity::{
    THRESHOLD_CB_CR, THRESHOLD_PROPORTION, THRESHOLD_Y, Thresholds, euclidean_metric,
    euclidean_similar, proportion_metric, proportion_similar, similar, similar_90_270,
};
pub use crate::error::{IconError, Result};
