pub mod chunk;
pub mod icon;
pub mod icon_builder;
pub mod intensity;
pub mod normalizer;
pub mod pixel;
pub mod point;
pub mod raster;
pub mod resizer;
pub mod rotator;
pub mod similarity;
