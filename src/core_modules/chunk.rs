// THEORY:
// The `Chunk` module represents a spatial grouping of pixels: one square block of
// the resized image that collapses into a single cell of the intermediate icon.
//
// Key architectural principles:
// 1.  **Spatial Pooling**: Grouping pixels into fixed blocks takes us from tens of
//     thousands of resized pixels to a few hundred cells.
// 2.  **Noise Reduction**: The core operation of a chunk is `average_rgb`. Averaging
//     a whole block cancels single-pixel noise from recompression or resampling,
//     so later stages only see spatially coherent color.
// 3.  **Data Container**: Like `Pixel`, `Chunk` is a "dumb" data container. It holds
//     its pixels and knows how to summarise them. It does not know where it sits in
//     the grid or how the summary is encoded.

use crate::core_modules::pixel::Pixel;
use crate::core_modules::raster::Raster;

/// A "dumb" data container representing a rectangular block of pixels.
pub struct Chunk {
    /// A flattened, row-major vector of all the `Pixel`s within this chunk.
    pub pixels: Vec<Pixel>,
}

impl Chunk {
    pub fn new(pixels: Vec<Pixel>) -> Self {
        Self { pixels }
    }

    /// Copies the `width` x `height` block whose top-left pixel is
    /// (`start_x`, `start_y`) out of a raster. The block must lie inside it.
    pub fn extract<R: Raster + ?Sized>(
        raster: &R,
        start_x: u32,
        start_y: u32,
        width: u32,
        height: u32,
    ) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y_offset in 0..height {
            for x_offset in 0..width {
                pixels.push(Pixel::unpack(raster.pixel(start_x + x_offset, start_y + y_offset)));
            }
        }
        Self::new(pixels)
    }

    /// The mean red, green and blue of the chunk, each in 0.0-255.0.
    /// Channels are summed as unsigned integers and divided once at the end.
    pub fn average_rgb(&self) -> (f64, f64, f64) {
        let num_pixels = self.pixels.len();
        if num_pixels == 0 {
            return (0.0, 0.0, 0.0);
        }

        let mut sum_r = 0u64;
        let mut sum_g = 0u64;
        let mut sum_b = 0u64;
        for pixel in &self.pixels {
            sum_r += pixel.red as u64;
            sum_g += pixel.green as u64;
            sum_b += pixel.blue as u64;
        }

        let inv_count = 1.0 / num_pixels as f64;
        (
            sum_r as f64 * inv_count,
            sum_g as f64 * inv_count,
            sum_b as f64 * inv_count,
        )
    }
}
