// THEORY:
// The engine never decodes files. It consumes any raster that can report its size
// and read/write packed RGB pixels, through the `Raster` trait, and creates
// scratch rasters through the `MakeRaster` factory trait.
//
// Two families of implementations ship with the crate:
// -   `image::RgbImage` / `image::RgbaImage`, the platform buffers produced by the
//     `image` crate's decoders (`ImageBufferFactory` makes new `RgbImage`s).
// -   `PixelGrid`, a plain in-memory grid of packed values (`GridFactory`). It is
//     what the icon builder resizes into by default, and what tests use to build
//     exact pixel patterns without touching the filesystem.
//
// Only one pixel format exists (packed 24-bit RGB), so the factory takes no
// format tag.

use crate::core_modules::pixel::{Packed, Pixel};
use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Read/write access to a rectangular grid of packed RGB pixels.
///
/// Coordinates are always in bounds when called by this crate.
pub trait Raster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Packed RGB value at (x, y): red in bits 16-23, green 8-15, blue 0-7.
    fn pixel(&self, x: u32, y: u32) -> Packed;
    fn set_pixel(&mut self, x: u32, y: u32, rgb: Packed);
}

/// Creates blank rasters of a given size.
pub trait MakeRaster {
    type Output: Raster;
    fn make(&self, width: u32, height: u32) -> Self::Output;
}

/// An in-memory, row-major raster of packed RGB values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Packed>,
}

impl PixelGrid {
    /// A black grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    pub fn filled(width: u32, height: u32, rgb: Packed) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgb & 0x00FF_FFFF; (width as usize) * (height as usize)],
        }
    }

    /// Builds a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Packed) -> Self {
        let mut grid = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                grid.set_pixel(x, y, f(x, y));
            }
        }
        grid
    }

    pub fn pixels(&self) -> &[Packed] {
        &self.pixels
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }
}

impl Raster for PixelGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Packed {
        self.pixels[self.offset(x, y)]
    }

    fn set_pixel(&mut self, x: u32, y: u32, rgb: Packed) {
        let offset = self.offset(x, y);
        self.pixels[offset] = rgb & 0x00FF_FFFF;
    }
}

/// Factory for `PixelGrid`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridFactory;

impl MakeRaster for GridFactory {
    type Output = PixelGrid;

    fn make(&self, width: u32, height: u32) -> PixelGrid {
        PixelGrid::new(width, height)
    }
}

impl Raster for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Packed {
        let Rgb([red, green, blue]) = *self.get_pixel(x, y);
        Pixel::new(red, green, blue).pack()
    }

    fn set_pixel(&mut self, x: u32, y: u32, rgb: Packed) {
        let pixel = Pixel::unpack(rgb);
        self.put_pixel(x, y, Rgb([pixel.red, pixel.green, pixel.blue]));
    }
}

impl Raster for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Packed {
        let Rgba([red, green, blue, _]) = *self.get_pixel(x, y);
        Pixel::new(red, green, blue).pack()
    }

    fn set_pixel(&mut self, x: u32, y: u32, rgb: Packed) {
        let pixel = Pixel::unpack(rgb);
        self.put_pixel(x, y, Rgba([pixel.red, pixel.green, pixel.blue, u8::MAX]));
    }
}

/// Factory for `image::RgbImage` buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageBufferFactory;

impl MakeRaster for ImageBufferFactory {
    type Output = RgbImage;

    fn make(&self, width: u32, height: u32) -> RgbImage {
        RgbImage::new(width, height)
    }
}
