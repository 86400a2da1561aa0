// THEORY:
// A `Point` is the smallest shared vocabulary of the engine. It is used in two
// roles: as an (x, y) coordinate inside a raster or an icon grid, and as a
// (width, height) pair when recording how large an image was before it was
// resized. Keeping one type for both keeps the builder and the proportion filter
// speaking the same language.

/// A simple struct to represent a 2D point, or a width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The same pair with its components exchanged. For a size, this is the
    /// size of the image after a quarter turn.
    pub const fn swapped(self) -> Self {
        Self { x: self.y, y: self.x }
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}
