// THEORY:
// The `Pixel` module is the most fundamental unit of the engine. It is a "dumb"
// data container for a single packed RGB value, plus the one color transform the
// icon pipeline needs.
//
// Rasters hand out pixels packed into a 32-bit integer: red in bits 16-23, green
// in bits 8-15, blue in bits 0-7. Anything above bit 23 (an alpha byte, for
// example) is ignored on read and never produced on write.
//
// The YCbCr transform (JPEG / Rec. 601 full-range coefficients) separates luma,
// which dominates human perception of similarity, from the two chroma channels,
// so that later comparison stages can hold luma to a stricter threshold.

pub type Channel = u8;
pub type Packed = u32;

const RED_SHIFT: u32 = 16;
const GREEN_SHIFT: u32 = 8;
const CHANNEL_MASK: Packed = 0xFF;

/// A "dumb" data container representing a single RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    /// The red channel value (0-255).
    pub red: Channel,
    /// The green channel value (0-255).
    pub green: Channel,
    /// The blue channel value (0-255).
    pub blue: Channel,
}

impl Pixel {
    pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
        Pixel { red, green, blue }
    }

    /// Unpacks the low 24 bits of a raster value.
    pub const fn unpack(packed: Packed) -> Self {
        Pixel {
            red: ((packed >> RED_SHIFT) & CHANNEL_MASK) as Channel,
            green: ((packed >> GREEN_SHIFT) & CHANNEL_MASK) as Channel,
            blue: (packed & CHANNEL_MASK) as Channel,
        }
    }

    pub const fn pack(self) -> Packed {
        ((self.red as Packed) << RED_SHIFT)
            | ((self.green as Packed) << GREEN_SHIFT)
            | self.blue as Packed
    }
}

/// Transforms RGB components (0.0-255.0) to YCbCr (0.0-255.0).
pub fn ycbcr(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let y = 0.299000 * r + 0.587000 * g + 0.114000 * b;
    let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.500000 * b;
    let cr = 128.0 + 0.500000 * r - 0.418688 * g - 0.081312 * b;
    (y, cb, cr)
}
