// THEORY:
// Icons store every channel value as an unsigned 16-bit fixed-point number: the
// 0.0-255.0 intensity multiplied by 255 and truncated. This keeps roughly one
// extra decimal digit through the averaging stages while halving the storage of
// an f32. The largest representable display value, 255.0, encodes to
// 255 * 255 = 65025, which always fits in a `u16`; the pipeline never produces
// anything larger, so no saturation logic exists here.

/// The fixed-point scale factor.
pub const SCALE: f64 = 255.0;
/// Encoded value of a full-intensity (255.0) channel.
pub const MAX_ENCODED: u16 = 255 * 255;

const INV_SCALE: f64 = 1.0 / SCALE;

/// A single channel value in 255-premultiplied fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Intensity(pub u16);

impl Intensity {
    pub const ZERO: Intensity = Intensity(0);
    pub const MAX: Intensity = Intensity(MAX_ENCODED);

    /// Encodes a 0.0-255.0 channel value. The conversion truncates toward zero
    /// and wraps like an integer cast; inputs outside the range are a caller bug.
    pub fn encode(value: f64) -> Self {
        Intensity((value * SCALE) as i64 as u16)
    }

    /// Decodes back to the 0.0-255.0 range.
    pub fn decode(self) -> f64 {
        self.0 as f64 * INV_SCALE
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for Intensity {
    fn from(raw: u16) -> Self {
        Intensity(raw)
    }
}

impl From<Intensity> for u16 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encode_truncates() {
        assert_eq!(Intensity::encode(13.5).raw(), 3442);
        assert_eq!(Intensity::encode(29.9).raw(), 7624);
        assert_eq!(Intensity::encode(255.0), Intensity::MAX);
        assert_eq!(Intensity::encode(0.0), Intensity::ZERO);
    }

    #[test]
    fn decode_recovers_display_value() {
        assert!((Intensity(3442).decode() - 13.5).abs() < 0.1);
        assert_eq!(Intensity::MAX.decode(), 255.0);
    }

    proptest! {
        #[test]
        fn round_trip_within_one_step(c in 0.0f64..=255.0) {
            let decoded = Intensity::encode(c).decode();
            prop_assert!(decoded <= c + 1e-9);
            prop_assert!(c - decoded < 1.0 / SCALE + 1e-9, "c={} decoded={}", c, decoded);
        }
    }
}
