// THEORY:
// An `Icon` is the perceptual signature of an image: a tiny square grid with three
// color channels. Image resolution of the icon is very small (11x11), so original
// image details are lost in downsampling except for very low resolution sources
// such as favicons or simple logos. That also makes icons safe to keep in a large
// searchable database.
//
// Storage layout is channel-major, then row-major:
//
//     index(x, y, channel) = size * (channel * size + y) + x
//
// so each channel occupies one contiguous block of `size * size` values. Every
// value is an `Intensity` (255-premultiplied fixed point). An icon also remembers
// the width and height of the image it was built from, which the proportion filter
// uses instead of pixel data.

use crate::core_modules::intensity::Intensity;
use crate::core_modules::point::Point;
use crate::error::{IconError, Result};

/// Side length of a finished icon.
pub const ICON_SIZE: usize = 11;
/// Side length, in resized pixels, of each block averaged into the intermediate icon.
pub const SAMPLES: usize = 12;
/// Side length of the intermediate icon built from block averages.
pub const LARGE_ICON_SIZE: usize = ICON_SIZE * 2 + 1;
/// Side length the source image is resized to before block averaging.
pub const RESIZED_IMG_SIZE: usize = LARGE_ICON_SIZE * SAMPLES;
/// Pixels per channel of a finished icon.
pub const NUM_PIX: usize = ICON_SIZE * ICON_SIZE;
/// Number of color channels (Y, Cb, Cr once built).
pub const CHANNELS: usize = 3;

/// Position in the flat value array of channel `channel` at point (x, y) of a
/// `size`-sided icon.
#[inline]
pub const fn arr_index(x: usize, y: usize, size: usize, channel: usize) -> usize {
    size * (channel * size + y) + x
}

/// A square, three-channel image signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    size: usize,
    values: Vec<Intensity>,
    source_size: Point,
}

impl Icon {
    /// A zeroed icon of the given side length.
    pub fn sized(size: usize) -> Self {
        Self {
            size,
            values: vec![Intensity::ZERO; size * size * CHANNELS],
            source_size: Point::default(),
        }
    }

    /// An icon with no pixels, useful as a placeholder.
    pub fn empty() -> Self {
        Self::sized(0)
    }

    /// Assembles an icon from raw parts, checking that `values` holds exactly
    /// `size * size * 3` entries.
    pub fn from_parts(size: usize, values: Vec<Intensity>, source_size: Point) -> Result<Self> {
        let expected = size * size * CHANNELS;
        if values.len() != expected {
            return Err(IconError::InvalidArgument(format!(
                "icon of size {} needs {} values, got {}",
                size,
                expected,
                values.len()
            )));
        }
        Ok(Self {
            size,
            values,
            source_size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Width and height of the image this icon was built from.
    pub fn source_size(&self) -> Point {
        self.source_size
    }

    pub fn set_source_size(&mut self, source_size: Point) {
        self.source_size = source_size;
    }

    pub fn values(&self) -> &[Intensity] {
        &self.values
    }

    /// The contiguous block of one channel.
    pub fn channel(&self, channel: usize) -> &[Intensity] {
        let len = self.size * self.size;
        &self.values[channel * len..(channel + 1) * len]
    }

    pub(crate) fn channel_mut(&mut self, channel: usize) -> &mut [Intensity] {
        let len = self.size * self.size;
        &mut self.values[channel * len..(channel + 1) * len]
    }

    /// Stores three 0.0-255.0 channel values at `p`, encoding them to fixed point.
    pub fn set(&mut self, p: Point, c1: f64, c2: f64, c3: f64) {
        self.set_raw(p, [Intensity::encode(c1), Intensity::encode(c2), Intensity::encode(c3)]);
    }

    /// Reads the three channel values at `p`, decoded to 0.0-255.0.
    pub fn get(&self, p: Point) -> (f64, f64, f64) {
        let [c1, c2, c3] = self.get_raw(p);
        (c1.decode(), c2.decode(), c3.decode())
    }

    pub fn set_raw(&mut self, p: Point, channels: [Intensity; CHANNELS]) {
        let (x, y) = (p.x as usize, p.y as usize);
        for (channel, value) in channels.into_iter().enumerate() {
            self.values[arr_index(x, y, self.size, channel)] = value;
        }
    }

    pub fn get_raw(&self, p: Point) -> [Intensity; CHANNELS] {
        let (x, y) = (p.x as usize, p.y as usize);
        std::array::from_fn(|channel| self.values[arr_index(x, y, self.size, channel)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn constants_follow_icon_size() {
        assert_eq!(LARGE_ICON_SIZE, 23);
        assert_eq!(RESIZED_IMG_SIZE, 276);
        assert_eq!(NUM_PIX, 121);
    }

    #[test]
    fn sized_icon_has_three_channels() {
        assert_eq!(Icon::sized(4).values().len(), 4 * 4 * 3);
        assert!(Icon::empty().values().is_empty());
    }

    #[test]
    fn arr_index_known_positions() {
        assert_eq!(arr_index(2, 3, 4, 2), 46);
        assert_eq!(arr_index(1, 1, 4, 1), 21);
        assert_eq!(arr_index(3, 3, 4, 0), 15);
    }

    #[test]
    fn set_places_each_channel_in_its_block() {
        let mut icon = Icon::sized(4);
        icon.set(Point::new(1, 1), 13.5, 29.9, 95.9);

        let mut expected = vec![Intensity::ZERO; 48];
        expected[5] = Intensity::encode(13.5);
        expected[21] = Intensity::encode(29.9);
        expected[37] = Intensity::encode(95.9);
        assert_eq!(icon.values(), expected.as_slice());
        assert_eq!(icon.source_size(), Point::default());
    }

    #[test]
    fn get_decodes_stored_values() {
        let mut icon = Icon::sized(4);
        icon.set(Point::new(1, 1), 13.5, 29.9, 95.9);
        let (c1, c2, c3) = icon.get(Point::new(1, 1));
        assert!((c1 - 13.5).abs() < 0.1);
        assert!((c2 - 29.9).abs() < 0.1);
        assert!((c3 - 95.9).abs() < 0.1);
    }

    #[test]
    fn from_parts_checks_length() {
        let err = Icon::from_parts(2, vec![Intensity::ZERO; 11], Point::new(1, 1)).unwrap_err();
        assert!(matches!(err, IconError::InvalidArgument(_)));
        let icon = Icon::from_parts(2, vec![Intensity::MAX; 12], Point::new(3, 4)).unwrap();
        assert_eq!(icon.channel(2), &[Intensity::MAX; 4]);
        assert_eq!(icon.source_size(), Point::new(3, 4));
    }

    proptest! {
        #[test]
        fn arr_index_is_a_bijection(size in 1usize..32) {
            let mut seen = HashSet::new();
            for channel in 0..CHANNELS {
                for y in 0..size {
                    for x in 0..size {
                        let index = arr_index(x, y, size, channel);
                        prop_assert!(index < CHANNELS * size * size);
                        prop_assert!(seen.insert(index));
                    }
                }
            }
            prop_assert_eq!(seen.len(), CHANNELS * size * size);
        }
    }
}
