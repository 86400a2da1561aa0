// THEORY:
// The `Rotator` turns an icon a quarter turn clockwise without touching the source
// image. Rotating the 11x11 signature is far cheaper than rotating and rebuilding
// from pixels, and it gives the same grid up to resampling noise.
//
// The mapping is
//
//     new[x, y] = old[y, size - 1 - x]
//
// on every channel. The recorded source size turns with the pixels, so the
// proportion filter sees the rotated aspect ratio.

use crate::core_modules::icon::Icon;
use crate::core_modules::point::Point;

/// Rotates an icon by 90 degrees clockwise, returning a new icon. The recorded
/// source size is rotated with it (width and height swap).
pub fn rotate90(icon: &Icon) -> Icon {
    let size = icon.size();
    let mut rotated = Icon::sized(size);

    for x in 0..size as u32 {
        for y in 0..size as u32 {
            let channels = icon.get_raw(Point::new(y, size as u32 - 1 - x));
            rotated.set_raw(Point::new(x, y), channels);
        }
    }

    rotated.set_source_size(icon.source_size().swapped());
    rotated
}

impl Icon {
    /// See [`rotate90`].
    pub fn rotate90(&self) -> Icon {
        rotate90(self)
    }
}
