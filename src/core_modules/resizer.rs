// THEORY:
// Nearest-neighbour resampling is the first, and only resolution-dependent, step of
// icon generation. Every destination pixel copies exactly one source pixel, chosen by
// scaling the destination coordinate back into the source and flooring it. No
// interpolation happens here on purpose: averaging is done later, on a fixed grid,
// where it is cheap and deterministic regardless of the input resolution.

use crate::core_modules::point::Point;
use crate::core_modules::raster::{MakeRaster, Raster};
use crate::error::{IconError, Result};

/// Resizes `src` to `dst_size` with the nearest-neighbour method, writing into a
/// raster made by `factory`. Also returns the source size.
pub fn resize_by_nearest<F, R>(factory: &F, src: &R, dst_size: Point) -> Result<(F::Output, Point)>
where
    F: MakeRaster,
    R: Raster + ?Sized,
{
    let x_max = src.width();
    let y_max = src.height();
    if x_max == 0 || y_max == 0 {
        return Err(IconError::InvalidArgument(format!(
            "source image must be at least 1x1, got {}x{}",
            x_max, y_max
        )));
    }
    if dst_size.x == 0 || dst_size.y == 0 {
        return Err(IconError::InvalidArgument(format!(
            "target size must be at least 1x1, got {}x{}",
            dst_size.x, dst_size.y
        )));
    }

    let x_scale = x_max as f64 / dst_size.x as f64;
    let y_scale = y_max as f64 / dst_size.y as f64;
    let mut dst = factory.make(dst_size.x, dst_size.y);

    for y in 0..dst_size.y {
        let sample_y = ((y as f64 * y_scale) as u32).min(y_max - 1);
        for x in 0..dst_size.x {
            let sample_x = ((x as f64 * x_scale) as u32).min(x_max - 1);
            dst.set_pixel(x, y, src.pixel(sample_x, sample_y));
        }
    }

    Ok((dst, Point::new(x_max, y_max)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::raster::{GridFactory, ImageBufferFactory, PixelGrid};

    #[test]
    fn downscale_picks_floor_of_scaled_coordinate() {
        let src = PixelGrid::from_fn(4, 4, |x, y| y * 4 + x);
        let (dst, size) = resize_by_nearest(&GridFactory, &src, Point::new(2, 2)).unwrap();
        assert_eq!(size, Point::new(4, 4));
        assert_eq!(dst.pixels(), &[0, 2, 8, 10]);
    }

    #[test]
    fn upscale_repeats_source_pixels() {
        let src = PixelGrid::from_fn(2, 1, |x, _| x + 1);
        let (dst, _) = resize_by_nearest(&GridFactory, &src, Point::new(5, 2)).unwrap();
        assert_eq!(dst.pixels(), &[1, 1, 1, 2, 2, 1, 1, 1, 2, 2]);
    }

    #[test]
    fn same_size_is_identity() {
        let src = PixelGrid::from_fn(7, 5, |x, y| (x * 31 + y * 17) << 8);
        let (dst, _) = resize_by_nearest(&GridFactory, &src, Point::new(7, 5)).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn writes_into_platform_buffer() {
        let src = PixelGrid::filled(3, 3, 0x00_10_20_30);
        let (dst, size) = resize_by_nearest(&ImageBufferFactory, &src, Point::new(6, 4)).unwrap();
        assert_eq!(dst.dimensions(), (6, 4));
        assert_eq!(size, Point::new(3, 3));
        assert!(dst.pixels().all(|p| p.0 == [0x10, 0x20, 0x30]));
    }

    #[test]
    fn zero_target_is_rejected() {
        let src = PixelGrid::new(4, 4);
        let err = resize_by_nearest(&GridFactory, &src, Point::new(0, 4)).unwrap_err();
        assert!(matches!(err, IconError::InvalidArgument(_)));
        assert!(resize_by_nearest(&GridFactory, &src, Point::new(4, 0)).is_err());
    }

    #[test]
    fn empty_source_is_rejected() {
        let src = PixelGrid::new(0, 3);
        assert!(resize_by_nearest(&GridFactory, &src, Point::new(4, 4)).is_err());
    }
}
