// THEORY:
// Two icons are "similar" when two independent filters both pass:
//
// 1.  **Proportion filter**: compares the aspect ratios of the source images. The
//     narrower side of each image is rescaled to 1 and the longer sides are compared
//     by relative difference. It never looks at pixels, so it runs first and skips
//     the pixel comparison on a mismatch.
// 2.  **Euclidean filter**: per-channel sums of squared differences between the two
//     icons' stored values (squared distances, no square root). Luma is held to a
//     stricter threshold than the two chroma channels, because people notice
//     brightness structure before color.
//
// The defaults were tuned on normalized icons:
//     T_Y    = 6050
//     T_CbCr = T_Y · 2 = 12100
//     T_prop = 0.05
//
// `similar_90_270` also tries a quarter turn in each direction, three comparisons
// in total. A half turn is not tried.

use crate::core_modules::icon::{CHANNELS, Icon};
use crate::core_modules::intensity::SCALE;
use crate::core_modules::rotator::rotate90;
use std::fmt;
use tracing::debug;

/// Sensitivity of the Cb/Cr channels relative to Y.
const CHAN_COEFF: f64 = 2.0;

/// Squared Euclidean distance threshold for the Y channel.
pub const THRESHOLD_Y: f64 = 6050.0;
/// Squared Euclidean distance threshold for each of the Cb and Cr channels.
pub const THRESHOLD_CB_CR: f64 = THRESHOLD_Y * CHAN_COEFF;
/// Proportion similarity threshold (5%).
pub const THRESHOLD_PROPORTION: f64 = 0.05;

const ONE_255TH_2: f64 = 1.0 / (SCALE * SCALE);

/// Tunable cutoffs for the similarity verdicts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Exclusive upper bound for the Y-channel Euclidean metric.
    pub y: f64,
    /// Exclusive upper bound for each of the Cb and Cr Euclidean metrics.
    pub cb_cr: f64,
    /// Exclusive upper bound for the proportion metric.
    pub proportion: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            y: THRESHOLD_Y,
            cb_cr: THRESHOLD_CB_CR,
            proportion: THRESHOLD_PROPORTION,
        }
    }
}

impl fmt::Display for Thresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Euclidean distance thresholds (YCbCr): m1={}, m2={}, m3={}; \
             proportion threshold: m={}",
            self.y, self.cb_cr, self.cb_cr, self.proportion
        )
    }
}

impl Thresholds {
    /// Similarity verdict based on proportion, then Euclidean similarity.
    pub fn similar(&self, icon_a: &Icon, icon_b: &Icon) -> bool {
        self.proportion_similar(icon_a, icon_b) && self.euclidean_similar(icon_a, icon_b)
    }

    /// Like [`Thresholds::similar`], but also considers rotations of ±90°, which are
    /// the rotations people most often apply to photos. A 180° rotation is not
    /// considered.
    pub fn similar_90_270(&self, icon_a: &Icon, icon_b: &Icon) -> bool {
        if self.similar(icon_a, icon_b) {
            return true;
        }

        if self.similar(icon_a, &rotate90(icon_b)) {
            debug!("Icons match with B rotated 90°");
            return true;
        }

        // As if B were rotated 270°.
        if self.similar(&rotate90(icon_a), icon_b) {
            debug!("Icons match with B rotated 270°");
            return true;
        }

        false
    }

    pub fn proportion_similar(&self, icon_a: &Icon, icon_b: &Icon) -> bool {
        let m = proportion_metric(icon_a, icon_b);
        let verdict = m < self.proportion;
        debug!(metric = m, verdict, "Proportion filter");
        verdict
    }

    pub fn euclidean_similar(&self, icon_a: &Icon, icon_b: &Icon) -> bool {
        let (m1, m2, m3) = euclidean_metric(icon_a, icon_b);
        // Luma as the most sensitive.
        let verdict = m1 < self.y && m2 < self.cb_cr && m3 < self.cb_cr;
        debug!(m1, m2, m3, verdict, "Euclidean filter");
        verdict
    }
}

/// Similarity verdict with the default thresholds.
pub fn similar(icon_a: &Icon, icon_b: &Icon) -> bool {
    Thresholds::default().similar(icon_a, icon_b)
}

/// Similarity verdict with the default thresholds, also trying ±90° rotations.
pub fn similar_90_270(icon_a: &Icon, icon_b: &Icon) -> bool {
    Thresholds::default().similar_90_270(icon_a, icon_b)
}

/// Proportion verdict with the default threshold.
pub fn proportion_similar(icon_a: &Icon, icon_b: &Icon) -> bool {
    Thresholds::default().proportion_similar(icon_a, icon_b)
}

/// Euclidean verdict with the default thresholds.
pub fn euclidean_similar(icon_a: &Icon, icon_b: &Icon) -> bool {
    Thresholds::default().euclidean_similar(icon_a, icon_b)
}

/// Image proportion metric. The smaller it is, the closer the aspect ratios of
/// the two source images.
pub fn proportion_metric(icon_a: &Icon, icon_b: &Icon) -> f64 {
    let size_a = icon_a.source_size();
    let size_b = icon_b.source_size();
    let (xa, ya) = (size_a.x as f64, size_a.y as f64);
    let (xb, yb) = (size_b.x as f64, size_b.y as f64);

    // Rescale the narrower side of A to 1, and the same side of B.
    let (a, b) = if xa <= ya { (ya / xa, yb / xb) } else { (xa / ya, xb / yb) };
    (a - b).abs() / a.max(b)
}

/// Squared Euclidean distances between two icons, one per channel (Y, Cb, Cr).
///
/// Icons of different sizes are infinitely far apart on every channel.
pub fn euclidean_metric(icon_a: &Icon, icon_b: &Icon) -> (f64, f64, f64) {
    if icon_a.size() != icon_b.size() {
        debug!(
            size_a = icon_a.size(),
            size_b = icon_b.size(),
            "Icon sizes differ, skipping pixel comparison"
        );
        return (f64::INFINITY, f64::INFINITY, f64::INFINITY);
    }
    let mut m = [0.0f64; CHANNELS];
    for (channel, sum) in m.iter_mut().enumerate() {
        *sum = icon_a
            .channel(channel)
            .iter()
            .zip(icon_b.channel(channel))
            .map(|(a, b)| {
                let d = a.raw() as f64 - b.raw() as f64;
                d * ONE_255TH_2 * d
            })
            .sum();
    }
    (m[0], m[1], m[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::icon::NUM_PIX;
    use crate::core_modules::intensity::Intensity;
    use crate::core_modules::point::Point;

    fn flat(value: u16, width: u32, height: u32) -> Icon {
        let values = vec![Intensity(value); NUM_PIX * 3];
        Icon::from_parts(11, values, Point::new(width, height)).unwrap()
    }

    #[test]
    fn default_thresholds() {
        assert_eq!(THRESHOLD_Y, 6050.0);
        assert_eq!(THRESHOLD_CB_CR, 12100.0);
        assert_eq!(THRESHOLD_PROPORTION, 0.05);
        assert_eq!(
            Thresholds::default().to_string(),
            "Euclidean distance thresholds (YCbCr): m1=6050, m2=12100, m3=12100; \
             proportion threshold: m=0.05"
        );
    }

    #[test]
    fn proportion_metric_normalizes_the_narrow_side() {
        let a = flat(0, 100, 130);
        assert!((proportion_metric(&a, &flat(0, 100, 124)) - 6.0 / 130.0).abs() < 1e-12);
        assert!(proportion_similar(&a, &flat(0, 100, 124)));
        assert!(!proportion_similar(&a, &flat(0, 100, 122)));
        assert!(proportion_similar(&flat(0, 130, 100), &flat(0, 260, 200)));
        assert!(!proportion_similar(&flat(0, 200, 200), &flat(0, 260, 200)));
        assert!(!proportion_similar(&flat(0, 130, 100), &flat(0, 122, 100)));
        assert!(!proportion_similar(&a, &flat(0, 130, 100)));
    }

    #[test]
    fn proportion_metric_is_symmetric_for_same_orientation() {
        let a = flat(0, 124, 100);
        let b = flat(0, 260, 200);
        assert_eq!(proportion_metric(&a, &b), proportion_metric(&b, &a));
    }

    #[test]
    fn euclidean_metric_uses_stored_values() {
        let a = flat(0, 1, 1);
        let mut b = flat(0, 1, 1);
        // One Y value at 255 display intensity, one Cr value at 10.
        b.set_raw(Point::new(3, 4), [Intensity::MAX, Intensity::ZERO, Intensity(2550)]);
        let (m1, m2, m3) = euclidean_metric(&a, &b);
        assert!((m1 - 65025.0).abs() < 1e-6);
        assert_eq!(m2, 0.0);
        assert!((m3 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn euclidean_bounds_are_strict() {
        let zero = Thresholds {
            y: 0.0,
            ..Thresholds::default()
        };
        let a = flat(700, 1, 1);
        assert_eq!(euclidean_metric(&a, &a), (0.0, 0.0, 0.0));
        assert!(!zero.euclidean_similar(&a, &a));
        assert!(euclidean_similar(&a, &a));
    }

    #[test]
    fn euclidean_threshold_applies_per_channel() {
        let thresholds = Thresholds {
            y: 100.0,
            cb_cr: 1000.0,
            proportion: THRESHOLD_PROPORTION,
        };
        let a = flat(0, 1, 1);
        let mut b = flat(0, 1, 1);
        b.set_raw(Point::new(0, 0), [Intensity(2551), Intensity::ZERO, Intensity::ZERO]);
        assert!(!thresholds.euclidean_similar(&a, &b));

        b.set_raw(Point::new(0, 0), [Intensity(2549), Intensity(8000), Intensity(8000)]);
        assert!(thresholds.euclidean_similar(&a, &b));

        b.set_raw(Point::new(0, 0), [Intensity::ZERO, Intensity::ZERO, Intensity(8100)]);
        assert!(!thresholds.euclidean_similar(&a, &b));
    }

    #[test]
    fn icons_of_different_sizes_are_never_similar() {
        let full = flat(0, 4, 4);
        let mut tiny = Icon::sized(2);
        tiny.set_source_size(Point::new(4, 4));

        let inf = f64::INFINITY;
        assert_eq!(euclidean_metric(&full, &tiny), (inf, inf, inf));
        assert_eq!(euclidean_metric(&tiny, &full), (inf, inf, inf));
        assert!(proportion_similar(&full, &tiny));
        assert!(!euclidean_similar(&full, &tiny));
        assert!(!similar(&full, &tiny));
        assert!(!similar_90_270(&full, &tiny));
    }

    #[test]
    fn proportion_mismatch_wins_over_identical_pixels() {
        assert!(!similar(&flat(100, 100, 130), &flat(100, 100, 122)));
    }

    #[test]
    fn quarter_turn_fixes_swapped_proportions() {
        let a = flat(500, 400, 300);
        let b = flat(500, 300, 400);
        assert!(!similar(&a, &b));
        assert!(similar_90_270(&a, &b));
    }
}
