// THEORY:
// The `Normalizer` is the last stage of icon building: a per-channel histogram
// stretch. Two photos of the same scene often differ only in exposure or white
// balance. Stretching each channel to the full fixed-point range 0..=65025
// (display 0..=255) removes most of that difference before any comparison.
//
// Each channel is stretched on its own. A channel whose values are all equal has
// no range to stretch and is left as it is. Stretched values are rounded, so
// normalizing an already normalized icon changes nothing.

use crate::core_modules::icon::{CHANNELS, Icon};
use crate::core_modules::intensity::{Intensity, MAX_ENCODED};
use tracing::trace;

/// Stretches the histograms of the three channels of `icon` in place so that the
/// minimum of each channel becomes 0 and the maximum becomes `MAX_ENCODED`.
///
/// A constant channel is left untouched.
pub(crate) fn normalize(icon: &mut Icon) {
    for channel in 0..CHANNELS {
        stretch(icon.channel_mut(channel), channel);
    }
}

fn stretch(block: &mut [Intensity], channel: usize) {
    let Some(min) = block.iter().min().copied() else {
        return;
    };
    let max = block.iter().max().copied().unwrap_or(min);

    if max == min {
        trace!(channel, value = min.raw(), "Constant channel, skipping normalization");
        return;
    }

    let min = min.raw() as f64;
    let scale = MAX_ENCODED as f64 / (max.raw() as f64 - min);
    for value in block.iter_mut() {
        let out = ((value.raw() as f64 - min) * scale).round();
        *value = Intensity(out as i64 as u16);
    }
}
