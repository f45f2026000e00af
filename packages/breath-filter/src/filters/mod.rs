//! Smoothing strategies for a 1-D magnitude sequence
//!
//! - Moving average: centered rolling mean, raw value where the window does not fit
//! - Lowpass: zero-phase 3rd-order Butterworth at 0.1 of Nyquist
//! - Adaptive: exponential smoother whose factor follows the sample-to-sample change
//!
//! Every strategy returns exactly one output per input sample.

mod adaptive;
mod butterworth;
mod moving_average;

pub use adaptive::adaptive_smooth;
pub use butterworth::{
    lowpass, BiquadCoeffs, BiquadFilter, ButterworthFilter, SosFilter, LOWPASS_CUTOFF,
    LOWPASS_ORDER,
};
pub use moving_average::centered_moving_average;

use crate::error::Result;
use crate::types::FilterKind;

/// Apply the selected filter to `magnitudes`.
///
/// `window` is only consulted by [`FilterKind::MovingAverage`]. Empty input
/// yields empty output for every kind.
pub fn apply_filter(magnitudes: &[f64], kind: FilterKind, window: usize) -> Result<Vec<f64>> {
    if magnitudes.is_empty() {
        return Ok(Vec::new());
    }

    let filtered = match kind {
        FilterKind::None => magnitudes.to_vec(),
        FilterKind::MovingAverage => centered_moving_average(magnitudes, window),
        FilterKind::Lowpass => lowpass(magnitudes)?,
        FilterKind::Adaptive => adaptive_smooth(magnitudes),
    };

    debug_assert_eq!(filtered.len(), magnitudes.len());
    Ok(filtered)
}
