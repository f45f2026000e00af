const BASE_ALPHA: f64 = 0.1;
const MIN_ALPHA: f64 = 0.1;
const MAX_ALPHA: f64 = 0.9;
const CHANGE_GAIN: f64 = 5.0;

/// Smoothing factor for a step of size `change`
#[inline]
fn adaptive_alpha(change: f64) -> f64 {
    (BASE_ALPHA * (1.0 + change * CHANGE_GAIN)).clamp(MIN_ALPHA, MAX_ALPHA)
}

/// Exponential smoother whose factor grows with the sample-to-sample change.
///
/// The first output is the first input. Each later output blends the current
/// sample with the previous *output*, so this is a strictly ordered scan.
pub fn adaptive_smooth(values: &[f64]) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    std::iter::once(first)
        .chain(values.windows(2).scan(first, |prev_out, pair| {
            let alpha = adaptive_alpha((pair[1] - pair[0]).abs());
            // alpha * x + (1 - alpha) * prev, written so a flat signal stays exact
            *prev_out += alpha * (pair[1] - *prev_out);
            Some(*prev_out)
        }))
        .collect()
}
