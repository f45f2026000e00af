/// Centered rolling mean over `window` samples.
///
/// The window for index `i` spans `[i - window/2, i - window/2 + window - 1]`.
/// Where that span leaves the sequence, or the mean is undefined because the
/// span holds a missing (NaN) sample, the raw value at `i` is kept.
pub fn centered_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if window == 0 || window > n {
        return values.to_vec();
    }

    let lead = window / 2;
    let size = window as f64;

    values
        .iter()
        .enumerate()
        .map(|(i, &raw)| {
            if i < lead || i - lead + window > n {
                return raw;
            }
            let start = i - lead;
            let mean = values[start..start + window].iter().sum::<f64>() / size;
            if mean.is_nan() {
                raw
            } else {
                mean
            }
        })
        .collect()
}
