use crate::error::Result;
use crate::filters::apply_filter;
use crate::normalizer::normalize;
use crate::types::{FilterOutput, FilterParams, SampleSeries};
use serde_json::Value;

/// Normalize `payload` and filter its magnitudes.
///
/// The normalized series is returned alongside the output so callers can
/// report on the raw samples.
pub fn process_payload(payload: &Value, params: &FilterParams) -> Result<(SampleSeries, FilterOutput)> {
    let series = normalize(payload)?;

    log::debug!(
        "Applying filter: {} with window size: {} to {} samples",
        params.kind,
        params.window_size,
        series.len()
    );

    let filtered_values = apply_filter(&series.magnitudes, params.kind, params.window_size)?;
    Ok((series, FilterOutput { filtered_values }))
}
