use crate::error::ApiError;
use crate::state::ServerState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, RawQuery, State},
    Json,
};
use breath_filter::{apply_filter, normalize, FilterKind, FilterOutput, FilterParams, SignalSummary};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Query params for `/process_data`
///
/// Parsed from the raw query string so malformed values become a JSON
/// `{"error": ...}` response instead of an extractor rejection. A repeated
/// key keeps its first value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProcessQuery {
    /// none | moving_average | lowpass | adaptive (anything else means none)
    pub filter: Option<String>,
    /// Moving-average window, positive integer
    pub window_size: Option<String>,
}

impl ProcessQuery {
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        let mut query = Self::default();

        for pair in raw.unwrap_or_default().split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let slot = match decode_component(key)?.as_str() {
                "filter" => &mut query.filter,
                "window_size" => &mut query.window_size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(decode_component(value)?);
            }
        }

        Ok(query)
    }

    /// The window is only checked when the moving average will read it.
    pub fn params(&self, default_window: usize) -> Result<FilterParams, ApiError> {
        let kind = FilterKind::from_selector(self.filter.as_deref());
        let window_size = match self.window_size.as_deref() {
            Some(raw) if kind == FilterKind::MovingAverage => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ApiError::InvalidInput(format!(
                        "window_size must be a positive integer, got '{}'",
                        raw
                    ))
                })?,
            _ => default_window,
        };
        Ok(FilterParams::new(kind, window_size))
    }
}

fn decode_component(raw: &str) -> Result<String, ApiError> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(|s| s.into_owned())
        .map_err(|e| ApiError::InvalidInput(format!("Invalid query string: {}", e)))
}

/// Filter a respiration trace
pub async fn process_data(
    State(state): State<Arc<ServerState>>,
    RawQuery(raw_query): RawQuery,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<FilterOutput>, ApiError> {
    info!("Process data endpoint accessed");

    let result = body.map_err(ApiError::from).and_then(|body| {
        let query = ProcessQuery::parse(raw_query.as_deref())?;
        filter_request(&query, &body, state.config.default_window_size)
    });

    match result {
        Ok(output) => {
            info!(
                "Returning {} filtered values",
                output.filtered_values.len()
            );
            Ok(Json(output))
        }
        Err(e @ ApiError::Processing(_)) => {
            error!("Error processing data: {}", e);
            Err(e)
        }
        Err(e) => {
            warn!("Rejected request: {}", e);
            Err(e)
        }
    }
}

fn filter_request(
    query: &ProcessQuery,
    body: &[u8],
    default_window: usize,
) -> Result<FilterOutput, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::InvalidInput("No data received".to_string()));
    }

    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidInput(format!("Invalid JSON payload: {}", e)))?;
    let params = query.params(default_window)?;

    let series = normalize(&payload)?;
    let summary = SignalSummary::from_series(&series);
    info!(
        "Timestamps count: {}, RMS values count: {}",
        series.timestamps.len(),
        series.magnitudes.len()
    );
    info!(
        "Statistics: mean_rms={}, max_rms={}, duration={}",
        summary.mean_rms, summary.max_rms, summary.duration
    );

    info!(
        "Applying filter: {} with window size: {}",
        params.kind, params.window_size
    );
    let filtered_values = apply_filter(&series.magnitudes, params.kind, params.window_size)?;

    Ok(FilterOutput { filtered_values })
}
