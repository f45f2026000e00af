use crate::types::SampleSeries;
use serde::Serialize;

/// Descriptive statistics of a raw series, for request logging.
/// Missing (NaN) samples are ignored; with no valid samples the fields are NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalSummary {
    pub count: usize,
    pub mean_rms: f64,
    pub max_rms: f64,
    pub duration: f64,
}

impl SignalSummary {
    pub fn from_series(series: &SampleSeries) -> Self {
        let (sum, valid, max_rms) = series
            .magnitudes
            .iter()
            .filter(|v| !v.is_nan())
            .fold((0.0, 0usize, f64::NAN), |(sum, n, max), &v| {
                (sum + v, n + 1, v.max(max))
            });

        let (min_ts, max_ts) = series
            .timestamps
            .iter()
            .filter(|t| !t.is_nan())
            .fold((f64::NAN, f64::NAN), |(lo, hi), &t| (t.min(lo), t.max(hi)));

        Self {
            count: series.len(),
            mean_rms: if valid > 0 { sum / valid as f64 } else { f64::NAN },
            max_rms,
            duration: max_ts - min_ts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let series = SampleSeries {
            timestamps: vec![2.0, 2.5, 3.0, 4.5],
            magnitudes: vec![0.5, 1.5, f64::NAN, 1.0],
        };
        let summary = SignalSummary::from_series(&series);
        assert_eq!(summary.count, 4);
        assert!((summary.mean_rms - 1.0).abs() < 1e-12);
        assert_eq!(summary.max_rms, 1.5);
        assert!((summary.duration - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_missing() {
        let series = SampleSeries {
            timestamps: vec![0.0],
            magnitudes: vec![f64::NAN],
        };
        let summary = SignalSummary::from_series(&series);
        assert!(summary.mean_rms.is_nan());
        assert!(summary.max_rms.is_nan());
        assert_eq!(summary.duration, 0.0);
    }
}
