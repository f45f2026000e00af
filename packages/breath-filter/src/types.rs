use serde::{Deserialize, Serialize};

/// Window size used by the moving average when the caller does not supply one
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Smoothing strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    None,
    MovingAverage,
    Lowpass,
    Adaptive,
}

impl FilterKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "moving_average" => Some(Self::MovingAverage),
            "lowpass" => Some(Self::Lowpass),
            "adaptive" => Some(Self::Adaptive),
            _ => None,
        }
    }

    /// Resolve an optional selector, falling back to `None` when absent or unrecognized
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some(s) => Self::from_str(s).unwrap_or_else(|| {
                log::debug!("Unrecognized filter '{}', applying no filter", s);
                Self::None
            }),
            None => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::MovingAverage => "moving_average",
            Self::Lowpass => "lowpass",
            Self::Adaptive => "adaptive",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter selection and its parameters for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub kind: FilterKind,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            kind: FilterKind::None,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl FilterParams {
    pub fn new(kind: FilterKind, window_size: usize) -> Self {
        Self { kind, window_size }
    }
}

/// Index-aligned timestamps and RMS magnitudes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSeries {
    pub timestamps: Vec<f64>,
    #[serde(rename = "rms_values")]
    pub magnitudes: Vec<f64>,
}

impl SampleSeries {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }
}

/// Filtered magnitudes, same length and alignment as the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOutput {
    pub filtered_values: Vec<f64>,
}
