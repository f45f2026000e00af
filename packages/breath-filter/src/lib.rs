//! Smoothing filters for respiration RMS time series.
//!
//! A request payload is first normalized into a [`SampleSeries`] (see
//! [`normalizer`]) and then smoothed by one of the strategies in [`filters`].

pub mod error;
pub mod filters;
pub mod normalizer;
pub mod pipeline;
pub mod summary;
pub mod types;

pub use error::{FilterError, Result};
pub use filters::apply_filter;
pub use normalizer::normalize;
pub use pipeline::process_payload;
pub use summary::SignalSummary;
pub use types::*;
