use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("The length of the input vector must be greater than padlen, which is {padlen} (got {len})")]
    SignalTooShort { len: usize, padlen: usize },

    #[error("Invalid filter parameter: {0}")]
    InvalidParameter(String),

    #[error("Filter processing failed: {0}")]
    Processing(String),
}

impl FilterError {
    /// True when the failure was caused by the caller's payload rather than by filtering
    pub fn is_input_error(&self) -> bool {
        matches!(self, FilterError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
