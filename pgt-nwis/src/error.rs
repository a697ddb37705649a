/// Error types for loading trends and station metadata
use thiserror::Error;

/// Startup failures. Any of these ends the session before the map is drawn.
#[derive(Error, Debug)]
pub enum TrendsError {
    /// The trend CSV is missing, unreadable, malformed or empty
    #[error("Trend data unavailable: {0}")]
    DataUnavailable(String),

    /// The NWIS site service could not be reached or answered with an error
    #[error("Station lookup unavailable: {0}")]
    LookupUnavailable(String),

    /// The NWIS site service answered but returned no usable stations
    #[error("Station metadata incomplete: no records returned for {requested} requested sites")]
    IncompleteMetadata { requested: usize },
}

impl From<csv::Error> for TrendsError {
    fn from(e: csv::Error) -> Self {
        TrendsError::DataUnavailable(e.to_string())
    }
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for TrendsError {
    fn from(e: reqwest::Error) -> Self {
        TrendsError::LookupUnavailable(e.to_string())
    }
}

/// Type alias for Results using TrendsError
pub type Result<T> = std::result::Result<T, TrendsError>;
