//! Error types for the HUC12 lookup library.

use thiserror::Error;

/// Errors that can occur while resolving points to subwatersheds.
///
/// Advisory conditions (coordinates outside the region, empty or failed
/// service responses) are not errors; they surface as
/// [`LookupWarning`](crate::LookupWarning)s on an otherwise successful lookup.
#[derive(Error, Debug)]
pub enum Huc12Error {
    /// Transport-level failure talking to the feature service.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured service URL, or a query built from it, is not a valid URL.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The x, y and CRS sequences cannot be broadcast to a common length.
    #[error("Input lengths cannot be broadcast together: x={x}, y={y}, crs={crs}")]
    LengthMismatch { x: usize, y: usize, crs: usize },

    /// A configuration value could not be interpreted.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias using [`Huc12Error`].
pub type Result<T> = std::result::Result<T, Huc12Error>;
