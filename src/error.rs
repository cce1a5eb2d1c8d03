//! Library error type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SoilError>;

#[derive(Debug, Error)]
pub enum SoilError {
    #[error("Please enter a location to search")]
    EmptyQuery,

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Invalid coordinates: lat {lat}, lon {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("Request failed: {0}")]
    Http(String),

    #[error("Upstream error ({status}) from {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    #[error("Soil service returned no values for this location")]
    EmptySoilData,

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SoilError {
    /// Errors caused by the caller's input rather than an upstream service.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SoilError::EmptyQuery
                | SoilError::LocationNotFound(_)
                | SoilError::InvalidCoordinates { .. }
        )
    }
}
