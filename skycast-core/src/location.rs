//! Device position seam.
//!
//! The widget never talks to positioning hardware itself; it asks a
//! [`GeolocationSource`] and maps the two failure modes to fixed user text.

use thiserror::Error;

/// Why a position could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Unable to retrieve your location. Please check browser permissions.")]
    Unavailable,

    #[error("Geolocation is not supported by your browser.")]
    Unsupported,
}

/// Something that can report the device position as `(lat, lon)`.
pub trait GeolocationSource {
    fn current_position(&self) -> Result<(f64, f64), GeolocationError>;
}

/// Fixed-position source, configured up front. No position at all reads as
/// an unsupported platform.
#[derive(Debug, Clone, Default)]
pub struct StaticPosition {
    pub position: Option<(f64, f64)>,
}

impl StaticPosition {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { position: Some((lat, lon)) }
    }
}

impl GeolocationSource for StaticPosition {
    fn current_position(&self) -> Result<(f64, f64), GeolocationError> {
        self.position.ok_or(GeolocationError::Unsupported)
    }
}
