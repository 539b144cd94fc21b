//! Normalized weather data types.

use serde::{Deserialize, Serialize};

/// Current conditions for one successful lookup, normalized for rendering.
///
/// The provider may omit any of these fields; every one is optional so a
/// sparse response renders with placeholders instead of failing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Resolved place name as reported by the provider.
    pub location_name: Option<String>,
    /// ISO country code, e.g. "PH".
    pub country_code: Option<String>,
    /// Temperature in degrees Celsius.
    pub temperature_c: Option<f64>,
    /// Perceived temperature in degrees Celsius.
    pub feels_like_c: Option<f64>,
    /// Relative humidity, 0..=100.
    pub humidity_percent: Option<u8>,
    /// Wind speed in meters per second.
    pub wind_speed_mps: Option<f64>,
    /// Lowercase condition text, e.g. "light rain".
    pub description: Option<String>,
    /// Provider icon code, e.g. "10d".
    pub icon_code: Option<String>,
}
