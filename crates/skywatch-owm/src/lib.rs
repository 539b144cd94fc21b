//! OpenWeatherMap client for Skywatch.
//!
//! Provides a current-weather lookup client and the normalized snapshot
//! type the rest of the application renders from.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ClientConfig, WeatherClient, OWM_WEATHER_URL};
pub use error::LookupError;
pub use types::WeatherSnapshot;
