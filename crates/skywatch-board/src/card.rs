//! Card derivation: pure projection of slot state into display strings.

use skywatch_owm::WeatherSnapshot;

use crate::slot::FetchState;

/// Base URL for provider condition icons.
pub const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

/// One rendered card, derived from a slot's state.
#[derive(Debug, Clone, PartialEq)]
pub enum CardView {
    /// Skeleton card: label only. Also the fallback for uninitialized slots.
    Loading { label: String },
    /// Error card: label plus the displayable failure message.
    Error { label: String, message: String },
    /// Full card with formatted conditions.
    Ready(WeatherCard),
}

/// Formatted fields of a full card.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    /// Place name, with a ", CC" country suffix when the code is known.
    pub title: String,
    /// Condition text, first letter uppercased.
    pub description: String,
    /// e.g. "Temp: 32°C (Feels 36°C)"
    pub temperature_line: String,
    /// e.g. "Humidity: 70%"; the unit stays even when the value is absent.
    pub humidity_line: String,
    /// e.g. "Wind: 3.1 m/s"; the unit stays even when the value is absent.
    pub wind_line: String,
    /// Icon image URL, only when the provider sent an icon code.
    pub icon_url: Option<String>,
}

impl WeatherCard {
    /// Format a snapshot for display. The slot label backs up a missing
    /// place name; absent numeric fields fall back to placeholders.
    pub fn from_snapshot(label: &str, snapshot: &WeatherSnapshot) -> Self {
        let name = snapshot.location_name.as_deref().unwrap_or(label);
        let title = match snapshot.country_code.as_deref() {
            Some(code) => format!("{}, {}", name, code),
            None => name.to_string(),
        };

        let temp = snapshot.temperature_c.unwrap_or(0.0).round() as i64;
        let feels = snapshot.feels_like_c.unwrap_or(0.0).round() as i64;

        let humidity = snapshot
            .humidity_percent
            .map(|h| h.to_string())
            .unwrap_or_default();
        let wind = snapshot
            .wind_speed_mps
            .map(|w| w.to_string())
            .unwrap_or_default();

        Self {
            title,
            description: capitalize_first(snapshot.description.as_deref().unwrap_or("\u{2014}")),
            temperature_line: format!("Temp: {}°C (Feels {}°C)", temp, feels),
            humidity_line: format!("Humidity: {}%", humidity),
            wind_line: format!("Wind: {} m/s", wind),
            icon_url: snapshot
                .icon_code
                .as_deref()
                .map(|code| format!("{}/{}@2x.png", ICON_URL_BASE, code)),
        }
    }
}

/// Derive the card for a slot. A missing entry renders as Loading.
pub fn card_for_slot(label: &str, state: Option<&FetchState>) -> CardView {
    match state {
        None | Some(FetchState::Loading) => CardView::Loading {
            label: label.to_string(),
        },
        Some(FetchState::Failed(message)) => CardView::Error {
            label: label.to_string(),
            message: message.clone(),
        },
        Some(FetchState::Ready(snapshot)) => {
            CardView::Ready(WeatherCard::from_snapshot(label, snapshot))
        }
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
