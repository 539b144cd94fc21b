//! Per-slot fetch state.
//!
//! Every slot (tracked city or the search box) owns exactly one
//! [`FetchState`]. Transitions are one-directional per request
//! (Loading to Ready or Failed) and restart at Loading on a new request.

use skywatch_owm::WeatherSnapshot;

/// Status of a slot's most recent request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    /// Request in flight, or slot not yet initialized.
    #[default]
    Loading,
    /// Last request succeeded.
    Ready(WeatherSnapshot),
    /// Last request failed; the message is displayable as-is.
    Failed(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    /// The snapshot, when ready.
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            FetchState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// The failure message, when failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The one extra slot driven by the search box.
///
/// Holds the last-submitted (trimmed) query and its own state; overwritten
/// wholesale by each new search. Independent of the tracked list.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSlot {
    pub query: String,
    pub state: FetchState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_loading() {
        let state = FetchState::default();
        assert!(state.is_loading());
        assert!(state.snapshot().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn ready_exposes_snapshot() {
        let snapshot = WeatherSnapshot {
            location_name: Some("Bern".into()),
            ..Default::default()
        };
        let state = FetchState::Ready(snapshot.clone());
        assert!(state.is_ready());
        assert_eq!(state.snapshot(), Some(&snapshot));
    }

    #[test]
    fn failed_exposes_message() {
        let state = FetchState::Failed("city not found".into());
        assert!(state.is_failed());
        assert_eq!(state.error(), Some("city not found"));
    }
}
