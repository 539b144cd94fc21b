//! The weather board: tracked city slots plus one search slot.
//!
//! State lives behind an `RwLock` shared with the spawned fetch tasks; a
//! completion handler takes the write lock only to replace its own key, so
//! slots never block one another. Requires an ambient tokio runtime.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;

use skywatch_core::{AppError, Config};
use skywatch_owm::{ClientConfig, WeatherClient};

use crate::card::{card_for_slot, CardView};
use crate::slot::{FetchState, SearchSlot};

/// Slot lookup key: the lowercased label. Two labels that lowercase equally
/// share one entry; rendering keys off the current label list, so entries
/// orphaned by renames are simply never shown again.
fn slot_key(label: &str) -> String {
    label.to_lowercase()
}

#[derive(Debug, Default)]
struct BoardState {
    /// Tracked slot labels, in display order.
    labels: Vec<String>,
    /// Lowercased label -> state of that slot's latest request.
    tracked: HashMap<String, FetchState>,
    /// The search slot, once a search has been submitted.
    search: Option<SearchSlot>,
    /// Standalone banner message for the last failed search.
    search_error: Option<String>,
    /// Raw search box text.
    search_input: String,
}

/// Owns all slot state and orchestrates the per-slot fetches.
#[derive(Clone)]
pub struct WeatherBoard {
    client: Arc<WeatherClient>,
    state: Arc<RwLock<BoardState>>,
}

impl WeatherBoard {
    /// Create a board over the given client and tracked labels.
    ///
    /// No fetches are started; call [`initialize`](Self::initialize).
    pub fn new(client: WeatherClient, labels: Vec<String>) -> Self {
        let state = BoardState {
            labels,
            ..Default::default()
        };
        Self {
            client: Arc::new(client),
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Create a board wired from application configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client_config = ClientConfig::new(config.provider.api_key.clone())
            .with_base_url(config.provider.base_url.clone());
        let client =
            WeatherClient::new(client_config).map_err(|e| AppError::Weather(e.to_string()))?;
        Ok(Self::new(client, config.board.cities.clone()))
    }

    /// Kick off one refresh per tracked label, all concurrently in flight.
    ///
    /// Completion order is unspecified; each slot updates independently.
    /// The returned handles let callers await settlement; dropping them
    /// detaches the fetches.
    pub fn initialize(&self) -> Vec<JoinHandle<()>> {
        let labels = self.state.read().labels.clone();
        labels.iter().map(|label| self.refresh(label)).collect()
    }

    /// Refresh one slot: flip it to Loading now, then spawn the fetch.
    ///
    /// Fire-and-forget for the caller. A superseded in-flight request is
    /// NOT cancelled: whichever response arrives last wins the slot, so a
    /// stale response can overwrite a newer one. That matches the rendered
    /// behavior this board reproduces; see DESIGN.md before "fixing" it.
    pub fn refresh(&self, label: &str) -> JoinHandle<()> {
        let key = slot_key(label);
        self.state
            .write()
            .tracked
            .insert(key.clone(), FetchState::Loading);

        tracing::debug!(%label, "refreshing slot");
        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        let query = label.to_string();
        tokio::spawn(async move {
            let next = match client.fetch_current_weather(&query).await {
                Ok(snapshot) => FetchState::Ready(snapshot),
                Err(e) => FetchState::Failed(e.to_string()),
            };
            state.write().tracked.insert(key, next);
        })
    }

    /// Replace the label at `index` and refresh it when non-blank.
    ///
    /// Structural edit only: the old label's map entry is left in place
    /// (bounded leakage, slot count is small). A blank new label triggers
    /// no fetch and its card falls back to the Loading display. The new
    /// label is queried verbatim; trimming is only the emptiness check.
    pub fn rename_slot(&self, index: usize, new_label: &str) -> Option<JoinHandle<()>> {
        {
            let mut state = self.state.write();
            let Some(slot) = state.labels.get_mut(index) else {
                tracing::warn!(index, "rename ignored: no slot at that index");
                return None;
            };
            *slot = new_label.to_string();
        }

        if new_label.trim().is_empty() {
            None
        } else {
            Some(self.refresh(new_label))
        }
    }

    /// Set the raw search box text.
    pub fn set_search_input(&self, text: &str) {
        self.state.write().search_input = text.to_string();
    }

    /// Submit the current search input.
    ///
    /// Clears the banner, then trims; a blank query is a no-op that leaves
    /// the previous search result and the input untouched. Otherwise the
    /// search slot goes Loading and this awaits its own fetch (tracked
    /// slots are unaffected). On failure both the slot and the banner carry
    /// the message. The input is cleared once the request settles.
    pub async fn submit_search(&self) {
        let trimmed = {
            let mut state = self.state.write();
            state.search_error = None;
            state.search_input.trim().to_string()
        };
        if trimmed.is_empty() {
            return;
        }

        self.state.write().search = Some(SearchSlot {
            query: trimmed.clone(),
            state: FetchState::Loading,
        });

        tracing::debug!(query = %trimmed, "searching");
        let result = self.client.fetch_current_weather(&trimmed).await;

        let mut state = self.state.write();
        match result {
            Ok(snapshot) => {
                state.search = Some(SearchSlot {
                    query: trimmed,
                    state: FetchState::Ready(snapshot),
                });
            }
            Err(e) => {
                let message = e.to_string();
                state.search = Some(SearchSlot {
                    query: trimmed.clone(),
                    state: FetchState::Failed(message.clone()),
                });
                state.search_error = Some(format!(
                    "Could not find weather for \"{}\": {}",
                    trimmed, message
                ));
            }
        }
        state.search_input.clear();
    }

    // ===== Read-side accessors for the rendering surface =====

    /// Tracked labels in display order.
    pub fn labels(&self) -> Vec<String> {
        self.state.read().labels.clone()
    }

    /// State of the slot for `label`, if any request was ever started.
    pub fn slot_state(&self, label: &str) -> Option<FetchState> {
        self.state.read().tracked.get(&slot_key(label)).cloned()
    }

    /// One card per tracked label, in display order.
    pub fn cards(&self) -> Vec<CardView> {
        let state = self.state.read();
        state
            .labels
            .iter()
            .map(|label| card_for_slot(label, state.tracked.get(&slot_key(label))))
            .collect()
    }

    /// Card for a single tracked label.
    pub fn card_for(&self, label: &str) -> CardView {
        let state = self.state.read();
        card_for_slot(label, state.tracked.get(&slot_key(label)))
    }

    /// The search slot, once a search has been submitted.
    pub fn search_slot(&self) -> Option<SearchSlot> {
        self.state.read().search.clone()
    }

    /// Card for the search slot, labeled by its query.
    pub fn search_card(&self) -> Option<CardView> {
        let state = self.state.read();
        state
            .search
            .as_ref()
            .map(|slot| card_for_slot(&slot.query, Some(&slot.state)))
    }

    /// Banner message for the last failed search.
    pub fn search_error(&self) -> Option<String> {
        self.state.read().search_error.clone()
    }

    /// Raw search box text.
    pub fn search_input(&self) -> String {
        self.state.read().search_input.clone()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn offline_board(labels: &[&str]) -> WeatherBoard {
        let client = WeatherClient::new(ClientConfig::new("test-key")).unwrap();
        WeatherBoard::new(client, labels.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn new_board_has_no_slot_state() {
        let board = offline_board(&["Manila", "Bern"]);
        assert_eq!(board.labels(), vec!["Manila", "Bern"]);
        assert_eq!(board.slot_state("Manila"), None);
        assert!(board
            .cards()
            .iter()
            .all(|card| matches!(card, CardView::Loading { .. })));
    }

    #[test]
    fn rename_out_of_range_is_a_noop() {
        let board = offline_board(&["Manila"]);
        assert!(board.rename_slot(5, "Tokyo").is_none());
        assert_eq!(board.labels(), vec!["Manila"]);
    }

    #[test]
    fn rename_to_blank_replaces_label_without_fetch() {
        let board = offline_board(&["Manila", "Bern"]);
        let handle = board.rename_slot(1, "   ");
        assert!(handle.is_none());
        assert_eq!(board.labels(), vec!["Manila", "   "]);
        assert_eq!(board.slot_state("   "), None);
        assert_eq!(
            board.card_for("   "),
            CardView::Loading {
                label: "   ".into()
            }
        );
    }

    #[test]
    fn slot_lookup_is_case_insensitive() {
        let board = offline_board(&["Oslo"]);
        board
            .state
            .write()
            .tracked
            .insert(slot_key("Oslo"), FetchState::Failed("HTTP 500".into()));
        assert_eq!(
            board.slot_state("OSLO"),
            Some(FetchState::Failed("HTTP 500".into()))
        );
    }

    #[test]
    fn from_config_builds_board_with_configured_cities() {
        let config = Config::default();
        let board = WeatherBoard::from_config(&config).unwrap();
        assert_eq!(board.labels(), config.board.cities);
    }
}
