//! Weather board for Skywatch.
//!
//! Owns the tracked city slots and the search slot, runs their fetches
//! concurrently, and derives a render-ready card per slot. The board is the
//! only stateful piece; cards are pure projections of slot state.

pub mod board;
pub mod card;
pub mod slot;

pub use board::WeatherBoard;
pub use card::{CardView, WeatherCard, ICON_URL_BASE};
pub use slot::{FetchState, SearchSlot};
