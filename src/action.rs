//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReport;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== City category =====
    /// "City Name" field text changed
    CityInputChange(String),

    /// Search submitted with the given field text
    CitySubmit(String),

    // ===== Weather category =====
    /// Result: conditions fetched for a submitted city
    WeatherDidLoad(WeatherReport),

    /// Result: the query failed; carries the diagnostic, not the UI message
    WeatherDidError(String),

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Exit the application
    Quit,
}
