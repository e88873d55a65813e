//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, QUERY_FAILED_MESSAGE};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== City actions =====
        Action::CityInputChange(text) => {
            if state.city_input == text {
                return DispatchResult::unchanged();
            }
            state.city_input = text;
            DispatchResult::changed()
        }

        Action::CitySubmit(city) => {
            // The field is reset on every submit, blank or not
            let cleared = !state.city_input.is_empty();
            state.city_input.clear();

            if city.trim().is_empty() {
                return if cleared {
                    DispatchResult::changed()
                } else {
                    DispatchResult::unchanged()
                };
            }

            state.error = None;
            state.pending_requests = state.pending_requests.saturating_add(1);
            let request_id = state.next_request_id;
            state.next_request_id = state.next_request_id.wrapping_add(1);
            DispatchResult::changed_with(Effect::FetchWeather { city, request_id })
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad(report) => {
            state.weather = Some(report);
            state.error = None;
            state.pending_requests = state.pending_requests.saturating_sub(1);
            DispatchResult::changed()
        }

        Action::WeatherDidError(_cause) => {
            // Cause is logged by the effect handler; the last good report stays
            state.error = Some(QUERY_FAILED_MESSAGE.to_string());
            state.pending_requests = state.pending_requests.saturating_sub(1);
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}
