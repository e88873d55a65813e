use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::search_form::FORM_HEIGHT;
use super::{Component, SearchForm, SearchFormProps, WeatherCard, WeatherCardProps};
use crate::action::Action;
use crate::state::AppState;

/// Props for WeatherWidget - read-only view of state
pub struct WeatherWidgetProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen: search form on top, conditions below, help bar last
#[derive(Default)]
pub struct WeatherWidget {
    form: SearchForm,
}

impl WeatherWidget {
    pub fn new() -> Self {
        Self::default()
    }

    fn form_props<'a>(state: &'a AppState, is_focused: bool) -> SearchFormProps<'a> {
        SearchFormProps {
            value: &state.city_input,
            error: state.error.as_deref(),
            is_fetching: state.is_fetching(),
            is_focused,
            on_change: Action::CityInputChange,
            on_submit: Action::CitySubmit,
        }
    }
}

impl Component<Action> for WeatherWidget {
    type Props<'a> = WeatherWidgetProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        self.form
            .handle_event(event, Self::form_props(props.state, props.is_focused))
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherWidgetProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(FORM_HEIGHT), // Form
            Constraint::Length(1),           // Spacer
            Constraint::Min(1),              // Card
            Constraint::Length(1),           // Help bar
        ])
        .split(area);

        self.form
            .render(frame, chunks[0], Self::form_props(props.state, props.is_focused));

        let mut card = WeatherCard;
        card.render(
            frame,
            chunks[2],
            WeatherCardProps {
                report: props.state.weather.as_ref(),
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("Enter", "search"),
                    StatusBarHint::new("Esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{QUERY_FAILED_MESSAGE, WeatherReport};
    use tui_dispatch::testing::*;

    #[test]
    fn test_handle_event_submit() {
        let mut widget = WeatherWidget::new();
        let state = AppState {
            city_input: "Accra".into(),
            ..Default::default()
        };
        let props = WeatherWidgetProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = widget
            .handle_event(&EventKind::Key(key("enter")), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::CitySubmit("Accra".into()));
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut widget = WeatherWidget::new();
        let state = AppState::default();
        let props = WeatherWidgetProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = widget
            .handle_event(&EventKind::Key(key("enter")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_error_alongside_previous_report() {
        let mut render = RenderHarness::new(80, 28);
        let mut widget = WeatherWidget::new();
        let state = AppState {
            weather: Some(WeatherReport {
                temperature: 9.0,
                city: "Reykjavik".into(),
                country: "IS".into(),
                description: "snow".into(),
                ..Default::default()
            }),
            error: Some(QUERY_FAILED_MESSAGE.into()),
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            let props = WeatherWidgetProps {
                state: &state,
                is_focused: true,
            };
            widget.render(frame, frame.area(), props);
        });

        assert!(output.contains(QUERY_FAILED_MESSAGE));
        assert!(output.contains("Weather in Reykjavik, IS"));
    }
}
