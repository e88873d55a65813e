use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

pub const FORM_TITLE: &str = "Search for the Weather";
pub const INPUT_LABEL: &str = "City Name";
pub const FETCHING_HINT: &str = "Fetching weather...";

/// Rows the form needs: title, bordered input, button, message line.
pub const FORM_HEIGHT: u16 = 6;

/// Title, "City Name" field, "Search" button and the error line under it
pub struct SearchForm {
    input: TextInput,
    had_text: bool,
}

pub struct SearchFormProps<'a> {
    pub value: &'a str,
    pub error: Option<&'a str>,
    pub is_fetching: bool,
    pub is_focused: bool,
    // Action constructors
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            had_text: false,
        }
    }
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the cursor once the field has been cleared by a submit.
    pub fn sync(&mut self, value: &str) {
        if value.is_empty() && self.had_text {
            self.input = TextInput::new();
        }
        self.had_text = !value.is_empty();
    }
}

impl Component<Action> for SearchForm {
    type Props<'a> = SearchFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Enter => return vec![(props.on_submit)(props.value.to_string())],
            _ => {}
        }

        self.sync(props.value);
        let input_props = TextInputProps {
            value: props.value,
            placeholder: "e.g. London",
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.value);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Input
            Constraint::Length(1), // Button
            Constraint::Length(1), // Error / fetching
        ])
        .split(area);

        let title = Line::from(Span::styled(
            FORM_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ))
        .centered();
        frame.render_widget(Paragraph::new(title), chunks[0]);

        let border_color = if props.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {INPUT_LABEL} * "));
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        let input_props = TextInputProps {
            value: props.value,
            placeholder: "e.g. London",
            is_focused: props.is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, inner, input_props);

        let button = Line::from(vec![
            Span::styled("[ Search ]", Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
            Span::styled("  press Enter", Style::default().fg(Color::DarkGray)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(button), chunks[2]);

        let message = match (props.error, props.is_fetching) {
            (Some(error), _) => Some(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(220, 90, 90)).bold(),
            )),
            (None, true) => Some(Span::styled(
                FETCHING_HINT,
                Style::default().fg(Color::DarkGray),
            )),
            (None, false) => None,
        };
        if let Some(message) = message {
            frame.render_widget(Paragraph::new(Line::from(message).centered()), chunks[3]);
        }
    }
}
