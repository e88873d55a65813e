use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::sprites::{self, Illustration, SpriteSize};
use crate::state::{WeatherReport, format_celsius, format_time_of_day};

pub const EMPTY_HINT: &str = "Type a city and press Enter";

/// Width reserved for the illustration column (Large sprite + margin).
const SPRITE_COLUMN: u16 = 29;

/// Detail rows: temperature, max, min, feels like, description, sunrise, sunset.
const DETAIL_ROWS: u16 = 7;

/// Cap for the large temperature text (terminus font height).
const BIG_TEMP_CAP: u16 = 6;

pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub report: Option<&'a WeatherReport>,
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match props.report {
            Some(report) => render_report(frame, area, report),
            None => render_empty(frame, area),
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render_report(frame: &mut Frame, area: Rect, report: &WeatherReport) {
    let rows = Layout::vertical([
        Constraint::Length(1), // Headline
        Constraint::Length(1), // Spacer
        Constraint::Min(DETAIL_ROWS),
    ])
    .split(area);

    let headline = Line::from(Span::styled(
        report.headline(),
        Style::default()
            .fg(headline_color(report.temperature))
            .add_modifier(Modifier::BOLD),
    ))
    .centered();
    frame.render_widget(Paragraph::new(headline), rows[0]);

    let columns =
        Layout::horizontal([Constraint::Length(SPRITE_COLUMN), Constraint::Fill(1)]).split(rows[2]);

    render_illustration(frame, columns[0], report.illustration());
    render_readings(frame, columns[1], report);
}

fn render_illustration(frame: &mut Frame, area: Rect, illustration: Illustration) {
    // One row below the art for the caption
    let art_height = area.height.saturating_sub(1);
    let chunks = match SpriteSize::for_height(art_height) {
        Some(size) => {
            let art = sprites::get_sprite(illustration, size);
            let chunks = Layout::vertical([
                Constraint::Length(art.lines.len() as u16),
                Constraint::Length(1),
            ])
            .flex(Flex::Center)
            .split(area);
            frame.render_widget(Paragraph::new(art).alignment(Alignment::Center), chunks[0]);
            chunks
        }
        None => {
            let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
                .flex(Flex::Center)
                .split(area);
            frame.render_widget(
                Paragraph::new(Line::from(illustration.emoji()).centered()),
                chunks[0],
            );
            chunks
        }
    };

    let caption = Line::from(Span::styled(
        format!("[ {} ]", illustration.label()),
        Style::default().fg(Color::DarkGray),
    ))
    .centered();
    frame.render_widget(Paragraph::new(caption), chunks[1]);
}

fn render_readings(frame: &mut Frame, area: Rect, report: &WeatherReport) {
    let big_cap = area.height.saturating_sub(DETAIL_ROWS + 1).min(BIG_TEMP_CAP);
    let chunks = Layout::vertical([
        Constraint::Length(big_cap),
        Constraint::Length(if big_cap > 0 { 1 } else { 0 }),
        Constraint::Length(DETAIL_ROWS),
    ])
    .flex(Flex::Center)
    .split(area);

    if big_cap > 0 {
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_gradient(report.temperature));
        frame.render_widget(
            ArtBox::new(&renderer, &format_celsius(report.temperature)),
            chunks[0],
        );
    }

    let lines: Vec<Line> = detail_rows(report)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
                Span::styled(
                    value,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[2]);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);
    let hint = Line::from(Span::styled(EMPTY_HINT, Style::default().fg(Color::DarkGray))).centered();
    frame.render_widget(Paragraph::new(hint), chunks[0]);
}

// ============================================================================
// Helpers
// ============================================================================

/// Label/value pairs in display order; times use the viewer's local zone.
pub fn detail_rows(report: &WeatherReport) -> Vec<(&'static str, String)> {
    vec![
        ("Temperature", format_celsius(report.temperature)),
        ("Max Temp", format_celsius(report.max_temperature)),
        ("Min Temp", format_celsius(report.min_temperature)),
        ("Feels Like", format_celsius(report.feels_like)),
        ("Description", report.description.clone()),
        ("Sunrise", format_time_of_day(report.sunrise, &Local)),
        ("Sunset", format_time_of_day(report.sunset, &Local)),
    ]
}

fn headline_color(celsius: f64) -> Color {
    match Illustration::for_temperature(celsius) {
        Illustration::Hot => Color::Rgb(255, 140, 80),
        Illustration::Regular => Color::Rgb(120, 210, 150),
        Illustration::Cold => Color::Rgb(130, 190, 255),
    }
}

fn temperature_gradient(celsius: f64) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        t if t <= 15.0 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        t if t <= 30.0 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        _ => (ArtColor::rgb(255, 140, 80), ArtColor::rgb(255, 60, 60)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
