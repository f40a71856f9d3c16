//! Right panel: reactive clock, date, and current hardware-site weather.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Render the clock + weather panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Clock + date
            Constraint::Min(8),    // Weather
        ])
        .split(area);

    render_clock(frame, chunks[0]);
    render_weather(frame, chunks[1], app);
}

fn render_clock(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " CLIENT INFORMATION ",
            Style::default().fg(Color::DarkGray),
        ));

    let now = Local::now();
    let lines = vec![
        Line::from(Span::styled(
            now.format("%H:%M:%S").to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(
            now.format("%A %d %B %Y").to_string().to_uppercase(),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_weather(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " HARDWARE WEATHER ",
            Style::default().fg(Color::DarkGray),
        ));

    let lines = if let Some(error) = &app.weather_error {
        vec![
            Line::from(Span::styled(
                "Weather unavailable",
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::styled(
                error.user_message(),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else if let Some(weather) = &app.weather {
        vec![
            Line::from(Span::styled(
                format!("{} {}", weather.glyph(), weather.label()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                weather.description(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::raw(format!("TEMP : {}", weather.format_temperature()))),
            Line::from(Span::raw(format!("HUMIDITY : {:.0}%", weather.humidity))),
            Line::from(Span::raw(format!(
                "WIND : {:.1} {}",
                weather.wind_speed, weather.wind_speed_unit
            ))),
            Line::from(""),
            Line::from(Span::styled(
                format!("Weather API Update At : {}", weather.sample_time),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else {
        vec![Line::from(Span::styled(
            "Loading weather…",
            Style::default().fg(Color::DarkGray),
        ))]
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
