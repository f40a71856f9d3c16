//! Header bar: product title plus the Server and Hardware status pills.

use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::status::StatusLevel;

/// Pill indicator glyph, colored by state.
fn pill(level: StatusLevel) -> Span<'static> {
    let color = match level {
        StatusLevel::Success => Color::Green,
        StatusLevel::Error => Color::Red,
        StatusLevel::Idle => Color::DarkGray,
    };
    Span::styled("●", Style::default().fg(color))
}

/// Extra text after the server pill label: uptime while online, the last
/// sample time once the pill has gone red.
fn server_detail(app: &App) -> String {
    let Some(sample) = &app.server_sample else {
        return String::new();
    };
    if app.server == StatusLevel::Error {
        last_seen(sample.timestamp.as_deref())
    } else {
        sample
            .format_uptime()
            .map(|uptime| format!("up {uptime} "))
            .unwrap_or_default()
    }
}

/// Extra text after the hardware pill label: controller temperature while
/// online, the last sample time otherwise.
fn hardware_detail(app: &App) -> String {
    let Some(sample) = &app.hardware_sample else {
        return String::new();
    };
    if app.hardware == StatusLevel::Error {
        last_seen(sample.timestamp.as_deref())
    } else {
        sample
            .format_temperature()
            .map(|temp| format!("{temp} "))
            .unwrap_or_default()
    }
}

fn last_seen(timestamp: Option<&str>) -> String {
    let Some(raw) = timestamp else {
        return String::new();
    };
    let shown = DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string());
    format!("seen {shown} ")
}

/// Render the header bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title = vec![
        Span::styled(
            " HELMWATCH ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Helmet Detection System for Automatic Door Access",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let pills = vec![
        Span::raw("⏻ Server "),
        pill(app.server),
        Span::styled(
            format!(" {} ", app.server.label()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(server_detail(app), Style::default().fg(Color::DarkGray)),
        Span::raw("  ⚙ Hardware "),
        pill(app.hardware),
        Span::styled(
            format!(" {} ", app.hardware.label()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(hardware_detail(app), Style::default().fg(Color::DarkGray)),
    ];

    // Right-align the pills
    let title_len: usize = title.iter().map(|s| s.content.chars().count()).sum();
    let pills_len: usize = pills.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize)
        .saturating_sub(2) // borders
        .saturating_sub(title_len + pills_len);

    let mut spans = title;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.extend(pills);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}
