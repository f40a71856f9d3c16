//! Main layout orchestration.
//!
//! Renders the overall dashboard structure:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  HELMWATCH  Helmet Detection System      ⏻ Server ●  ⚙ Hardware ●│
//! ├──────────────────────────────────────┬──────────────────────────┤
//! │  ACCESS LOGS                         │  CLIENT INFORMATION      │
//! │  (paginated table + countdown)       │  14:32:05                │
//! │                                      │  SATURDAY 30 AUGUST 2026 │
//! │                                      │  HARDWARE WEATHER        │
//! │                                      │  ☀⛆ Rain showers         │
//! ├──────────────────────────────────────┴──────────────────────────┤
//! │  [←/p] Prev  [→/n] Next  [+/-] Page size  [R] Refresh  [Q] Quit │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

use super::{header, log_table, weather_panel};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Main vertical layout: header, body, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Footer (keybinds)
        ])
        .split(size);

    header::render(frame, main_chunks[0], app);
    render_body(frame, main_chunks[1], app);
    render_footer(frame, main_chunks[2]);
}

/// Render the main body (log table + weather panel).
fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    // Horizontal split: log table (rest) + weather panel (fixed width)
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(48),    // Log table
            Constraint::Length(38), // Clock + weather
        ])
        .split(area);

    log_table::render(frame, body_chunks[0], app);
    weather_panel::render(frame, body_chunks[1], app);
}

/// Render the footer with keyboard shortcuts.
fn render_footer(frame: &mut Frame, area: Rect) {
    let keybinds = vec![
        Span::styled("[←/p]", Style::default().fg(Color::Yellow)),
        Span::raw(" Prev  "),
        Span::styled("[→/n]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[+/-]", Style::default().fg(Color::Yellow)),
        Span::raw(" Page size  "),
        Span::styled("[R]", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit  "),
    ];

    let footer = Paragraph::new(Line::from(keybinds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .centered();

    frame.render_widget(footer, area);
}
