//! Paginated access-log table with refresh countdown.

use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::app::App;
use crate::error::HelmwatchError;
use crate::logs::LogEntry;

/// Render the log table panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " ACCESS LOGS ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = &app.logs_error {
        render_error(frame, inner, error);
        return;
    }

    let Some(page) = &app.logs else {
        let loading = Paragraph::new("Loading logs…").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, inner);
        return;
    };

    // Table body on top, pagination line pinned to the bottom
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    if page.data.is_empty() {
        let empty = Paragraph::new("No logs found")
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(empty, chunks[0]);
    } else {
        render_table(frame, chunks[0], &page.data);
    }

    render_pagination(frame, chunks[1], app);
}

fn render_error(frame: &mut Frame, area: Rect, error: &HelmwatchError) {
    // Friendly hint only; the full failure chain goes to the log file.
    let lines = vec![
        Line::from(Span::styled(
            "Error loading logs. Please try again.",
            Style::default().fg(Color::Red),
        )),
        Line::from(Span::styled(
            error.user_message(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_table(frame: &mut Frame, area: Rect, entries: &[LogEntry]) {
    let header = Row::new(vec![
        Cell::from("Image"),
        Cell::from("Status"),
        Cell::from("Created At"),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = entries
        .iter()
        .map(|entry| {
            let image_cell = match &entry.image {
                Some(path) => Cell::from(format!("▣ {}", file_name(path))),
                None => Cell::from(Span::styled(
                    "no image",
                    Style::default().fg(Color::DarkGray),
                )),
            };

            let badge_style = if entry.is_open {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            Row::new(vec![
                image_cell,
                Cell::from(Span::styled(entry.badge(), badge_style)),
                Cell::from(entry.format_created_at()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(8),
            Constraint::Min(24),
        ],
    )
    .header(header)
    .column_spacing(2);

    frame.render_widget(table, area);
}

fn render_pagination(frame: &mut Frame, area: Rect, app: &App) {
    let Some(page) = &app.logs else {
        return;
    };

    let spans = vec![
        Span::styled(
            format!(
                "Page {} of {} ({} total entries)",
                app.page,
                page.pagination.total_pages,
                page.pagination.total
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Show: {}", app.limit),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("   "),
        Span::styled("●", Style::default().fg(Color::Green)),
        Span::styled(
            format!(" Auto-refresh in {}s", app.refresh_countdown(Utc::now())),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Last path segment of a stored frame path, for compact display.
fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
