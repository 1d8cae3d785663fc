mod card_panel;
mod helper;

use card_panel::draw_card;
use helper::*;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::health::{HealthStatus, SystemHealth};

const TITLE: &str = "◆ chainboard";
const SUBTITLE: &str = "PoSELedger address dashboard";

const NAV_HELP: &str = "Enter load • ↑↓ recent • Del remove • Tab focus • \
                        Ctrl-R retry • Ctrl-A retry failed • Esc quit";

const MAX_HISTORY_ROWS: usize = 5;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = padded_rect(frame.area(), 1);

    let recent = app.get_recent_addresses();
    let history_height = if recent.is_empty() {
        0
    } else {
        (recent.len().min(MAX_HISTORY_ROWS) + 2) as u16
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),              // Title
        Constraint::Length(1),              // Health
        Constraint::Length(1),              // Spacing
        Constraint::Length(3),              // Address input
        Constraint::Length(1),              // Notice / committed address
        Constraint::Length(history_height), // Recent addresses
        Constraint::Min(8),                 // Cards
        Constraint::Length(1),              // Help
    ])
    .split(area);

    draw_title(frame, chunks[0]);
    draw_health(frame, app, chunks[1]);

    let input_area = centered_rect(80, chunks[3]);
    draw_address_input(frame, app, input_area);
    draw_notice(frame, app, centered_rect(80, chunks[4]));

    if history_height > 0 {
        draw_history_list(frame, app, centered_rect(80, chunks[5]));
    }

    draw_cards(frame, app, chunks[6]);

    let help = Paragraph::new(NAV_HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[7]);
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(TITLE, Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("  {SUBTITLE}"), Style::default().fg(Color::Gray)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn health_spans(label: &str, status: &HealthStatus) -> Vec<Span<'static>> {
    let color = match status {
        HealthStatus::Checking => Color::Yellow,
        HealthStatus::Healthy(_) => Color::Green,
        HealthStatus::Unhealthy(_) => Color::Red,
    };

    let mut spans = vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("● {}", status.label()), Style::default().fg(color)),
    ];
    if let Some(msg) = status.message() {
        spans.push(Span::styled(
            format!(" ({})", truncate_middle(msg, 24, 8)),
            Style::default().fg(Color::Gray),
        ));
    }
    spans
}

fn draw_health(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = health_spans("Core API", &app.health.core);
    spans.push(Span::raw("   "));
    spans.extend(health_spans("Agent", &app.health.agent));

    let summary = match app.health.summary() {
        SystemHealth::Checking => None,
        SystemHealth::AllHealthy => Some(("All systems operational", Color::Green)),
        SystemHealth::PartialDegradation => Some(("Partial degradation", Color::Yellow)),
        SystemHealth::Outage => Some(("Backend unavailable", Color::Red)),
    };
    if let Some((text, color)) = summary {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(text, Style::default().fg(color).bold()));
    }

    let health = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(health, area);
}

fn draw_address_input(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.selected_history_index.is_none();
    let border_color = if app.notice.is_some() {
        Color::Red
    } else if selected {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Address ")
        .title_style(Style::default().fg(border_color));

    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll = app.input.visual_scroll(inner_width);

    let display_text = if app.input.value().is_empty() {
        Span::styled(
            "0x followed by 40 hex characters",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(app.input.value(), Style::default().fg(Color::White))
    };

    let input = Paragraph::new(display_text)
        .block(block)
        .scroll((0, scroll as u16));

    frame.render_widget(input, area);

    // Only show cursor if the input box is selected
    if selected {
        let cursor_x = area.x + 1 + (app.input.visual_cursor().saturating_sub(scroll)) as u16;
        let cursor_y = area.y + 1;

        if cursor_x < area.x + area.width.saturating_sub(1) {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

fn draw_notice(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.notice {
        Some(notice) => Line::from(format!("✗ {notice}")).fg(Color::Red),
        None => {
            let address = app.address();
            let shown = address
                .checksummed()
                .unwrap_or_else(|| address.to_string());
            Line::from(vec![
                Span::styled("Viewing: ", Style::default().fg(Color::DarkGray)),
                Span::styled(shown, Style::default().fg(Color::Gray)),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn draw_history_list(frame: &mut Frame, app: &App, area: Rect) {
    let recent = app.get_recent_addresses();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Recent Addresses ");

    let items: Vec<ListItem> = recent
        .iter()
        .map(|address| ListItem::new(format!(" {address}")).style(Style::default().fg(Color::Gray)))
        .collect();

    // Scrolls so the selected entry stays visible past the first rows
    let mut state = ListState::default().with_selected(app.selected_history_index);
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_cards(frame: &mut Frame, app: &App, area: Rect) {
    let cards = app.cards();
    if cards.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let columns = Layout::horizontal(constraints).split(area);

    for (i, (card, column)) in cards.iter().zip(columns.iter()).enumerate() {
        draw_card(frame, *column, app, card, app.focused_card == i);
    }
}
