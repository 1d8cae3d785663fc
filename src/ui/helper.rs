use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use rust_decimal::{Decimal, RoundingStrategy};

// ============================================================================
// Helper Functions
// ============================================================================

/// Keep `prefix` leading and `suffix` trailing characters around an ellipsis.
/// Strings already short enough (including previously truncated ones) are
/// returned unchanged.
pub fn truncate_middle(s: &str, prefix: usize, suffix: usize) -> String {
    let len = s.chars().count();
    if len <= prefix + suffix + 3 {
        return s.to_string();
    }

    let head: String = s.chars().take(prefix).collect();
    let tail: String = s.chars().skip(len - suffix).collect();
    format!("{head}...{tail}")
}

/// Fixed number of decimal places, half away from zero
pub fn format_amount(amount: Decimal, dp: u32) -> String {
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

pub fn format_native(amount: Decimal, unit: &str) -> String {
    format!("{} {unit}", format_amount(amount, 6))
}

/// Missing estimates render as a dash so they are never mistaken for zero
pub fn format_usd(amount: Option<Decimal>) -> String {
    match amount {
        Some(usd) => format!("${}", format_amount(usd, 2)),
        None => "—".to_string(),
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

pub fn format_clock(ts: &DateTime<Utc>) -> String {
    ts.format("%H:%M:%S UTC").to_string()
}

pub fn format_kv(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

pub fn format_link(url: &str) -> Line<'static> {
    Line::from(Span::styled(
        url.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn spinner_frame() -> &'static str {
    const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let idx = (Utc::now().timestamp_millis() / 100).rem_euclid(FRAMES.len() as i64) as usize;
    FRAMES[idx]
}

pub fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let popup_layout = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(area);

    popup_layout[1]
}

pub fn padded_rect(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding,
        y: area.y + padding,
        width: area.width.saturating_sub(padding * 2),
        height: area.height.saturating_sub(padding * 2),
    }
}
