use super::helper::*;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::card::{CardState, NetworkCard};
use crate::source::{BalanceRecord, TransactionRecord};

const RETRY_HINT: &str = "Ctrl-R retry";
const RETRY_HINT_UNFOCUSED: &str = "Tab to focus • Ctrl-R retry • Ctrl-A retry all";

pub fn draw_card(frame: &mut Frame, area: Rect, app: &App, card: &NetworkCard, focused: bool) {
    let meta = card.meta();

    let border_color = match (card.state(), focused) {
        (CardState::Failed(_), _) => Color::Red,
        (_, true) => Color::Cyan,
        _ => Color::DarkGray,
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", app.card_title(meta)));
    if focused {
        block = block.title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    }

    let mut lines = vec![];

    if let Some(address) = card.address() {
        let (prefix, suffix) = meta.truncate_window;
        lines.push(format_kv(
            "Address",
            &truncate_middle(address.as_str(), prefix, suffix),
        ));
    }

    match card.state() {
        CardState::Idle => {
            lines.push(Line::from(""));
            lines.push(Line::from("Waiting for an address").fg(Color::DarkGray));
        }
        CardState::Loading => {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("{} Loading...", spinner_frame())).fg(Color::Yellow));
        }
        CardState::Loaded {
            balance,
            transactions,
            fetched_at,
        } => {
            push_balance(&mut lines, balance, meta.unit);

            if meta.has_transactions() {
                push_transactions(&mut lines, card, transactions, focused);
            }

            if let Some(address) = card.address() {
                lines.push(Line::from(""));
                lines.push(format_link(&meta.address_url(address.as_str())));
            }

            lines.push(Line::from(""));
            lines.push(
                Line::from(format!("Updated {}", format_clock(fetched_at))).fg(Color::DarkGray),
            );
        }
        CardState::Failed(reason) => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Failed to load",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            for line in reason.lines() {
                lines.push(Line::from(line.to_string()).fg(Color::Red));
            }
            lines.push(Line::from(""));
            let hint = if focused {
                RETRY_HINT
            } else {
                RETRY_HINT_UNFOCUSED
            };
            lines.push(Line::from(hint).fg(Color::DarkGray));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn push_balance(lines: &mut Vec<Line<'static>>, balance: &BalanceRecord, unit: &str) {
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Balance: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format_native(balance.native_amount, unit),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(format_kv("USD", &format_usd(balance.usd_estimate)));
}

fn push_transactions(
    lines: &mut Vec<Line<'static>>,
    card: &NetworkCard,
    transactions: &[TransactionRecord],
    focused: bool,
) {
    let meta = card.meta();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "── Recent Transactions ──",
        Style::default().fg(Color::DarkGray),
    )]));

    if transactions.is_empty() {
        lines.push(Line::from("No transactions found").fg(Color::DarkGray));
        return;
    }

    let (prefix, suffix) = meta.truncate_window;
    for tx in transactions {
        lines.push(Line::from(vec![
            Span::styled(
                truncate_middle(&tx.hash, prefix, suffix),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" "),
            Span::styled(
                format_native(tx.value_native, meta.unit),
                Style::default().fg(Color::Yellow),
            ),
        ]));
        lines.push(Line::from(format!("  {}", format_timestamp(&tx.timestamp))).fg(Color::Gray));

        // Full explorer links only fit on the focused card
        if focused {
            if let Some(url) = meta.tx_url(&tx.hash) {
                lines.push(format_link(&url));
            }
        }
    }
}
