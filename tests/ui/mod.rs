//! UI rendering tests for chainboard
//!
//! These tests ensure the dashboard renders correctly by inspecting the buffer output.
//! Run with: cargo test --test ui_tests

pub mod card_tests;
pub mod common_tests;
pub mod home_tests;

use chainboard::app::App;
use chainboard::card::{CardOutcome, CardPayload};
use chainboard::config::Config;
use chainboard::error::FetchError;
use chainboard::health::{HealthReport, HealthStatus};
use chainboard::network::NetworkId;
use chainboard::source::{BalanceRecord, TransactionRecord};
use chainboard::ui::draw;

use chrono::DateTime;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use rust_decimal::Decimal;

pub const OTHER_ADDRESS: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f8fE31";

// ==================== Test Data Builders ====================

pub fn mock_config() -> Config {
    let mut config = Config::default();
    config.recent_addresses = vec![
        "0x1234567890abcdef1234567890abcdef12345678".to_string(),
        OTHER_ADDRESS.to_lowercase(),
    ];
    config
}

pub fn mock_tx(fill: char, secs: i64, value: Decimal) -> TransactionRecord {
    TransactionRecord {
        hash: format!("0x{}", fill.to_string().repeat(64)),
        timestamp: DateTime::from_timestamp(secs, 0).unwrap(),
        value_native: value,
    }
}

pub fn mock_ethereum_payload() -> CardPayload {
    CardPayload {
        balance: BalanceRecord {
            native_amount: Decimal::new(15, 1),
            usd_estimate: Some(Decimal::from(3000)),
        },
        transactions: vec![
            mock_tx('b', 1_714_608_000, Decimal::new(2, 1)),
            mock_tx('c', 1_714_694_400, Decimal::new(3, 1)),
            mock_tx('a', 1_714_521_600, Decimal::new(1, 1)),
        ],
    }
}

pub fn mock_agent_payload() -> CardPayload {
    CardPayload {
        balance: BalanceRecord {
            native_amount: Decimal::new(5, 1),
            usd_estimate: None,
        },
        transactions: vec![],
    }
}

/// An app whose cards have all been handed the default address
pub fn create_test_app() -> App {
    let mut app = App::new(mock_config());
    app.start();
    app
}

/// Deliver a result to a card as if its fetch task had finished
pub fn finish_card(app: &mut App, network: NetworkId, result: Result<CardPayload, FetchError>) {
    let generation = app.card(network).unwrap().generation();
    assert!(app.apply_card_outcome(CardOutcome {
        network,
        generation,
        result,
    }));
}

pub fn set_health(app: &mut App, core: HealthStatus, agent: HealthStatus) {
    let round = app.begin_health_check();
    assert!(app.apply_health(round, HealthReport { core, agent }));
}

// ==================== Helper Functions ====================

/// Render the app to a buffer and return it
pub fn render_to_buffer(app: &App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|frame| {
            draw(frame, app);
        })
        .unwrap();

    terminal.backend().buffer().clone()
}

/// Check if buffer contains a specific string anywhere
pub fn buffer_contains(buffer: &Buffer, needle: &str) -> bool {
    let content = buffer_to_string(buffer);
    content.contains(needle)
}

/// Convert buffer to a single string for searching
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut content = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            content.push(
                buffer
                    .cell((x, y))
                    .map(|c| c.symbol().chars().next().unwrap_or(' '))
                    .unwrap_or(' '),
            );
        }
        content.push('\n');
    }
    content
}

/// Get a specific line from the buffer
#[allow(dead_code)]
pub fn buffer_line(buffer: &Buffer, y: u16) -> String {
    let mut line = String::new();
    for x in 0..buffer.area.width {
        if let Some(cell) = buffer.cell((x, y)) {
            line.push_str(cell.symbol());
        }
    }
    line.trim_end().to_string()
}

/// Print buffer for debugging
#[allow(dead_code)]
pub fn print_buffer(buffer: &Buffer) {
    for y in 0..buffer.area.height {
        println!("{}", buffer_line(buffer, y));
    }
}
