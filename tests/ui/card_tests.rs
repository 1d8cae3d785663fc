//! Per-network card rendering tests

use super::*;

#[test]
fn test_cards_show_loading() {
    let app = create_test_app();
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "Loading..."));
}

#[test]
fn test_loaded_ethereum_card() {
    let mut app = create_test_app();
    finish_card(&mut app, NetworkId::Ethereum, Ok(mock_ethereum_payload()));
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "Balance: 1.500000 ETH"));
    assert!(buffer_contains(&buffer, "USD: $3000.00"));
    assert!(buffer_contains(&buffer, "Recent Transactions"));
    assert!(buffer_contains(&buffer, "0xcccc...cccc 0.300000 ETH"));
    assert!(buffer_contains(&buffer, "2024-05-03 00:00 UTC"));
    assert!(buffer_contains(&buffer, "Updated"));
}

#[test]
fn test_transactions_most_recent_first() {
    let mut app = create_test_app();
    finish_card(&mut app, NetworkId::Ethereum, Ok(mock_ethereum_payload()));
    let content = buffer_to_string(&render_to_buffer(&app, 150, 40));

    let newest = content.find("0xcccc").unwrap();
    let middle = content.find("0xbbbb").unwrap();
    let oldest = content.find("0xaaaa").unwrap();
    assert!(newest < middle);
    assert!(middle < oldest);
}

#[test]
fn test_missing_usd_is_a_dash() {
    let mut app = create_test_app();
    finish_card(&mut app, NetworkId::EmergentAgent, Ok(mock_agent_payload()));
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "Balance: 0.500000 ETH"));
    assert!(buffer_contains(&buffer, "USD: —"));
    assert!(!buffer_contains(&buffer, "$0.00"));
}

#[test]
fn test_balance_only_card_has_no_transaction_section() {
    let mut app = create_test_app();
    finish_card(&mut app, NetworkId::EmergentAgent, Ok(mock_agent_payload()));
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(!buffer_contains(&buffer, "Recent Transactions"));
}

#[test]
fn test_empty_transactions() {
    let mut app = create_test_app();
    let payload = CardPayload {
        transactions: vec![],
        ..mock_ethereum_payload()
    };
    finish_card(&mut app, NetworkId::Polygon, Ok(payload));
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "No transactions found"));
    assert!(buffer_contains(&buffer, "1.500000 MATIC"));
}

#[test]
fn test_failed_card_shows_reason_and_hint() {
    let mut app = create_test_app();
    finish_card(
        &mut app,
        NetworkId::Ethereum,
        Err(FetchError::http(503, "Etherscan API unavailable")),
    );
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "Failed to load"));
    assert!(buffer_contains(&buffer, "HTTP 503: Etherscan API unavailable"));
    assert!(buffer_contains(&buffer, "Ctrl-R retry"));
    // The other cards are unaffected
    assert!(buffer_contains(&buffer, "Loading..."));
}

#[test]
fn test_address_truncated_per_network() {
    let mut app = create_test_app();
    finish_card(&mut app, NetworkId::Ethereum, Ok(mock_ethereum_payload()));
    let buffer = render_to_buffer(&app, 150, 40);

    // 6/4 for explorers, 8/6 for the agent
    assert!(buffer_contains(&buffer, "Address: 0xc5c3...a028"));
    assert!(buffer_contains(&buffer, "Address: 0xc5c39d...4ea028"));
}

#[test]
fn test_focused_card_shows_transaction_links() {
    let mut app = create_test_app();
    finish_card(&mut app, NetworkId::Ethereum, Ok(mock_ethereum_payload()));

    let unfocused = render_to_buffer(&app, 150, 40);
    assert!(!buffer_contains(&unfocused, "etherscan.io/tx/"));

    app.focus_next();
    assert_eq!(app.cards()[app.focused_card].network(), NetworkId::Ethereum);
    let focused = render_to_buffer(&app, 150, 40);
    assert!(buffer_contains(&focused, "etherscan.io/tx/"));
}

#[test]
fn test_retry_returns_card_to_loading() {
    let mut app = create_test_app();
    finish_card(
        &mut app,
        NetworkId::Polygon,
        Err(FetchError::transport("Request timed out")),
    );
    assert_eq!(app.retry_failed().len(), 1);

    let buffer = render_to_buffer(&app, 150, 40);
    assert!(!buffer_contains(&buffer, "Request timed out"));
    assert!(!buffer_contains(&buffer, "Failed to load"));
}
