//! Dashboard frame tests: title, health, input and recent addresses

use super::*;
use chainboard::network::DEFAULT_ADDRESS;
use tui_input::Input;

#[test]
fn test_dashboard_shows_title() {
    let app = create_test_app();
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "chainboard"));
    assert!(buffer_contains(&buffer, "PoSELedger address dashboard"));
}

#[test]
fn test_input_prefilled_with_default_address() {
    let app = create_test_app();
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "Address"));
    assert!(buffer_contains(&buffer, DEFAULT_ADDRESS));
    assert!(buffer_contains(&buffer, "Viewing:"));
}

#[test]
fn test_default_address_cards_are_labelled() {
    let app = create_test_app();
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "PoSELedger (Ethereum)"));
    assert!(buffer_contains(&buffer, "PoSELedger (Polygon Amoy)"));
    assert!(buffer_contains(&buffer, "Emergent Agent"));
}

#[test]
fn test_other_address_cards_use_generic_titles() {
    let mut app = create_test_app();
    app.input = Input::new(OTHER_ADDRESS.to_string());
    assert_eq!(app.submit().unwrap().len(), 3);

    let buffer = render_to_buffer(&app, 150, 40);
    assert!(buffer_contains(&buffer, "Ethereum Address"));
    assert!(buffer_contains(&buffer, "Polygon Address"));
    assert!(!buffer_contains(&buffer, "PoSELedger (Ethereum)"));
}

#[test]
fn test_health_starts_checking() {
    let app = create_test_app();
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "Core API: ● checking"));
    assert!(buffer_contains(&buffer, "Agent: ● checking"));
}

#[test]
fn test_health_shows_each_signal() {
    let mut app = create_test_app();
    set_health(
        &mut app,
        HealthStatus::Healthy("Ethereum Dashboard API".to_string()),
        HealthStatus::Healthy("ok".to_string()),
    );
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "Core API: ● healthy"));
    assert!(buffer_contains(&buffer, "Agent: ● healthy (ok)"));
    assert!(buffer_contains(&buffer, "All systems operational"));
}

#[test]
fn test_rejection_notice_under_input() {
    let mut app = create_test_app();
    app.input = Input::new("0x123".to_string());
    assert!(app.submit().is_err());

    let buffer = render_to_buffer(&app, 150, 40);
    assert!(buffer_contains(&buffer, "Invalid address format: 0x123"));
    assert!(!buffer_contains(&buffer, "Viewing:"));
    // Cards keep showing the previous address
    assert!(buffer_contains(&buffer, "PoSELedger (Ethereum)"));
}

#[test]
fn test_shows_recent_addresses() {
    let app = create_test_app();
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "Recent Addresses"));
    assert!(buffer_contains(
        &buffer,
        "0x1234567890abcdef1234567890abcdef12345678"
    ));
}

#[test]
fn test_no_recent_list_without_history() {
    let mut app = App::new(Config::default());
    app.start();
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(!buffer_contains(&buffer, "Recent Addresses"));
}
