//! Common UI tests - health summary, help line and layout

use super::*;
use ratatui::style::Color;

// ==================== Health Summary Tests ====================

#[test]
fn test_partial_degradation_is_visible() {
    let mut app = create_test_app();
    set_health(
        &mut app,
        HealthStatus::Unhealthy("HTTP 500: boom".to_string()),
        HealthStatus::Healthy("ok".to_string()),
    );
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "Core API: ● unhealthy (HTTP 500: boom)"));
    assert!(buffer_contains(&buffer, "Agent: ● healthy"));
    assert!(buffer_contains(&buffer, "Partial degradation"));
}

#[test]
fn test_outage_is_visible() {
    let mut app = create_test_app();
    set_health(
        &mut app,
        HealthStatus::Unhealthy("Connection failed".to_string()),
        HealthStatus::Unhealthy("Request timed out".to_string()),
    );
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "Backend unavailable"));
}

// ==================== Navigation Help Tests ====================

#[test]
fn test_dashboard_shows_navigation_help() {
    let app = create_test_app();
    let buffer = render_to_buffer(&app, 150, 40);

    assert!(buffer_contains(&buffer, "Enter load"));
    assert!(buffer_contains(&buffer, "Esc quit"));
}

// ==================== Layout Tests ====================

#[test]
fn test_small_terminal_does_not_panic() {
    let mut app = create_test_app();
    finish_card(&mut app, NetworkId::Ethereum, Ok(mock_ethereum_payload()));
    let sizes = [(40, 12), (80, 24), (100, 30)];

    for (w, h) in sizes {
        let _ = render_to_buffer(&app, w, h);
    }
}

/// Background colour of the first cell of `needle`, wherever it is rendered
fn background_at(buffer: &Buffer, needle: &str) -> Option<Color> {
    (0..buffer.area.height).find_map(|y| {
        let line = buffer_line(buffer, y);
        let byte = line.find(needle)?;
        let x = line[..byte].chars().count() as u16;
        buffer.cell((x, y)).map(|cell| cell.bg)
    })
}

#[test]
fn test_history_selection_highlights_entry() {
    let first = "0x1234567890abcdef1234567890abcdef12345678";
    let second = OTHER_ADDRESS.to_lowercase();
    let mut app = create_test_app();

    let unselected = render_to_buffer(&app, 150, 40);
    assert_ne!(background_at(&unselected, first), Some(Color::Cyan));

    app.select_history_next();
    let buffer = render_to_buffer(&app, 150, 40);
    assert_eq!(background_at(&buffer, first), Some(Color::Cyan));
    assert_ne!(background_at(&buffer, &second), Some(Color::Cyan));

    app.select_history_next();
    let buffer = render_to_buffer(&app, 150, 40);
    assert_ne!(background_at(&buffer, first), Some(Color::Cyan));
    assert_eq!(background_at(&buffer, &second), Some(Color::Cyan));
}
