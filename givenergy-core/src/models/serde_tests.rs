//! Serde deserialization tests for API payloads and plugin input.
//!
//! The payloads mirror what the data-points endpoint actually returns,
//! including fields the models deliberately ignore.

use serde_json::json;

use crate::{PageResponse, PluginInput};

fn sample_reading() -> serde_json::Value {
    json!({
        "time": "2024-05-01T00:03:12Z",
        "status": "Normal",
        "power": {
            "solar": {
                "power": 0,
                "arrays": [{ "array": 1, "voltage": 0.0, "current": 0.0, "power": 0 }]
            },
            "grid": { "voltage": 241.2, "current": 1.4, "power": 312, "frequency": 50.01 },
            "battery": { "percent": 62, "power": -45, "temperature": 19 },
            "consumption": { "power": 267 },
            "inverter": { "temperature": 30.1, "power": 0 }
        }
    })
}

// ============================================================================
// PageResponse Serde Tests
// ============================================================================

#[test]
fn test_page_with_meta() {
    let body = json!({
        "data": [sample_reading()],
        "meta": {
            "current_page": 1,
            "last_page": 3,
            "path": "https://api.givenergy.cloud/v1/inverter/CE1/data-points/2024-05-01",
            "per_page": 15
        },
        "links": { "first": "...", "next": null }
    });

    let page: PageResponse = serde_json::from_value(body).unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.last_page(), Some(3));
    assert!(page.has_more_pages());
    assert_eq!(page.next_link(), None);

    let reading = &page.data[0];
    assert_eq!(reading.power.grid.power, 312.0);
    assert_eq!(reading.power.battery.power, -45.0);
    assert_eq!(reading.power.battery.percent, 62.0);
    assert_eq!(reading.power.consumption.power, 267.0);
}

#[test]
fn test_page_without_pagination() {
    let page: PageResponse = serde_json::from_value(json!({ "data": [] })).unwrap();
    assert!(page.meta.is_none());
    assert!(page.links.is_none());
    assert!(!page.has_more_pages());
    assert_eq!(page.next_link(), None);
}

#[test]
fn test_single_last_page_is_not_more() {
    let page: PageResponse =
        serde_json::from_value(json!({ "data": [], "meta": { "last_page": 1 } })).unwrap();
    assert!(!page.has_more_pages());
}

#[test]
fn test_empty_next_link_ends_cursor() {
    let page: PageResponse =
        serde_json::from_value(json!({ "data": [], "links": { "next": "" } })).unwrap();
    assert_eq!(page.next_link(), None);

    let page: PageResponse = serde_json::from_value(
        json!({ "data": [], "links": { "next": "https://example.test/p?page=2" } }),
    )
    .unwrap();
    assert_eq!(page.next_link(), Some("https://example.test/p?page=2"));
}

#[test]
fn test_missing_data_is_an_error() {
    let result: Result<PageResponse, _> = serde_json::from_value(json!({ "meta": {} }));
    assert!(result.is_err());
}

// ============================================================================
// PluginInput Serde Tests
// ============================================================================

#[test]
fn test_input_all_optional() {
    let input: PluginInput = serde_json::from_str("{}").unwrap();
    assert_eq!(input, PluginInput::default());
}

#[test]
fn test_input_zero_options_are_unset() {
    let input: PluginInput =
        serde_json::from_value(json!({ "hours_to_show": 0, "max_axis_power": 0 })).unwrap();
    assert_eq!(input.hours_window(), None);
    assert_eq!(input.power_limit(), None);

    let input: PluginInput =
        serde_json::from_value(json!({ "hours_to_show": 6, "max_axis_power": 500 })).unwrap();
    assert_eq!(input.hours_window(), Some(6.0));
    assert_eq!(input.power_limit(), Some(500.0));
}

#[test]
fn test_input_display_hides_token() {
    let input = PluginInput {
        api_token: Some("secret-token".to_string()),
        inverter_id: Some("CE1234".to_string()),
        ..Default::default()
    };
    let shown = input.to_string();
    assert!(shown.contains("CE1234"));
    assert!(!shown.contains("secret-token"));
}
