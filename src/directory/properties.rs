//! Defaulting accessors over the directory's nested property structure
//!
//! Every accessor tolerates a missing property, a missing nested value and an
//! empty list, and falls back to a named default instead of failing. Guests
//! with half-filled records still get a welcome page.

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

/// Default for text, number and date fields
const NOT_AVAILABLE: &str = "N/A";

/// Default for the guest name
const DEFAULT_NAME: &str = "Guest";

/// Default for select fields
const UNKNOWN: &str = "Unknown";

/// The property map of a single guest record
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Properties(Map<String, Value>);

impl Properties {
    /// Plain text of a rich text property, `"N/A"` when absent
    pub fn text(&self, field: &str) -> String {
        self.plain_text(field, "rich_text", NOT_AVAILABLE)
    }

    /// Plain text of a title property, `"Guest"` when absent
    pub fn title(&self, field: &str) -> String {
        self.plain_text(field, "title", DEFAULT_NAME)
    }

    /// Name of a select property, `"Unknown"` when absent
    pub fn select(&self, field: &str) -> String {
        self.0
            .get(field)
            .and_then(|property| property.get("select"))
            .and_then(|select| select.get("name"))
            .and_then(Value::as_str)
            .map_or_else(|| UNKNOWN.to_string(), ToString::to_string)
    }

    /// A number property rendered as text, `"N/A"` when absent
    pub fn number(&self, field: &str) -> String {
        self.0
            .get(field)
            .and_then(|property| property.get("number"))
            .and_then(Value::as_number)
            .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
    }

    /// Start of a date property, `"N/A"` when absent
    pub fn date(&self, field: &str) -> String {
        self.0
            .get(field)
            .and_then(|property| property.get("date"))
            .and_then(|date| date.get("start"))
            .and_then(Value::as_str)
            .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
    }

    /// First `plain_text` entry of a list-valued property
    fn plain_text(&self, field: &str, kind: &str, default: &str) -> String {
        self.0
            .get(field)
            .and_then(|property| property.get(kind))
            .and_then(|list| list.get(0))
            .and_then(|entry| entry.get("plain_text"))
            .and_then(Value::as_str)
            .map_or_else(|| default.to_string(), ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn properties(value: Value) -> Properties {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text() {
        let present = properties(json!({
            "Phone": { "rich_text": [ { "plain_text": "+31 6 1234 5678" } ] },
        }));
        assert_eq!("+31 6 1234 5678", present.text("Phone"));

        let empty_list = properties(json!({ "Phone": { "rich_text": [] } }));
        assert_eq!("N/A", empty_list.text("Phone"));

        let missing_nested = properties(json!({ "Phone": { "rich_text": [ {} ] } }));
        assert_eq!("N/A", missing_nested.text("Phone"));

        let missing_key = properties(json!({}));
        assert_eq!("N/A", missing_key.text("Phone"));
    }

    #[test]
    fn test_title() {
        let present = properties(json!({
            "Guest Name": { "title": [ { "plain_text": "Jane Doe" } ] },
        }));
        assert_eq!("Jane Doe", present.title("Guest Name"));

        let empty_list = properties(json!({ "Guest Name": { "title": [] } }));
        assert_eq!("Guest", empty_list.title("Guest Name"));

        let missing_nested = properties(json!({ "Guest Name": { "title": [ {} ] } }));
        assert_eq!("Guest", missing_nested.title("Guest Name"));

        let missing_key = properties(json!({}));
        assert_eq!("Guest", missing_key.title("Guest Name"));
    }

    #[test]
    fn test_select() {
        let present = properties(json!({
            "Room Type": { "select": { "name": "Deluxe" } },
        }));
        assert_eq!("Deluxe", present.select("Room Type"));

        let missing_nested = properties(json!({ "Room Type": { "select": {} } }));
        assert_eq!("Unknown", missing_nested.select("Room Type"));

        let null_value = properties(json!({ "Room Type": { "select": null } }));
        assert_eq!("Unknown", null_value.select("Room Type"));

        let missing_key = properties(json!({}));
        assert_eq!("Unknown", missing_key.select("Room Type"));
    }

    #[test]
    fn test_number() {
        let whole = properties(json!({ "Room Number": { "number": 101 } }));
        assert_eq!("101", whole.number("Room Number"));

        let fractional = properties(json!({ "Room Number": { "number": 12.5 } }));
        assert_eq!("12.5", fractional.number("Room Number"));

        let null_value = properties(json!({ "Room Number": { "number": null } }));
        assert_eq!("N/A", null_value.number("Room Number"));

        let missing_key = properties(json!({}));
        assert_eq!("N/A", missing_key.number("Room Number"));
    }

    #[test]
    fn test_date() {
        let present = properties(json!({
            "Check-in Date": { "date": { "start": "2024-01-01" } },
        }));
        assert_eq!("2024-01-01", present.date("Check-in Date"));

        let missing_nested = properties(json!({ "Check-in Date": { "date": {} } }));
        assert_eq!("N/A", missing_nested.date("Check-in Date"));

        let missing_key = properties(json!({}));
        assert_eq!("N/A", missing_key.date("Check-in Date"));
    }
}
