//! Stock event model and table rendering.

use comfy_table::{Table, presets::UTF8_FULL};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// One stock-moving event extracted by the research agent.
///
/// Deserialization is tolerant of the shapes the model actually produces:
/// prices may arrive as numbers or as strings like `"123.45"` or `"$123.45"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEvent {
    pub date: String,
    pub event: String,
    #[serde(default, deserialize_with = "flexible_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, deserialize_with = "flexible_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    #[serde(default, alias = "change", deserialize_with = "flexible_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
}

impl StockEvent {
    /// Percentage change, preferring the model-reported value and falling
    /// back to computing it from open and close.
    pub fn change(&self) -> Option<f64> {
        self.change_pct.or_else(|| match (self.open, self.close) {
            (Some(open), Some(close)) if open != 0.0 => Some((close - open) / open * 100.0),
            _ => None,
        })
    }
}

fn flexible_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim()
            .trim_start_matches('$')
            .trim_end_matches('%')
            .trim()
            .parse()
            .ok(),
        _ => None,
    }))
}

/// Decode an event list from the JSON the agent stored.
///
/// Accepts either a bare array or an object with an `"events"` array.
/// Elements that do not look like events are skipped with a warning.
pub fn decode_events(value: &Value) -> Vec<StockEvent> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("events").and_then(Value::as_array) {
            Some(items) => items.as_slice(),
            None => {
                warn!("stored events object has no \"events\" array");
                return Vec::new();
            }
        },
        _ => {
            warn!("stored events are neither an array nor an object");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(event) => Some(event),
            Err(err) => {
                warn!(error = %err, "skipping malformed event entry");
                None
            }
        })
        .collect()
}

/// Decode an event list from its serialized form (the cache stores strings).
pub fn decode_events_str(text: &str) -> Vec<StockEvent> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => decode_events(&value),
        Err(err) => {
            warn!(error = %err, "cached events are not valid JSON");
            Vec::new()
        }
    }
}

/// Render events as a table: Date | Event | Open | Close | Change.
pub fn render_events_table(events: &[StockEvent]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(["Date", "Event", "Open", "Close", "Change"]);

    for event in events {
        table.add_row([
            event.date.clone(),
            event.event.clone(),
            format_price(event.open),
            format_price(event.close),
            format_change(event.change()),
        ]);
    }

    table.to_string()
}

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) => format!("{price:.2}"),
        None => "-".to_string(),
    }
}

fn format_change(change: Option<f64>) -> String {
    match change {
        Some(change) => format!("{change:+.2}%"),
        None => "-".to_string(),
    }
}
