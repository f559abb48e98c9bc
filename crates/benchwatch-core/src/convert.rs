// ── Wire-to-domain conversion ──
//
// `benchwatch-api` models carry whatever the server sent; the impls here
// produce the canonical domain types, including the timestamp parsing
// that inventory ordering depends on.

use chrono::NaiveDateTime;

use benchwatch_api::models::{InventoryRecord, UsbDescriptor};

use crate::model::{Inventory, PluggedDevice};

/// Parse a workbench timestamp.
///
/// The scan pipeline writes naive ISO-8601 with optional fractional
/// seconds (`2017-04-25T17:55:27.398302`). RFC 3339 values with a zone
/// offset are accepted too and collapsed to their UTC wall time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc())
}

impl From<UsbDescriptor> for PluggedDevice {
    fn from(wire: UsbDescriptor) -> Self {
        Self {
            vendor: wire.vendor,
            product: wire.product,
            raw: wire.usb,
        }
    }
}

impl From<InventoryRecord> for Inventory {
    fn from(wire: InventoryRecord) -> Self {
        let created = wire.json.created.as_deref().and_then(parse_timestamp);
        let date = wire.json.date.as_deref().and_then(parse_timestamp);

        // Keep the document whole. The structural-equality gate compares
        // it verbatim, so even timestamps that failed to parse still
        // count towards change detection.
        let mut document = wire.json.extra;
        if let Some(raw) = wire.json.created {
            document.insert("created".to_owned(), serde_json::Value::String(raw));
        }
        if let Some(raw) = wire.json.date {
            document.insert("date".to_owned(), serde_json::Value::String(raw));
        }

        Self {
            id: wire.id,
            created,
            date,
            document,
        }
    }
}
