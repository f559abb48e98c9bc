// Workbench API response types
//
// Models for the workbench server's JSON API. Every response carries an
// `acknowledge` flag alongside the payload fields. Wire fields use
// `#[serde(default)]` liberally because inventory documents differ between
// active scans and consolidated results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ── Response envelope ────────────────────────────────────────────────

/// Standard workbench response envelope.
///
/// Every endpoint answers with its payload fields flattened next to the
/// flag:
/// ```json
/// { "acknowledge": true, "usbs": { ... } }
/// ```
/// A missing flag counts as unacknowledged.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub acknowledge: bool,
    #[serde(flatten)]
    pub payload: T,
}

/// Payload for endpoints where only the flag matters, plus the optional
/// human-readable message some form endpoints return.
#[derive(Debug, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub msg: Option<String>,
}

// ── USB devices ──────────────────────────────────────────────────────

/// One plugged USB device from `/usbs`.
///
/// The backend stores whatever the host agent reported plus the query
/// arguments of the originating plug request. We model the fields the
/// dashboard renders; everything else lands in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsbDescriptor {
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    /// Raw platform identifier of the device node.
    #[serde(default)]
    pub usb: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Payload of `GET /usbs`: devices keyed by their backend identifier.
#[derive(Debug, Deserialize)]
pub struct UsbsPayload {
    #[serde(default)]
    pub usbs: HashMap<String, UsbDescriptor>,
}

// ── Inventories ──────────────────────────────────────────────────────

/// One inventory entry from `/new_inventories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: String,
    pub json: InventoryDocument,
}

/// The inventory document body.
///
/// Active scans carry `created`; consolidated results carry `date` only.
/// Both stay raw strings on the wire; `benchwatch-core` parses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryDocument {
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// Catch-all for the rest of the document.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Payload of `GET /new_inventories`.
#[derive(Debug, Deserialize)]
pub struct InventoriesPayload {
    #[serde(default)]
    pub inventories: Vec<InventoryRecord>,
}

// ── Simulator ────────────────────────────────────────────────────────

/// Payload of `GET /simulated_inventories`: the simulator catalog. The
/// shape is owned by the server, so it is carried verbatim.
#[derive(Debug, Deserialize)]
pub struct SnapshotPayload {
    #[serde(default)]
    pub data: serde_json::Value,
}

// ── Tag form ─────────────────────────────────────────────────────────

/// Form fields for `POST /tag_computer_form`.
///
/// All fields are optional; the server builds its confirmation message
/// from whichever identifiers are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagComputerForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    #[serde(rename = "id_", skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
    #[serde(rename = "gid", skip_serializing_if = "Option::is_none")]
    pub giver_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functional_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

// ── Workbench config form ────────────────────────────────────────────

/// Form fields for `POST /edit_config_form`, mirroring the server's
/// `config.ini` sections.
///
/// All fields are optional; the server merges the submitted fields over
/// its current configuration, so a partial form updates just those keys.
/// Wire names are the uppercase `config.ini` keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkbenchConfigForm {
    /// Device type to assume, or `ask`/`no`.
    #[serde(rename = "EQUIP", skip_serializing_if = "Option::is_none")]
    pub equip: Option<String>,
    #[serde(rename = "PID", skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    #[serde(rename = "ID_", skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
    #[serde(rename = "LABEL", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "COMMENT", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "VISUAL_GRADE", skip_serializing_if = "Option::is_none")]
    pub visual_grade: Option<String>,
    #[serde(rename = "FUNCTIONAL_GRADE", skip_serializing_if = "Option::is_none")]
    pub functional_grade: Option<String>,
    #[serde(rename = "COPY_TO_USB", skip_serializing_if = "Option::is_none")]
    pub copy_to_usb: Option<bool>,
    #[serde(rename = "SENDTOSERVER", skip_serializing_if = "Option::is_none")]
    pub send_to_server: Option<bool>,
    /// SMART test to run: `none`, `short` or `long`.
    #[serde(rename = "SMART", skip_serializing_if = "Option::is_none")]
    pub smart: Option<String>,
    /// Stress test duration, in minutes. Zero disables it.
    #[serde(rename = "STRESS", skip_serializing_if = "Option::is_none")]
    pub stress: Option<u32>,
    /// URL inventories are posted to after a scan.
    #[serde(rename = "SERVER", skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(rename = "BROKER", skip_serializing_if = "Option::is_none")]
    pub broker: Option<String>,
    #[serde(rename = "QUEUE", skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    #[serde(rename = "ERASE", skip_serializing_if = "Option::is_none")]
    pub erase: Option<String>,
    /// `true` selects sector-level erase, `false` the basic one.
    #[serde(rename = "MODE", skip_serializing_if = "Option::is_none")]
    pub secure_erase: Option<bool>,
    #[serde(rename = "STEPS", skip_serializing_if = "Option::is_none")]
    pub erase_steps: Option<u32>,
    #[serde(rename = "ZEROS", skip_serializing_if = "Option::is_none")]
    pub overwrite_with_zeros: Option<bool>,
    #[serde(rename = "DEBUG", skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(rename = "SIGN_OUTPUT", skip_serializing_if = "Option::is_none")]
    pub sign_output: Option<bool>,
    #[serde(rename = "INSTALL", skip_serializing_if = "Option::is_none")]
    pub install: Option<String>,
    #[serde(rename = "IMAGE_NAME", skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(rename = "IMAGE_DIR", skip_serializing_if = "Option::is_none")]
    pub image_dir: Option<String>,
    #[serde(rename = "KEYBOARD_LAYOUT", skip_serializing_if = "Option::is_none")]
    pub keyboard_layout: Option<String>,
}
