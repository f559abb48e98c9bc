// ── Plugged device types ──

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A USB storage device currently plugged into a workbench machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluggedDevice {
    /// Vendor name as reported by the host agent.
    pub vendor: Option<String>,
    /// Product name as reported by the host agent.
    pub product: Option<String>,
    /// Raw platform identifier string, when the agent provides one.
    pub raw: Option<String>,
}

/// The full plugged set, keyed by the server's device identifier.
///
/// Each fetch replaces the whole map, so devices absent from a fetch
/// disappear from the dashboard.
pub type PluggedDevices = HashMap<String, PluggedDevice>;
