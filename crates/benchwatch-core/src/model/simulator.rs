// ── Simulator catalog ──

use serde::{Deserialize, Serialize};

/// The simulator catalog exactly as served.
///
/// The dashboard treats this as opaque; its shape belongs to the
/// simulator configuration on the server side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulatorSnapshot(pub serde_json::Value);

impl Default for SimulatorSnapshot {
    /// An empty object, matching the state before the first fetch.
    fn default() -> Self {
        Self(serde_json::Value::Object(serde_json::Map::new()))
    }
}
