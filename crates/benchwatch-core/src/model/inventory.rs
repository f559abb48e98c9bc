// ── Inventory types ──

use std::cmp::Reverse;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One inventory known to the server: either a scan still in progress or
/// a consolidated result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Server-assigned inventory identifier.
    pub id: String,

    /// Start time of an in-progress scan. Present only while the scan
    /// pipeline is still producing phases.
    pub created: Option<NaiveDateTime>,

    /// Consolidation time of a finished result.
    pub date: Option<NaiveDateTime>,

    /// The complete inventory document as served, timestamps included in
    /// their raw string form.
    pub document: serde_json::Map<String, serde_json::Value>,
}

impl Inventory {
    /// True while the scan pipeline is still working on this inventory.
    pub fn is_active(&self) -> bool {
        self.created.is_some()
    }

    /// The timestamp used for ordering: `created` when present, `date`
    /// otherwise. `None` when neither parsed.
    pub fn effective_timestamp(&self) -> Option<NaiveDateTime> {
        self.created.or(self.date)
    }
}

/// Sort inventories newest-first by effective timestamp.
///
/// The sort is stable: ties keep their fetch order, and records without a
/// parseable timestamp sink to the end.
pub fn sort_newest_first(inventories: &mut [Inventory]) {
    inventories.sort_by_key(|inv| Reverse(inv.effective_timestamp()));
}
