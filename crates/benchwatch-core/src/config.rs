// ── Runtime dashboard configuration ──
//
// Everything a [`Dashboard`](crate::Dashboard) session needs to run.
// This struct never touches disk; `benchwatch-config` assembles one from
// file and environment sources.

use std::time::Duration;

use url::Url;

/// How a fetched value replaces the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacePolicy {
    /// Store every fetch result and notify subscribers each time.
    Always,
    /// Store only when the result differs structurally from the current
    /// value. Skipped fetches leave the stored allocation untouched, so
    /// snapshot identity is stable across no-op polls.
    OnChange,
}

/// Replace policy per synchronized entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacePolicies {
    pub plugged_devices: ReplacePolicy,
    pub inventories: ReplacePolicy,
    pub simulator: ReplacePolicy,
}

impl Default for ReplacePolicies {
    fn default() -> Self {
        Self {
            plugged_devices: ReplacePolicy::Always,
            inventories: ReplacePolicy::OnChange,
            simulator: ReplacePolicy::Always,
        }
    }
}

/// Configuration for one dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Workbench server base URL.
    pub url: Url,

    /// HTTP request timeout.
    pub timeout: Duration,

    /// Cadence of the recurring device and inventory poll.
    pub poll_interval: Duration,

    /// How long a flash notification stays visible.
    pub flash_ttl: Duration,

    /// Fetch the simulator catalog at startup and show the panel.
    pub simulator: bool,

    /// Per-entity replace policies.
    pub replace: ReplacePolicies,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            url: "http://192.168.2.2:8090"
                .parse()
                .expect("default URL is valid"),
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(5),
            flash_ttl: Duration::from_secs(10),
            simulator: true,
            replace: ReplacePolicies::default(),
        }
    }
}
