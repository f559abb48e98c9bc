// ── Central synchronization store ──
//
// The dashboard-side copy of workbench state. Every mutation funnels
// through the ticketed write path (`issue` + `apply_*`); consumers read
// cheap `Arc` snapshots or subscribe to change notifications. The write
// path is transport-agnostic: the bundled poll driver feeds it today, but
// anything that can produce a fetched value can do the same.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;

use crate::config::ReplacePolicies;
use crate::model::{Inventory, PluggedDevices, SimulatorSnapshot, sort_newest_first};
use crate::store::cell::{ApplyOutcome, EntityCell};
use crate::store::flash::FlashCell;
use crate::stream::StateStream;

/// The synchronized endpoints, as they appear in logs and gate dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    PluggedDevices,
    Inventories,
    Simulator,
}

pub struct SyncStore {
    plugged_devices: EntityCell<PluggedDevices>,
    inventories: EntityCell<Vec<Inventory>>,
    simulator: EntityCell<SimulatorSnapshot>,
    flash: FlashCell,
    simulator_enabled: watch::Sender<bool>,
    last_refresh: watch::Sender<Option<Instant>>,
    policies: ReplacePolicies,
}

impl SyncStore {
    pub fn new(policies: ReplacePolicies, flash_ttl: Duration, simulator_enabled: bool) -> Self {
        let (simulator_enabled, _) = watch::channel(simulator_enabled);
        let (last_refresh, _) = watch::channel(None);
        Self {
            plugged_devices: EntityCell::new(PluggedDevices::new()),
            inventories: EntityCell::new(Vec::new()),
            simulator: EntityCell::new(SimulatorSnapshot::default()),
            flash: FlashCell::new(flash_ttl),
            simulator_enabled,
            last_refresh,
            policies,
        }
    }

    // ── Write path ──────────────────────────────────────────────────

    /// Draw a write ticket for `endpoint`. One ticket per request; the
    /// matching `apply_*` call commits under it.
    pub fn issue(&self, endpoint: Endpoint) -> u64 {
        match endpoint {
            Endpoint::PluggedDevices => self.plugged_devices.issue(),
            Endpoint::Inventories => self.inventories.issue(),
            Endpoint::Simulator => self.simulator.issue(),
        }
    }

    /// Replace the plugged set wholesale. Devices absent from `devices`
    /// disappear.
    pub fn apply_plugged_devices(&self, ticket: u64, devices: PluggedDevices) -> ApplyOutcome {
        self.plugged_devices
            .apply(ticket, devices, self.policies.plugged_devices)
    }

    /// Store a fetched inventory list, sorted newest-first. Under the
    /// default policy a list with the same logical content as the current
    /// one is skipped, whatever order it arrived in.
    pub fn apply_inventories(&self, ticket: u64, mut inventories: Vec<Inventory>) -> ApplyOutcome {
        sort_newest_first(&mut inventories);
        self.inventories
            .apply(ticket, inventories, self.policies.inventories)
    }

    /// Store a fetched simulator catalog.
    pub fn apply_simulator(&self, ticket: u64, snapshot: SimulatorSnapshot) -> ApplyOutcome {
        self.simulator
            .apply(ticket, snapshot, self.policies.simulator)
    }

    /// Record that a fresh fetch landed. Callers skip this for stale
    /// discards, so `last_refresh` only ever moves forward on results
    /// that proved the server reachable.
    pub(crate) fn mark_refreshed(&self) {
        self.last_refresh.send_modify(|t| *t = Some(Instant::now()));
    }

    // ── Flash notifications ─────────────────────────────────────────

    pub(crate) async fn show_flash(&self, message: String) {
        self.flash.show(message).await;
    }

    pub(crate) async fn clear_flash(&self) {
        self.flash.clear().await;
    }

    // ── Local flags ─────────────────────────────────────────────────

    pub(crate) fn set_simulator_enabled(&self, enabled: bool) {
        self.simulator_enabled.send_modify(|v| *v = enabled);
    }

    /// Flip the simulator panel flag, returning the new value.
    pub(crate) fn toggle_simulator(&self) -> bool {
        let mut enabled = false;
        self.simulator_enabled.send_modify(|v| {
            *v = !*v;
            enabled = *v;
        });
        enabled
    }

    // ── Snapshot access ─────────────────────────────────────────────

    pub fn plugged_devices_snapshot(&self) -> Arc<PluggedDevices> {
        self.plugged_devices.snapshot()
    }

    pub fn inventories_snapshot(&self) -> Arc<Vec<Inventory>> {
        self.inventories.snapshot()
    }

    pub fn simulator_snapshot(&self) -> Arc<SimulatorSnapshot> {
        self.simulator.snapshot()
    }

    pub fn flash(&self) -> Option<String> {
        self.flash.snapshot()
    }

    pub fn simulator_enabled(&self) -> bool {
        *self.simulator_enabled.borrow()
    }

    /// When the last successful fetch landed, if any.
    pub fn last_refresh(&self) -> Option<Instant> {
        *self.last_refresh.borrow()
    }

    /// Age of the synchronized state. `None` before the first fetch.
    pub fn data_age(&self) -> Option<Duration> {
        self.last_refresh().map(|t| t.elapsed())
    }

    // ── Subscriptions ───────────────────────────────────────────────

    pub fn subscribe_plugged_devices(&self) -> StateStream<PluggedDevices> {
        StateStream::new(self.plugged_devices.subscribe())
    }

    pub fn subscribe_inventories(&self) -> StateStream<Vec<Inventory>> {
        StateStream::new(self.inventories.subscribe())
    }

    pub fn subscribe_simulator(&self) -> StateStream<SimulatorSnapshot> {
        StateStream::new(self.simulator.subscribe())
    }

    pub fn subscribe_flash(&self) -> watch::Receiver<Option<String>> {
        self.flash.subscribe()
    }

    pub fn subscribe_simulator_enabled(&self) -> watch::Receiver<bool> {
        self.simulator_enabled.subscribe()
    }
}

impl Default for SyncStore {
    fn default() -> Self {
        Self::new(ReplacePolicies::default(), Duration::from_secs(10), true)
    }
}
