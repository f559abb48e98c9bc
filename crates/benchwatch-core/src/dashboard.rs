// ── Dashboard session ──
//
// Lifecycle management for one workbench dashboard. Owns the HTTP client
// and the SyncStore, funnels every mutation through named actions, and
// drives the recurring poll. Cheaply cloneable; construct one per server
// and hand clones to whoever needs state access.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use benchwatch_api::models::{TagComputerForm, WorkbenchConfigForm};
use benchwatch_api::{TransportConfig, WorkbenchClient};

use crate::config::DashboardConfig;
use crate::error::CoreError;
use crate::model::{Inventory, PluggedDevices, SimulatorSnapshot};
use crate::store::{ApplyOutcome, Endpoint, SyncStore};
use crate::stream::StateStream;

#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    store: Arc<SyncStore>,
    client: WorkbenchClient,
    /// Parent token; children derive from it so a session restart gets a
    /// fresh cancellation scope.
    cancel: CancellationToken,
    /// Token for the currently running poll, cancelled on shutdown.
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Dashboard {
    /// Build a dashboard for the configured server. No request is made
    /// until [`start`](Self::start) or an action runs.
    pub fn new(config: DashboardConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = WorkbenchClient::new(config.url.clone(), &transport)?;
        let store = Arc::new(SyncStore::new(
            config.replace,
            config.flash_ttl,
            config.simulator,
        ));
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Ok(Self {
            inner: Arc::new(DashboardInner {
                config,
                store,
                client,
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Direct access to the store, for consumers that want to feed or
    /// read it without going through the action layer.
    pub fn store(&self) -> &Arc<SyncStore> {
        &self.inner.store
    }

    // ── Session lifecycle ───────────────────────────────────────────

    /// Start the session: one immediate refresh of devices and
    /// inventories, a one-shot simulator fetch when enabled, then the
    /// recurring poll.
    ///
    /// A failed initial refresh is not fatal. The store keeps its
    /// current state and the poll retries at the next tick. A zero poll
    /// interval skips the recurring poll entirely; only the startup
    /// refresh runs.
    pub async fn start(&self) {
        // Restartable: wind down any previous poll first.
        self.shutdown().await;

        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        self.refresh_now().await;

        if self.inner.config.simulator {
            if let Err(e) = self.refresh_simulator().await {
                warn!(error = %e, "simulator fetch failed");
            }
        }

        let period = self.inner.config.poll_interval;
        if period.is_zero() {
            warn!("poll interval is zero, recurring poll disabled");
        } else {
            let mut handles = self.inner.task_handles.lock().await;
            handles.push(tokio::spawn(refresh_poll_task(self.clone(), period, child)));
        }

        info!(url = %self.inner.config.url, "dashboard session started");
    }

    /// Stop the recurring poll and wait for it to wind down. State and
    /// subscriptions stay usable afterwards.
    pub async fn shutdown(&self) {
        self.inner.cancel_child.lock().await.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
    }

    /// One poll cycle: plugged devices and inventories, concurrently.
    /// Failures are logged and the previous state stays up.
    pub async fn refresh_now(&self) {
        let (devices, inventories) = tokio::join!(
            self.refresh_plugged_devices(),
            self.refresh_inventories()
        );
        if let Err(e) = devices {
            warn!(error = %e, "plugged device refresh failed");
        }
        if let Err(e) = inventories {
            warn!(error = %e, "inventory refresh failed");
        }
    }

    // ── Fetch actions ───────────────────────────────────────────────

    /// Fetch the plugged device set and replace the stored one.
    pub async fn refresh_plugged_devices(&self) -> Result<(), CoreError> {
        let ticket = self.inner.store.issue(Endpoint::PluggedDevices);
        let wire = self.inner.client.plugged_devices().await?;
        let devices: PluggedDevices = wire
            .into_iter()
            .map(|(id, descriptor)| (id, descriptor.into()))
            .collect();
        self.commit(
            Endpoint::PluggedDevices,
            self.inner.store.apply_plugged_devices(ticket, devices),
        );
        Ok(())
    }

    /// Fetch the inventory list and store it newest-first.
    pub async fn refresh_inventories(&self) -> Result<(), CoreError> {
        let ticket = self.inner.store.issue(Endpoint::Inventories);
        let wire = self.inner.client.inventories().await?;
        let inventories: Vec<Inventory> = wire.into_iter().map(Into::into).collect();
        self.commit(
            Endpoint::Inventories,
            self.inner.store.apply_inventories(ticket, inventories),
        );
        Ok(())
    }

    /// Fetch the simulator catalog and store it verbatim.
    pub async fn refresh_simulator(&self) -> Result<(), CoreError> {
        let ticket = self.inner.store.issue(Endpoint::Simulator);
        let value = self.inner.client.simulator_snapshot().await?;
        self.commit(
            Endpoint::Simulator,
            self.inner
                .store
                .apply_simulator(ticket, SimulatorSnapshot(value)),
        );
        Ok(())
    }

    fn commit(&self, endpoint: Endpoint, outcome: ApplyOutcome) {
        match outcome {
            ApplyOutcome::Applied => {
                self.inner.store.mark_refreshed();
                debug!(endpoint = %endpoint, "state replaced");
            }
            ApplyOutcome::Unchanged => {
                self.inner.store.mark_refreshed();
                debug!(endpoint = %endpoint, "state unchanged");
            }
            ApplyOutcome::Stale => {
                debug!(endpoint = %endpoint, "stale response discarded");
            }
        }
    }

    // ── Server commands ─────────────────────────────────────────────

    /// Associate a plugged device with an inventory. No local mutation
    /// happens; the next poll cycle reflects the server's view.
    pub async fn plug_device(&self, serial: &str, inventory: &str) -> Result<(), CoreError> {
        self.inner.client.plug_device(serial, inventory).await?;
        debug!(serial, inventory, "device plugged");
        Ok(())
    }

    /// Drop the device association from an inventory.
    pub async fn unplug_device(&self, inventory: &str) -> Result<(), CoreError> {
        self.inner.client.unplug_device(inventory).await?;
        debug!(inventory, "device unplugged");
        Ok(())
    }

    /// Replay a simulated inventory scan, optionally with realistic
    /// phase timing.
    pub async fn launch_scan(&self, inventory: &str, timed: bool) -> Result<(), CoreError> {
        self.inner.client.simulate_inventory(inventory, timed).await?;
        info!(inventory, timed, "simulated scan launched");
        Ok(())
    }

    /// Submit identity and grading for a scanned computer. The server's
    /// confirmation message, when present, is flashed.
    pub async fn tag_computer(
        &self,
        inventory: &str,
        form: &TagComputerForm,
    ) -> Result<(), CoreError> {
        let message = self.inner.client.tag_computer(inventory, form).await?;
        info!(inventory, "computer tagged");
        if let Some(message) = message {
            self.show_flash(message).await;
        }
        Ok(())
    }

    /// Push a partial update of the server's workbench configuration.
    /// The server's confirmation message, when present, is flashed.
    pub async fn edit_server_config(&self, form: &WorkbenchConfigForm) -> Result<(), CoreError> {
        let message = self.inner.client.edit_config(form).await?;
        info!("server configuration edited");
        if let Some(message) = message {
            self.show_flash(message).await;
        }
        Ok(())
    }

    // ── Local actions ───────────────────────────────────────────────

    /// Show a flash message, restarting the expiry timer.
    pub async fn show_flash(&self, message: String) {
        self.inner.store.show_flash(message).await;
    }

    /// Dismiss the current flash immediately.
    pub async fn clear_flash(&self) {
        self.inner.store.clear_flash().await;
    }

    /// Flip the simulator panel flag, returning the new value. Client
    /// state only; the catalog is not refetched.
    pub fn toggle_simulator(&self) -> bool {
        self.inner.store.toggle_simulator()
    }

    pub fn set_simulator_enabled(&self, enabled: bool) {
        self.inner.store.set_simulator_enabled(enabled);
    }

    // ── Snapshot access ─────────────────────────────────────────────

    pub fn plugged_devices_snapshot(&self) -> Arc<PluggedDevices> {
        self.inner.store.plugged_devices_snapshot()
    }

    pub fn inventories_snapshot(&self) -> Arc<Vec<Inventory>> {
        self.inner.store.inventories_snapshot()
    }

    pub fn simulator_snapshot(&self) -> Arc<SimulatorSnapshot> {
        self.inner.store.simulator_snapshot()
    }

    pub fn flash(&self) -> Option<String> {
        self.inner.store.flash()
    }

    pub fn simulator_enabled(&self) -> bool {
        self.inner.store.simulator_enabled()
    }

    // ── Subscriptions ───────────────────────────────────────────────

    pub fn plugged_devices(&self) -> StateStream<PluggedDevices> {
        self.inner.store.subscribe_plugged_devices()
    }

    pub fn inventories(&self) -> StateStream<Vec<Inventory>> {
        self.inner.store.subscribe_inventories()
    }

    pub fn simulator(&self) -> StateStream<SimulatorSnapshot> {
        self.inner.store.subscribe_simulator()
    }

    pub fn flash_messages(&self) -> watch::Receiver<Option<String>> {
        self.inner.store.subscribe_flash()
    }
}

// ── Background tasks ────────────────────────────────────────────────

/// Recurring device and inventory poll at a fixed cadence.
///
/// No backoff, no pause: a failed cycle leaves the previous state up and
/// the next tick simply tries again.
async fn refresh_poll_task(dashboard: Dashboard, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("refresh_poll_task cancelled");
                break;
            }
            _ = interval.tick() => {
                debug!("refresh_poll_task tick");
                dashboard.refresh_now().await;
            }
        }
    }
}
