//! Client-side synchronization layer for workbench dashboards.
//!
//! The workbench server exposes a small JSON API over the state of its
//! connected machines: scans in progress, consolidated inventories,
//! plugged USB devices, and an optional scan simulator. This crate keeps
//! a local, reactive copy of that state in sync.
//!
//! - [`Dashboard`] owns one session against one server: an immediate
//!   refresh at startup, then a fixed-cadence background poll.
//! - [`SyncStore`] holds the synchronized state behind cheap `Arc`
//!   snapshots and watch-based subscriptions.
//! - Fetch results replace state wholesale; a per-entity
//!   [`ReplacePolicy`] decides whether structurally equal results
//!   re-notify subscribers.
//! - Failures never tear state down: the previous snapshot stays up and
//!   the next poll tick retries.
//!
//! ```no_run
//! use benchwatch_core::{Dashboard, DashboardConfig};
//!
//! # async fn run() -> Result<(), benchwatch_core::CoreError> {
//! let dashboard = Dashboard::new(DashboardConfig::default())?;
//! dashboard.start().await;
//!
//! let inventories = dashboard.inventories_snapshot();
//! println!("{} inventories known", inventories.len());
//!
//! dashboard.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod store;
pub mod stream;

pub use benchwatch_api::models::{TagComputerForm, WorkbenchConfigForm};
pub use config::{DashboardConfig, ReplacePolicies, ReplacePolicy};
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use model::{Inventory, PluggedDevice, PluggedDevices, SimulatorSnapshot};
pub use store::{ApplyOutcome, Endpoint, SyncStore};
pub use stream::StateStream;
