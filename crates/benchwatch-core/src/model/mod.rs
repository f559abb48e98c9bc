// ── Domain model ──
//
// Dashboard-side representations of workbench entities. Wire models from
// `benchwatch-api` convert into these (see `crate::convert`); consumers
// only ever see the domain types.

mod device;
mod inventory;
mod simulator;

pub use device::{PluggedDevice, PluggedDevices};
pub use inventory::{Inventory, sort_newest_first};
pub use simulator::SimulatorSnapshot;
