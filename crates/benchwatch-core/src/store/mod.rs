// ── Reactive store ──
//
// Gated state cells, the flash notification, and the SyncStore facade.

mod cell;
mod flash;
mod sync_store;

pub use cell::ApplyOutcome;
pub use sync_store::{Endpoint, SyncStore};
