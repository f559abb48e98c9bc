// Simulator endpoints
//
// The server bundles a device simulator for exercising the pipeline
// without hardware. The dashboard shows its catalog and can replay one of
// its inventory scans.

use tracing::debug;

use crate::client::WorkbenchClient;
use crate::error::Error;
use crate::models::SnapshotPayload;

impl WorkbenchClient {
    /// Fetch the simulator catalog verbatim.
    ///
    /// `GET /simulated_inventories`
    pub async fn simulator_snapshot(&self) -> Result<serde_json::Value, Error> {
        let url = self.endpoint_url("simulated_inventories")?;
        debug!("fetching simulator snapshot");
        let payload: SnapshotPayload = self.get(url, "/simulated_inventories").await?;
        Ok(payload.data)
    }

    /// Replay a simulated inventory scan.
    ///
    /// `POST /simulate_inventory` with form-encoded `inventory` and
    /// `timed`. Success is judged by HTTP status alone; the body is
    /// ignored.
    pub async fn simulate_inventory(&self, inventory: &str, timed: bool) -> Result<(), Error> {
        let url = self.endpoint_url("simulate_inventory")?;
        debug!(inventory, timed, "replaying simulated inventory");
        self.post_form_status(
            url,
            &[
                ("inventory", inventory),
                ("timed", if timed { "true" } else { "false" }),
            ],
            "/simulate_inventory",
        )
        .await
    }
}
