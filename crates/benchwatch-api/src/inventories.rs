// Inventory endpoints
//
// Inventory listing via /new_inventories, plus the tag form an operator
// submits to label a scanned computer.

use tracing::debug;

use crate::client::WorkbenchClient;
use crate::error::Error;
use crate::models::{Ack, InventoriesPayload, InventoryRecord, TagComputerForm};

impl WorkbenchClient {
    /// List inventories known to the server: active scans and consolidated
    /// results, in server order.
    ///
    /// `GET /new_inventories`
    pub async fn inventories(&self) -> Result<Vec<InventoryRecord>, Error> {
        let url = self.endpoint_url("new_inventories")?;
        debug!("listing inventories");
        let payload: InventoriesPayload = self.get(url, "/new_inventories").await?;
        Ok(payload.inventories)
    }

    /// Tag a scanned computer with operator-entered identifiers.
    ///
    /// `POST /tag_computer_form?inventory={inventory}` with a form-encoded
    /// body. Returns the server's confirmation message, if any.
    pub async fn tag_computer(
        &self,
        inventory: &str,
        form: &TagComputerForm,
    ) -> Result<Option<String>, Error> {
        let mut url = self.endpoint_url("tag_computer_form")?;
        url.query_pairs_mut().append_pair("inventory", inventory);
        debug!(inventory, "tagging computer");
        let ack: Ack = self.post_form(url, form, "/tag_computer_form").await?;
        Ok(ack.msg)
    }
}
