// Server administration endpoints
//
// The workbench server exposes its own `config.ini` for remote editing;
// the dashboard's settings page submits it through this form endpoint.

use tracing::debug;

use crate::client::WorkbenchClient;
use crate::error::Error;
use crate::models::{Ack, WorkbenchConfigForm};

impl WorkbenchClient {
    /// Update the server's workbench configuration. Only the fields set
    /// on `form` change; the server merges them over its current values.
    ///
    /// `POST /edit_config_form` with a form-encoded body. Returns the
    /// server's confirmation message, if any.
    pub async fn edit_config(&self, form: &WorkbenchConfigForm) -> Result<Option<String>, Error> {
        let url = self.endpoint_url("edit_config_form")?;
        debug!("editing server configuration");
        let ack: Ack = self.post_form(url, form, "/edit_config_form").await?;
        Ok(ack.msg)
    }
}
