// USB device endpoints
//
// Plugged-device listing via /usbs, plus the add/del association commands
// the dashboard issues when an operator links a device to an inventory.

use std::collections::HashMap;

use tracing::debug;

use crate::client::WorkbenchClient;
use crate::error::Error;
use crate::models::{Ack, UsbDescriptor, UsbsPayload};

impl WorkbenchClient {
    /// List USB devices currently plugged into the workbench host, keyed
    /// by their backend identifier.
    ///
    /// `GET /usbs`
    pub async fn plugged_devices(&self) -> Result<HashMap<String, UsbDescriptor>, Error> {
        let url = self.endpoint_url("usbs")?;
        debug!("listing plugged devices");
        let payload: UsbsPayload = self.get(url, "/usbs").await?;
        Ok(payload.usbs)
    }

    /// Associate a plugged device with an inventory.
    ///
    /// `GET /add_usb?usb={serial}&inventory={inventory}`
    pub async fn plug_device(&self, serial: &str, inventory: &str) -> Result<(), Error> {
        let mut url = self.endpoint_url("add_usb")?;
        url.query_pairs_mut()
            .append_pair("usb", serial)
            .append_pair("inventory", inventory);
        debug!(serial, inventory, "plugging device");
        let _: Ack = self.get(url, "/add_usb").await?;
        Ok(())
    }

    /// Drop the device association from an inventory.
    ///
    /// `GET /del_usb?inventory={inventory}`
    pub async fn unplug_device(&self, inventory: &str) -> Result<(), Error> {
        let mut url = self.endpoint_url("del_usb")?;
        url.query_pairs_mut().append_pair("inventory", inventory);
        debug!(inventory, "unplugging device");
        let _: Ack = self.get(url, "/del_usb").await?;
        Ok(())
    }
}
