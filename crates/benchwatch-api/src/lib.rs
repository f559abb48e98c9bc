// benchwatch-api: Async Rust client for the workbench server's JSON API

pub mod admin;
pub mod client;
pub mod devices;
pub mod error;
pub mod inventories;
pub mod models;
pub mod simulator;
pub mod transport;

pub use client::WorkbenchClient;
pub use error::Error;
pub use transport::TransportConfig;
