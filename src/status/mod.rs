//! Remote device status service.

mod client;
mod types;

pub use client::DeviceStatusClient;
pub use types::DeviceStatus;
