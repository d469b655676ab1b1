//! SSH transport used to drive the device and fetch the backup artifact.

pub mod tokio_client;

pub use tokio_client::{AuthMethod, Client, CommandSession, Error};
