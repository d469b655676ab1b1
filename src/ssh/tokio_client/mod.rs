//! High level asynchronous SSH client built on russh.
//!
//! The heart of this module is [`Client`]. Use it to connect and
//! authenticate, then open one [`CommandSession`] per remote command and
//! an SFTP session for file retrieval over the same connection.

pub mod authentication;
pub mod channel_manager;
pub mod connection;
pub mod error;
pub mod file_transfer;

pub use authentication::AuthMethod;
pub use channel_manager::CommandSession;
pub use connection::{Client, ClientHandler};
pub use error::Error;
