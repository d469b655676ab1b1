pub mod app;
pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod ssh;
pub mod utils;

pub use app::{execute, BackupReport};
pub use cli::Cli;
pub use config::{Config, ConnectionParams, CredentialSet};
pub use error::{BackupError, TransferError};
