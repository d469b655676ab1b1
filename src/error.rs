// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Stage-level error types.
//!
//! Every stage of a backup run returns one of these. Nothing below the
//! binary's entry point terminates the process; `main` maps a
//! [`BackupError`] to its [`tag`](BackupError::tag) and exit code 1.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: input validation and output directory setup
//! - [`ssh::Error`](crate::ssh::Error): connection, authentication and remote commands
//! - [`TransferError`]: SFTP retrieval of the artifact

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::ssh;

/// Failure of the artifact retrieval stage.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to start SFTP session: {0}")]
    Sftp(#[source] ssh::Error),

    #[error("failed to open remote file {name}: {source}")]
    RemoteFile {
        name: String,
        #[source]
        source: russh_sftp::client::error::Error,
    },

    #[error("failed to create local file {}: {source}", path.display())]
    LocalFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Copy(#[source] io::Error),
}

/// Failure of any stage of a backup run.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Connect(ssh::Error),

    #[error(transparent)]
    SystemInfo(ssh::Error),

    #[error(transparent)]
    Backup(ssh::Error),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl BackupError {
    /// Short label naming the stage that failed, printed as `[!] <tag>: ...`.
    pub fn tag(&self) -> &'static str {
        match self {
            BackupError::Config(ConfigError::BadEncoding(_)) => "Password",
            BackupError::Config(ConfigError::DirCreateFailed { .. }) => "Mkdir",
            BackupError::Config(_) => "Config",
            BackupError::Connect(_) => "SSH",
            BackupError::SystemInfo(_) => "SysInfo",
            BackupError::Backup(_) => "Backup",
            BackupError::Transfer(TransferError::RemoteFile { .. }) => "Remote",
            BackupError::Transfer(TransferError::Copy(_)) => "Copy",
            BackupError::Transfer(_) => "Download",
        }
    }
}
