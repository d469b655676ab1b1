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

//! Remote side of a backup: device information and backup creation.

use super::artifact::BackupArtifact;
use crate::error::BackupError;
use crate::ssh::{self, Client};

/// RouterOS command printing CPU, memory, uptime and version.
pub const SYSTEM_INFO_COMMAND: &str = "/system resource print";

/// RouterOS command that writes `<name>.backup` to the device's file store.
pub fn backup_command(artifact: &BackupArtifact) -> String {
    format!(
        "/system backup save dont-encrypt=yes name={}",
        artifact.base_name()
    )
}

/// Drives the backup-creating commands over one authenticated connection.
///
/// Each command runs on a fresh session that is closed before the next
/// one is opened.
pub struct BackupOrchestrator<'a> {
    client: &'a Client,
}

impl<'a> BackupOrchestrator<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run [`SYSTEM_INFO_COMMAND`] and return its output with trailing
    /// whitespace removed.
    pub async fn system_info(&self) -> Result<String, BackupError> {
        let output = self
            .run(SYSTEM_INFO_COMMAND)
            .await
            .map_err(BackupError::SystemInfo)?;
        Ok(String::from_utf8_lossy(&output).trim_end().to_string())
    }

    /// Ask the device to save a backup named after `artifact`.
    ///
    /// The command output is not parsed; a zero exit status is the only
    /// success signal.
    pub async fn create_backup(&self, artifact: &BackupArtifact) -> Result<(), BackupError> {
        let command = backup_command(artifact);
        self.run(&command).await.map_err(BackupError::Backup)?;
        tracing::info!(artifact = %artifact, "Device reported backup saved");
        Ok(())
    }

    async fn run(&self, command: &str) -> Result<Vec<u8>, ssh::Error> {
        let session = self.client.open_session().await?;
        session.run(command).await.inspect_err(|e| {
            if let ssh::Error::CommandFailed { exit_status, output } = e {
                tracing::warn!(
                    command = %command,
                    exit_status = *exit_status,
                    output = %String::from_utf8_lossy(output).trim_end(),
                    "Remote command failed"
                );
            }
        })
    }
}
