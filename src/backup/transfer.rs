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

//! Retrieval of the backup artifact over SFTP.

use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use super::artifact::BackupArtifact;
use crate::error::TransferError;
use crate::ssh::Client;

/// Where the artifact landed and how large it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReport {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Download `artifact` from the device's file store into `output_dir`.
///
/// The remote file is opened before the local one is created, so a
/// missing artifact leaves nothing behind locally. A copy that fails
/// midway removes the truncated local file. Syncing to disk afterwards is
/// best effort: a failed `fsync` is logged and the transfer still counts.
pub async fn download_artifact(
    client: &Client,
    artifact: &BackupArtifact,
    output_dir: &Path,
) -> Result<TransferReport, TransferError> {
    let sftp = client.sftp().await.map_err(TransferError::Sftp)?;

    let name = artifact.file_name();
    let mut remote = sftp
        .open(name.as_str())
        .await
        .map_err(|source| TransferError::RemoteFile {
            name: name.clone(),
            source,
        })?;

    let path = output_dir.join(&name);
    let mut local = File::create(&path)
        .await
        .map_err(|source| TransferError::LocalFile {
            path: path.clone(),
            source,
        })?;

    tracing::debug!(remote = %name, local = %path.display(), "Copying artifact");
    let copied = match tokio::io::copy(&mut remote, &mut local).await {
        Ok(n) => local.flush().await.map(|_| n),
        Err(e) => Err(e),
    };
    let bytes = match copied {
        Ok(n) => n,
        Err(e) => {
            drop(local);
            if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                tracing::debug!(path = %path.display(), error = %remove_err, "Failed to remove partial file");
            }
            return Err(TransferError::Copy(e));
        }
    };

    if let Err(e) = local.sync_all().await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to sync backup file to disk");
    }

    drop(remote);
    if let Err(e) = sftp.close().await {
        tracing::debug!(error = %e, "SFTP session close failed");
    }

    tracing::info!(path = %path.display(), bytes, "Artifact saved");
    Ok(TransferReport { path, bytes })
}
