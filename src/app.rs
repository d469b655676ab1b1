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

//! One backup-and-download cycle.
//!
//! Stages run strictly in order: resolve credentials, connect, query
//! system information, create the backup, download it. The first failure
//! ends the run. The connection is closed whether the stages succeed or
//! not.

use chrono::NaiveDate;
use std::io::Write;

use crate::backup::{
    backup_command, download_artifact, BackupArtifact, BackupOrchestrator, TransferReport,
};
use crate::config::{ConnectionParams, CredentialSet};
use crate::error::BackupError;
use crate::ssh::{AuthMethod, Client};
use crate::utils::format_bytes;

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    /// Trimmed output of the system information query.
    pub system_info: String,
    /// The backup command sent to the device.
    pub backup_command: String,
    pub transfer: TransferReport,
}

/// Resolve `params` and run a backup against the device they name.
///
/// `date` names the artifact; pass the local calendar date at the start of
/// the run. Progress is written to `out` as each stage completes.
pub async fn execute<W: Write>(
    params: ConnectionParams,
    date: NaiveDate,
    out: &mut W,
) -> Result<BackupReport, BackupError> {
    let credentials = CredentialSet::resolve(params)?;
    run(&credentials, date, out).await
}

/// Run a backup with already resolved credentials.
pub async fn run<W: Write>(
    credentials: &CredentialSet,
    date: NaiveDate,
    out: &mut W,
) -> Result<BackupReport, BackupError> {
    let artifact = BackupArtifact::for_date(credentials.prefix(), date);

    tracing::info!(
        host = %credentials.host(),
        port = credentials.port(),
        user = %credentials.username(),
        "Connecting to device"
    );
    let client = Client::connect_with_timeout(
        (credentials.host(), credentials.port()),
        credentials.username(),
        AuthMethod::with_password(credentials.password()),
        credentials.connect_timeout(),
    )
    .await
    .map_err(BackupError::Connect)?;

    let result = run_stages(&client, credentials, &artifact, out).await;

    if let Err(e) = client.disconnect().await {
        tracing::debug!(error = %e, "Disconnect failed");
    }

    result
}

async fn run_stages<W: Write>(
    client: &Client,
    credentials: &CredentialSet,
    artifact: &BackupArtifact,
    out: &mut W,
) -> Result<BackupReport, BackupError> {
    let orchestrator = BackupOrchestrator::new(client);

    let system_info = orchestrator.system_info().await?;
    report(out, format_args!("==> System Information:"));
    report(out, format_args!("{system_info}"));

    let command = backup_command(artifact);
    report(out, format_args!("==> Backup:"));
    report(out, format_args!(" - Run: {command}"));
    orchestrator.create_backup(artifact).await?;

    let transfer = download_artifact(client, artifact, credentials.output_dir()).await?;
    report(
        out,
        format_args!(
            " - Saved: {} , {} bytes ({})",
            transfer.path.display(),
            transfer.bytes,
            format_bytes(transfer.bytes)
        ),
    );

    Ok(BackupReport {
        system_info,
        backup_command: command,
        transfer,
    })
}

// A closed or broken stdout must not abort a backup that is already under way.
fn report<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{line}") {
        tracing::debug!(error = %e, "Failed to write progress output");
    }
}
