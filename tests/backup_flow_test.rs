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

//! End-to-end backup runs against an in-process device.

mod common;

use std::time::Duration;

use base64::Engine;
use chrono::NaiveDate;
use mikbak::{execute, ConnectionParams};
use tempfile::TempDir;

use common::{DeviceBehavior, MockDevice, DEVICE_PASSWORD, DEVICE_USER};

fn backup_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

fn params_for(device: &MockDevice, output: &std::path::Path) -> ConnectionParams {
    ConnectionParams {
        host: "127.0.0.1".to_string(),
        port: device.port(),
        username: DEVICE_USER.to_string(),
        password: DEVICE_PASSWORD.to_string(),
        output_dir: output.to_path_buf(),
        connect_timeout: Duration::from_secs(5),
        ..ConnectionParams::default()
    }
}

fn artifact_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[tokio::test]
async fn test_backup_downloads_artifact_byte_for_byte() {
    let payload = artifact_bytes(200_000);
    let device = MockDevice::start(DeviceBehavior::with_artifact(payload.clone()))
        .await
        .unwrap();
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("nested").join("backups");
    let mut out = Vec::new();

    let report = execute(params_for(&device, &output), backup_date(), &mut out)
        .await
        .unwrap();

    let saved = output.join("ros-20240305.backup");
    assert_eq!(report.transfer.path, saved);
    assert_eq!(report.transfer.bytes, payload.len() as u64);
    assert_eq!(std::fs::read(&saved).unwrap(), payload);

    assert_eq!(
        device.commands(),
        vec![
            "/system resource print".to_string(),
            "/system backup save dont-encrypt=yes name=ros-20240305".to_string(),
        ]
    );

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.starts_with("==> System Information:\n"));
    assert!(printed.contains("version: 7.14.2 (stable)"));
    assert!(printed.contains("==> Backup:\n"));
    assert!(printed.contains(" - Run: /system backup save dont-encrypt=yes name=ros-20240305\n"));
    assert!(printed.contains(&format!(" , {} bytes", payload.len())));
}

#[tokio::test]
async fn test_backup_uses_prefix_and_encoded_password() {
    let device = MockDevice::start(DeviceBehavior::with_artifact(b"cfg".to_vec()))
        .await
        .unwrap();
    let tmp = TempDir::new().unwrap();
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{DEVICE_PASSWORD}\n"));
    let params = ConnectionParams {
        password: format!("B:{encoded}"),
        prefix: "core-rtr".to_string(),
        ..params_for(&device, tmp.path())
    };
    let mut out = Vec::new();

    let report = execute(params, backup_date(), &mut out).await.unwrap();

    assert_eq!(report.transfer.bytes, 3);
    assert!(tmp.path().join("core-rtr-20240305.backup").exists());
}

#[tokio::test]
async fn test_empty_artifact_downloads_as_empty_file() {
    let device = MockDevice::start(DeviceBehavior::with_artifact(Vec::new()))
        .await
        .unwrap();
    let tmp = TempDir::new().unwrap();
    let mut out = Vec::new();

    let report = execute(params_for(&device, tmp.path()), backup_date(), &mut out)
        .await
        .unwrap();

    assert_eq!(report.transfer.bytes, 0);
    let saved = tmp.path().join("ros-20240305.backup");
    assert_eq!(std::fs::metadata(saved).unwrap().len(), 0);
}

#[tokio::test]
async fn test_missing_remote_file_leaves_no_local_file() {
    let device = MockDevice::start(DeviceBehavior {
        skip_artifact: true,
        ..DeviceBehavior::with_artifact(b"unused".to_vec())
    })
    .await
    .unwrap();
    let tmp = TempDir::new().unwrap();
    let mut out = Vec::new();

    let err = execute(params_for(&device, tmp.path()), backup_date(), &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.tag(), "Remote");
    assert!(device.sftp_requested());
    assert!(!tmp.path().join("ros-20240305.backup").exists());
}

#[tokio::test]
async fn test_interrupted_download_removes_partial_file() {
    let device = MockDevice::start(DeviceBehavior {
        fail_read_after: Some(65_536),
        ..DeviceBehavior::with_artifact(artifact_bytes(300_000))
    })
    .await
    .unwrap();
    let tmp = TempDir::new().unwrap();
    let mut out = Vec::new();

    let err = execute(params_for(&device, tmp.path()), backup_date(), &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.tag(), "Copy");
    assert!(!tmp.path().join("ros-20240305.backup").exists());
    assert!(!String::from_utf8(out).unwrap().contains(" - Saved: "));
}

#[tokio::test]
async fn test_failed_backup_command_skips_transfer() {
    let device = MockDevice::start(DeviceBehavior {
        fail_backup: true,
        ..DeviceBehavior::with_artifact(b"unused".to_vec())
    })
    .await
    .unwrap();
    let tmp = TempDir::new().unwrap();
    let mut out = Vec::new();

    let err = execute(params_for(&device, tmp.path()), backup_date(), &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.tag(), "Backup");
    assert!(!device.sftp_requested());
    assert!(!tmp.path().join("ros-20240305.backup").exists());

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains(" - Run: "));
    assert!(!printed.contains(" - Saved: "));
}

#[tokio::test]
async fn test_wrong_password_fails_at_ssh_stage() {
    let device = MockDevice::start(DeviceBehavior::with_artifact(b"cfg".to_vec()))
        .await
        .unwrap();
    let tmp = TempDir::new().unwrap();
    let params = ConnectionParams {
        password: "not-the-password".to_string(),
        ..params_for(&device, tmp.path())
    };
    let mut out = Vec::new();

    let err = execute(params, backup_date(), &mut out).await.unwrap_err();

    assert_eq!(err.tag(), "SSH");
    assert!(device.commands().is_empty());
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_unsafe_prefix_is_rejected_before_connecting() {
    let device = MockDevice::start(DeviceBehavior::with_artifact(b"cfg".to_vec()))
        .await
        .unwrap();
    let tmp = TempDir::new().unwrap();
    let params = ConnectionParams {
        prefix: "ros;/system reboot".to_string(),
        ..params_for(&device, tmp.path())
    };
    let mut out = Vec::new();

    let err = execute(params, backup_date(), &mut out).await.unwrap_err();

    assert_eq!(err.tag(), "Config");
    assert!(device.commands().is_empty());
    assert!(!device.sftp_requested());
}
