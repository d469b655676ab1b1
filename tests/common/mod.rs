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

//! In-process stand-in for a RouterOS device.
//!
//! Speaks just enough SSH to answer `/system resource print`, create a
//! backup file in an in-memory file system on `/system backup save`, and
//! serve that file over SFTP.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use russh::keys::{Algorithm, PrivateKey};
use russh::server::{Auth, Msg, Server as _, Session};
use russh::{Channel, ChannelId, CryptoVec};
use russh_sftp::protocol::{Data, FileAttributes, Handle, OpenFlags, Status, StatusCode, Version};
use tokio::net::TcpListener;

pub const DEVICE_USER: &str = "admin";
pub const DEVICE_PASSWORD: &str = "s3cret";
pub const SYSTEM_INFO: &str =
    "                   uptime: 3d4h12m\n                  version: 7.14.2 (stable)\n           board-name: hEX\n";

/// How the device behaves.
#[derive(Debug, Clone)]
pub struct DeviceBehavior {
    /// Bytes written to `<name>.backup` by the backup command.
    pub artifact: Vec<u8>,
    /// Backup command exits non-zero without writing anything.
    pub fail_backup: bool,
    /// Backup command succeeds but writes no file.
    pub skip_artifact: bool,
    /// SFTP reads fail once they reach this offset.
    pub fail_read_after: Option<u64>,
}

impl DeviceBehavior {
    pub fn with_artifact(artifact: Vec<u8>) -> Self {
        Self {
            artifact,
            fail_backup: false,
            skip_artifact: false,
            fail_read_after: None,
        }
    }
}

/// What the device observed.
#[derive(Debug, Default)]
pub struct DeviceLog {
    pub commands: Vec<String>,
    pub sftp_requested: bool,
    pub files: HashMap<String, Vec<u8>>,
}

pub struct MockDevice {
    pub addr: SocketAddr,
    pub log: Arc<Mutex<DeviceLog>>,
    task: tokio::task::JoinHandle<()>,
}

impl MockDevice {
    pub async fn start(behavior: DeviceBehavior) -> anyhow::Result<Self> {
        let key = PrivateKey::random(&mut rand::rngs::OsRng, Algorithm::Ed25519)?;
        let config = Arc::new(russh::server::Config {
            keys: vec![key],
            auth_rejection_time: Duration::from_millis(10),
            auth_rejection_time_initial: Some(Duration::ZERO),
            ..Default::default()
        });

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let log = Arc::new(Mutex::new(DeviceLog::default()));

        let mut runner = DeviceRunner {
            behavior: Arc::new(behavior),
            log: Arc::clone(&log),
        };
        let task = tokio::spawn(async move {
            let _ = runner.run_on_socket(config, &listener).await;
        });

        Ok(Self { addr, log, task })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn commands(&self) -> Vec<String> {
        self.log.lock().unwrap().commands.clone()
    }

    pub fn sftp_requested(&self) -> bool {
        self.log.lock().unwrap().sftp_requested
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Clone)]
struct DeviceRunner {
    behavior: Arc<DeviceBehavior>,
    log: Arc<Mutex<DeviceLog>>,
}

impl russh::server::Server for DeviceRunner {
    type Handler = DeviceHandler;

    fn new_client(&mut self, _peer_addr: Option<SocketAddr>) -> Self::Handler {
        DeviceHandler {
            behavior: Arc::clone(&self.behavior),
            log: Arc::clone(&self.log),
            channels: HashMap::new(),
        }
    }
}

struct DeviceHandler {
    behavior: Arc<DeviceBehavior>,
    log: Arc<Mutex<DeviceLog>>,
    channels: HashMap<ChannelId, Channel<Msg>>,
}

impl DeviceHandler {
    /// Run one CLI command, returning its output and exit status.
    fn execute(&self, command: &str) -> (Vec<u8>, u32) {
        let mut log = self.log.lock().unwrap();
        log.commands.push(command.to_string());

        if command == "/system resource print" {
            return (SYSTEM_INFO.as_bytes().to_vec(), 0);
        }

        if let Some(args) = command.strip_prefix("/system backup save ") {
            if self.behavior.fail_backup {
                return (b"failure: not enough disk space\n".to_vec(), 1);
            }
            let name = args
                .split_whitespace()
                .find_map(|arg| arg.strip_prefix("name="))
                .unwrap_or("backup");
            if !self.behavior.skip_artifact {
                log.files
                    .insert(format!("{name}.backup"), self.behavior.artifact.clone());
            }
            return (b"Configuration backup saved\n".to_vec(), 0);
        }

        (b"bad command name\n".to_vec(), 1)
    }
}

impl russh::server::Handler for DeviceHandler {
    type Error = anyhow::Error;

    async fn auth_password(&mut self, user: &str, password: &str) -> Result<Auth, Self::Error> {
        if user == DEVICE_USER && password == DEVICE_PASSWORD {
            Ok(Auth::Accept)
        } else {
            Ok(Auth::Reject {
                proceed_with_methods: None,
                partial_success: false,
            })
        }
    }

    async fn channel_open_session(
        &mut self,
        channel: Channel<Msg>,
        _session: &mut Session,
    ) -> Result<bool, Self::Error> {
        self.channels.insert(channel.id(), channel);
        Ok(true)
    }

    async fn exec_request(
        &mut self,
        channel_id: ChannelId,
        data: &[u8],
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        let command = String::from_utf8_lossy(data).to_string();
        let (output, exit_status) = self.execute(&command);

        let _ = session.channel_success(channel_id);
        if exit_status == 0 {
            let _ = session.data(channel_id, CryptoVec::from_slice(&output));
        } else {
            let _ = session.extended_data(channel_id, 1, CryptoVec::from_slice(&output));
        }
        let _ = session.exit_status_request(channel_id, exit_status);
        let _ = session.eof(channel_id);
        let _ = session.close(channel_id);
        Ok(())
    }

    async fn subsystem_request(
        &mut self,
        channel_id: ChannelId,
        name: &str,
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        let channel = match self.channels.remove(&channel_id) {
            Some(channel) if name == "sftp" => channel,
            _ => {
                let _ = session.channel_failure(channel_id);
                return Ok(());
            }
        };

        let files = {
            let mut log = self.log.lock().unwrap();
            log.sftp_requested = true;
            log.files.clone()
        };

        let _ = session.channel_success(channel_id);
        russh_sftp::server::run(
            channel.into_stream(),
            DeviceSftp {
                files,
                fail_read_after: self.behavior.fail_read_after,
                handles: HashMap::new(),
                next_handle: 0,
            },
        )
        .await;
        Ok(())
    }
}

/// Read-only SFTP view of the device's files.
struct DeviceSftp {
    files: HashMap<String, Vec<u8>>,
    fail_read_after: Option<u64>,
    handles: HashMap<String, String>,
    next_handle: u32,
}

impl russh_sftp::server::Handler for DeviceSftp {
    type Error = StatusCode;

    fn unimplemented(&self) -> Self::Error {
        StatusCode::OpUnsupported
    }

    async fn init(
        &mut self,
        _version: u32,
        _extensions: HashMap<String, String>,
    ) -> Result<Version, Self::Error> {
        Ok(Version::new())
    }

    async fn open(
        &mut self,
        id: u32,
        filename: String,
        _pflags: OpenFlags,
        _attrs: FileAttributes,
    ) -> Result<Handle, Self::Error> {
        let name = filename.trim_start_matches('/').to_string();
        if !self.files.contains_key(&name) {
            return Err(StatusCode::NoSuchFile);
        }
        self.next_handle += 1;
        let handle = format!("h{}", self.next_handle);
        self.handles.insert(handle.clone(), name);
        Ok(Handle { id, handle })
    }

    async fn read(
        &mut self,
        id: u32,
        handle: String,
        offset: u64,
        len: u32,
    ) -> Result<Data, Self::Error> {
        let name = self.handles.get(&handle).ok_or(StatusCode::Failure)?;
        let content = self.files.get(name).ok_or(StatusCode::NoSuchFile)?;

        let start = usize::try_from(offset).map_err(|_| StatusCode::Failure)?;
        if start >= content.len() {
            return Err(StatusCode::Eof);
        }
        let mut end = content.len().min(start + len as usize);
        if let Some(limit) = self.fail_read_after {
            let limit = usize::try_from(limit).map_err(|_| StatusCode::Failure)?;
            if start >= limit {
                return Err(StatusCode::Failure);
            }
            end = end.min(limit);
        }
        Ok(Data {
            id,
            data: content[start..end].to_vec(),
        })
    }

    async fn close(&mut self, id: u32, handle: String) -> Result<Status, Self::Error> {
        self.handles.remove(&handle);
        Ok(Status {
            id,
            status_code: StatusCode::Ok,
            error_message: "Ok".to_string(),
            language_tag: "en-US".to_string(),
        })
    }
}
