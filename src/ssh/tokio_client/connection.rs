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

//! SSH connection management and establishment.
//!
//! This module handles the low-level SSH connection establishment,
//! including address resolution, connection attempts, and initial handshake.

use russh::client::{Config, Handle, Handler};
use std::fmt::Debug;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use super::authentication::AuthMethod;

/// A ssh connection to a remote device.
///
/// After creating a `Client` by [`connect`]ing to a remote host,
/// use [`open_session`] to get a single-use command session and
/// [`sftp`] to open a file-transfer channel over the same connection.
///
/// [`connect`]: Client::connect
/// [`open_session`]: Client::open_session
/// [`sftp`]: Client::sftp
///
/// # Examples
///
/// ```no_run
/// use mikbak::ssh::{AuthMethod, Client};
/// #[tokio::main]
/// async fn main() -> Result<(), mikbak::ssh::Error> {
///     let client = Client::connect(
///         ("192.168.88.1", 22),
///         "admin",
///         AuthMethod::with_password("secret"),
///     ).await?;
///
///     let output = client.open_session().await?.run("/system identity print").await?;
///     println!("{}", String::from_utf8_lossy(&output));
///     client.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct Client {
    pub(super) connection_handle: Handle<ClientHandler>,
    pub(super) username: String,
    pub(super) address: SocketAddr,
}

impl Client {
    /// Open a ssh connection to a remote host.
    ///
    /// `addr` is a `(host, port)` pair. The host is resolved and each
    /// resolved address is tried in turn until a TCP connection and SSH
    /// handshake succeed. Authentication is tried on the first successful
    /// connection and the whole process aborted if this fails.
    ///
    /// The server's host key is accepted without verification.
    pub async fn connect(
        addr: (&str, u16),
        username: &str,
        auth: AuthMethod,
    ) -> Result<Self, super::Error> {
        Self::connect_with_config(addr, username, auth, Config::default()).await
    }

    /// Same as [`connect`](Client::connect), but the whole dial, handshake
    /// and authentication sequence must finish within `timeout`.
    pub async fn connect_with_timeout(
        addr: (&str, u16),
        username: &str,
        auth: AuthMethod,
        timeout: Duration,
    ) -> Result<Self, super::Error> {
        match tokio::time::timeout(timeout, Self::connect(addr, username, auth)).await {
            Ok(result) => result,
            Err(_) => Err(super::Error::ConnectTimeout(timeout)),
        }
    }

    /// Same as `connect`, but with the option to specify a non default
    /// [`russh::client::Config`].
    pub async fn connect_with_config(
        addr: (&str, u16),
        username: &str,
        auth: AuthMethod,
        config: Config,
    ) -> Result<Self, super::Error> {
        let config = Arc::new(config);
        let (host, port) = addr;
        let host = host.trim_start_matches('[').trim_end_matches(']');

        let socket_addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, port))
            .await
            .map_err(super::Error::AddressInvalid)?
            .collect();

        let mut connect_res = Err(super::Error::AddressInvalid(io::Error::new(
            io::ErrorKind::InvalidInput,
            "could not resolve to any addresses",
        )));
        for socket_addr in socket_addrs {
            tracing::debug!(address = %socket_addr, "Dialing SSH server");
            let handler = ClientHandler::new(host.to_string(), socket_addr);
            match russh::client::connect(config.clone(), socket_addr, handler).await {
                Ok(h) => {
                    connect_res = Ok((socket_addr, h));
                    break;
                }
                Err(e) => {
                    tracing::debug!(address = %socket_addr, error = %e, "Connection attempt failed");
                    connect_res = Err(e);
                }
            }
        }
        let (address, mut handle) = connect_res?;

        super::authentication::authenticate(&mut handle, username, auth).await?;
        tracing::info!(user = %username, address = %address, "SSH session authenticated");

        Ok(Self {
            connection_handle: handle,
            username: username.to_string(),
            address,
        })
    }

    /// Disconnect from the remote host.
    pub async fn disconnect(&self) -> Result<(), super::Error> {
        self.connection_handle
            .disconnect(russh::Disconnect::ByApplication, "", "")
            .await
            .map_err(super::Error::SshError)
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("username", &self.username)
            .field("address", &self.address)
            .field("connection_handle", &"Handle<ClientHandler>")
            .finish()
    }
}

/// SSH client handler.
///
/// Host key verification is disabled: every server key is accepted and its
/// fingerprint is logged so an operator can audit it afterwards. Do not rely
/// on this client for host authenticity on hostile networks.
#[derive(Debug, Clone)]
pub struct ClientHandler {
    hostname: String,
    host: SocketAddr,
}

impl ClientHandler {
    /// Create a new client handler.
    pub fn new(hostname: String, host: SocketAddr) -> Self {
        Self { hostname, host }
    }
}

impl Handler for ClientHandler {
    type Error = super::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &russh::keys::PublicKey,
    ) -> Result<bool, Self::Error> {
        tracing::warn!(
            host = %self.hostname,
            address = %self.host,
            fingerprint = %server_public_key.fingerprint(russh::keys::HashAlg::Sha256),
            "Accepting server host key without verification"
        );
        Ok(true)
    }
}
