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

//! Command sessions over an established connection.
//!
//! Every remote command gets its own session channel. A [`CommandSession`]
//! is consumed by [`CommandSession::run`], so a session can never carry a
//! second command.

use russh::client::Msg;
use russh::{Channel, ChannelMsg};

use super::connection::Client;

/// Initial capacity for captured command output.
/// RouterOS print commands produce a few hundred bytes; 8KB avoids regrowth
/// for anything short of a full config export.
const SSH_CMD_BUFFER_SIZE: usize = 8192;

/// A single-use exec session bound to one [`Client`] connection.
pub struct CommandSession {
    channel: Channel<Msg>,
}

impl Client {
    /// Open a new session channel for one command execution.
    pub async fn open_session(&self) -> Result<CommandSession, super::Error> {
        let channel = self
            .connection_handle
            .channel_open_session()
            .await
            .map_err(super::Error::SshError)?;
        tracing::debug!(channel = ?channel.id(), "Opened session channel");
        Ok(CommandSession { channel })
    }
}

impl CommandSession {
    /// Execute `command` and return its combined stdout and stderr.
    ///
    /// Output from both streams is collected into one buffer in the order
    /// the server sent it. The call blocks until the server closes the
    /// channel. A command that ends without an exit status, or with a
    /// non-zero one, is reported as an error.
    pub async fn run(mut self, command: &str) -> Result<Vec<u8>, super::Error> {
        crate::utils::sanitize_command(command)
            .map_err(|e| super::Error::CommandValidationFailed(e.to_string()))?;

        tracing::debug!(channel = ?self.channel.id(), command = %command, "Executing remote command");
        self.channel.exec(true, command).await?;

        let mut output = Vec::with_capacity(SSH_CMD_BUFFER_SIZE);
        let mut exit_status: Option<u32> = None;

        while let Some(msg) = self.channel.wait().await {
            match msg {
                ChannelMsg::Data { ref data } => output.extend_from_slice(data),
                // Extended data type 1 is stderr
                ChannelMsg::ExtendedData { ref data, ext: 1 } => output.extend_from_slice(data),
                // The exit status can arrive before the last data packet,
                // so keep reading until the channel closes.
                ChannelMsg::ExitStatus { exit_status: status } => exit_status = Some(status),
                _ => {}
            }
        }

        tracing::debug!(
            command = %command,
            exit_status = ?exit_status,
            bytes = output.len(),
            "Remote command finished"
        );

        match exit_status {
            Some(0) => Ok(output),
            Some(status) => Err(super::Error::CommandFailed {
                exit_status: status,
                output,
            }),
            None => Err(super::Error::CommandDidntExit),
        }
    }
}
