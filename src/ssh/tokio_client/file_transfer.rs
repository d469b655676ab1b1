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

//! SFTP channel setup over an authenticated connection.

use russh_sftp::client::SftpSession;

use super::connection::Client;

impl Client {
    /// Start an SFTP session on a new channel of this connection.
    ///
    /// No further authentication happens; the channel rides on the
    /// already authenticated transport. RouterOS serves SFTP whenever its
    /// SSH service is enabled.
    pub async fn sftp(&self) -> Result<SftpSession, super::Error> {
        let channel = self.connection_handle.channel_open_session().await?;
        channel.request_subsystem(true, "sftp").await?;
        let sftp = SftpSession::new(channel.into_stream()).await?;
        tracing::debug!(address = %self.address, "SFTP session started");
        Ok(sftp)
    }
}
