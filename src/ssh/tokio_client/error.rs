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

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Errors raised by the SSH transport, command sessions and SFTP channel.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid address: {0}")]
    AddressInvalid(#[source] io::Error),

    #[error("connection timed out after {} seconds", .0.as_secs())]
    ConnectTimeout(Duration),

    #[error("password authentication failed")]
    PasswordWrong,

    #[error("ssh: {0}")]
    SshError(#[from] russh::Error),

    #[error("sftp: {0}")]
    SftpError(#[from] russh_sftp::client::error::Error),

    #[error("command rejected: {0}")]
    CommandValidationFailed(String),

    #[error("command exited without reporting an exit status")]
    CommandDidntExit,

    #[error("command exited with status {exit_status}")]
    CommandFailed {
        exit_status: u32,
        /// Combined stdout/stderr captured before the failure.
        output: Vec<u8>,
    },
}
