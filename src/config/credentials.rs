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

//! Resolution of user-supplied parameters into ready-to-use credentials.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use std::time::Duration;
use zeroize::Zeroizing;

use super::error::ConfigError;
use super::types::ConnectionParams;
use super::utils::expand_tilde;
use crate::utils::{sanitize_file_name, sanitize_hostname};

/// Marker that flags a base64-encoded password.
pub const ENCODED_PASSWORD_PREFIX: &str = "B:";

/// Fully resolved connection settings for one backup run.
///
/// Built once by [`CredentialSet::resolve`] and never modified afterwards.
/// The password is decoded and held in memory that is wiped on drop, and
/// the output directory is known to exist.
#[derive(Clone)]
pub struct CredentialSet {
    host: String,
    port: u16,
    username: String,
    password: Zeroizing<String>,
    output_dir: PathBuf,
    prefix: String,
    connect_timeout: Duration,
}

impl CredentialSet {
    /// Validate and normalize `params`.
    ///
    /// Checks happen before any side effect, so a run with a missing
    /// host, user or password touches neither the filesystem nor the
    /// network. The output directory (and its parents) is created last.
    pub fn resolve(params: ConnectionParams) -> Result<Self, ConfigError> {
        let host = params.host.trim();
        if host.is_empty() {
            return Err(ConfigError::MissingField("server"));
        }
        let username = params.username.trim();
        if username.is_empty() {
            return Err(ConfigError::MissingField("user"));
        }
        if params.password.is_empty() {
            return Err(ConfigError::MissingField("password"));
        }

        sanitize_hostname(host).map_err(|e| ConfigError::InvalidHost(e.to_string()))?;
        sanitize_file_name(&params.prefix)
            .map_err(|e| ConfigError::InvalidPrefix(e.to_string()))?;

        let password = decode_password(&params.password)?;
        if password.is_empty() {
            return Err(ConfigError::MissingField("password"));
        }

        let output_dir = expand_tilde(&params.output_dir);
        ensure_output_dir(&output_dir)?;

        tracing::debug!(
            host = %host,
            port = params.port,
            user = %username,
            output = %output_dir.display(),
            prefix = %params.prefix,
            "Resolved connection parameters"
        );

        Ok(Self {
            host: host.to_string(),
            port: params.port,
            username: username.to_string(),
            password,
            output_dir,
            prefix: params.prefix,
            connect_timeout: params.connect_timeout,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Directory the artifact is written to. Exists once resolution succeeded.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

impl std::fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSet")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("output_dir", &self.output_dir)
            .field("prefix", &self.prefix)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Decode a password that may carry the `B:` base64 marker.
///
/// Without the marker the value is returned as is. With it, the remainder
/// must be standard base64 of UTF-8 text; one trailing newline (as left by
/// `echo secret | base64`) is dropped.
///
/// Decoded bytes that are not UTF-8 are rejected with
/// [`ConfigError::BadEncoding`] rather than passed through: russh's
/// password authentication only carries a `String`, so such a password
/// could never be sent.
pub fn decode_password(raw: &str) -> Result<Zeroizing<String>, ConfigError> {
    let Some(encoded) = raw.strip_prefix(ENCODED_PASSWORD_PREFIX) else {
        return Ok(Zeroizing::new(raw.to_string()));
    };

    let bytes = Zeroizing::new(
        STANDARD
            .decode(encoded)
            .map_err(|e| ConfigError::BadEncoding(e.to_string()))?,
    );
    let text = std::str::from_utf8(&bytes)
        .map_err(|_| ConfigError::BadEncoding("decoded password is not valid UTF-8".into()))?;

    Ok(Zeroizing::new(
        text.strip_suffix('\n').unwrap_or(text).to_string(),
    ))
}

fn ensure_output_dir(path: &Path) -> Result<(), ConfigError> {
    if path.is_dir() {
        return Ok(());
    }
    tracing::info!(path = %path.display(), "Creating output directory");
    std::fs::create_dir_all(path).map_err(|source| ConfigError::DirCreateFailed {
        path: path.to_path_buf(),
        source,
    })
}
