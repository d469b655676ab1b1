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

//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Standard SSH port.
pub const DEFAULT_PORT: u16 = 22;

/// Artifact directory when neither the CLI nor the config file names one.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Artifact file name prefix.
pub const DEFAULT_PREFIX: &str = "ros";

/// Bound on dial, handshake and authentication together.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default location of the YAML defaults file.
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/mikbak/config.yaml";

/// Contents of the YAML defaults file.
///
/// ```yaml
/// defaults:
///   server: 192.168.88.1
///   user: backup
///   password: "B:c2VjcmV0Cg=="
///   output: ~/backups/routeros
///   prefix: core-router
/// ```
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

/// Values used when the matching CLI flag is absent.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub server: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub port: Option<u16>,
    pub output: Option<PathBuf>,
    pub prefix: Option<String>,
    pub connect_timeout: Option<u64>,
}

/// Connection parameters as supplied by the user, before resolution.
///
/// Empty strings stand for "not supplied"; the resolver rejects them.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub username: String,
    /// Literal password, or `B:` followed by base64.
    pub password: String,
    pub output_dir: PathBuf,
    pub prefix: String,
    pub connect_timeout: Duration,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            username: String::new(),
            password: String::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParams")
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
