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
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning user input into a [`CredentialSet`](super::CredentialSet).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required value: {0}")]
    MissingField(&'static str),

    #[error("password is not valid base64: {0}")]
    BadEncoding(String),

    #[error("invalid server address: {0}")]
    InvalidHost(String),

    #[error("invalid prefix: {0}")]
    InvalidPrefix(String),

    #[error("failed to create output directory {}: {source}", path.display())]
    DirCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read configuration file {}: {source}", path.display())]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration file {}: {source}", path.display())]
    ConfigFileParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
