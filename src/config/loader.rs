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

//! Configuration file loading.

use std::path::Path;
use tokio::fs;

use super::error::ConfigError;
use super::types::Config;
use super::utils::expand_tilde;

impl Config {
    /// Load configuration from a file.
    ///
    /// A missing file is not an error: the defaults file is optional and
    /// an empty [`Config`] is returned in that case.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let expanded_path = expand_tilde(path);

        if !expanded_path.exists() {
            tracing::debug!(
                "Config file not found at {:?}, using defaults",
                expanded_path
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&expanded_path)
            .await
            .map_err(|source| ConfigError::ConfigFileRead {
                path: expanded_path.clone(),
                source,
            })?;

        Self::parse(&content).map_err(|source| ConfigError::ConfigFileParse {
            path: expanded_path.clone(),
            source,
        })
    }

    /// Parse YAML configuration content.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}
