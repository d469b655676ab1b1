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

//! Configuration and credential resolution for mikbak.

mod credentials;
mod error;
mod loader;
mod types;
mod utils;

pub use credentials::{decode_password, CredentialSet, ENCODED_PASSWORD_PREFIX};
pub use error::ConfigError;
pub use types::{
    Config, ConnectionParams, Defaults, DEFAULT_CONFIG_PATH, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_OUTPUT_DIR, DEFAULT_PORT, DEFAULT_PREFIX,
};
pub use utils::expand_tilde;
