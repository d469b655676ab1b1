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

use tracing_subscriber::EnvFilter;

/// Filter directives for a `-v` count when `RUST_LOG` is not set.
///
/// Two or more `-v` also open up the SSH transport's own logs, which is
/// where handshake and authentication problems show up.
pub fn verbosity_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "mikbak=warn",
        1 => "mikbak=info",
        2 => "mikbak=debug,russh=debug",
        _ => "mikbak=trace,russh=trace,russh_sftp=debug",
    }
}

/// Build the log filter. `RUST_LOG` wins over the `-v` count.
pub fn create_env_filter(verbosity: u8) -> EnvFilter {
    match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(verbosity_directives(verbosity)),
    }
}

/// Initialize console logging.
///
/// Log lines go to stderr; stdout carries the backup report only.
pub fn init_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(create_env_filter(verbosity))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
