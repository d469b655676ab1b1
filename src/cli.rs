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

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    Config, ConnectionParams, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_OUTPUT_DIR, DEFAULT_PORT,
    DEFAULT_PREFIX,
};

#[derive(Parser, Debug)]
#[command(
    name = "mikbak",
    version,
    about = "Back up a MikroTik RouterOS device over SSH",
    long_about = "mikbak logs into a RouterOS device over SSH, prints its system resources,\nruns an unencrypted '/system backup save' and downloads the resulting\n.backup file over SFTP on the same connection.\n\nThe device host key is NOT verified.",
    after_help = "EXAMPLES:\n  Back up to the current directory:   mikbak -s 192.168.88.1 -u admin -p secret\n  Base64-encoded password:            mikbak -s 10.0.0.1 -u backup -p B:c2VjcmV0Cg==\n  Custom directory and prefix:        mikbak -s core -u backup -o ~/backups --prefix core\n\nServer, user and password may also come from the defaults file (see --config)."
)]
pub struct Cli {
    #[arg(short = 's', long, help = "Device IP address or hostname")]
    pub server: Option<String>,

    #[arg(short = 'u', long, help = "Login username")]
    pub user: Option<String>,

    #[arg(
        short = 'p',
        long,
        env = "MIKBAK_PASSWORD",
        hide_env_values = true,
        help = "Login password, literal or 'B:' followed by base64"
    )]
    pub password: Option<String>,

    #[arg(
        short = 'o',
        long,
        help = "Local directory for the backup file [default: .]\nCreated if it does not exist"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Backup file name prefix [default: ros]")]
    pub prefix: Option<String>,

    #[arg(long, help = "SSH port [default: 22]")]
    pub port: Option<u16>,

    #[arg(
        long,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Connection timeout in seconds, covering dial, handshake and login [default: 10]"
    )]
    pub connect_timeout: Option<u64>,

    #[arg(
        long,
        default_value = crate::config::DEFAULT_CONFIG_PATH,
        help = "Defaults file path\nA missing file is ignored"
    )]
    pub config: PathBuf,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,
}

impl Cli {
    /// Merge flags over the defaults file over built-in defaults.
    ///
    /// Missing server, user or password become empty strings so that the
    /// resolver reports them.
    pub fn connection_params(&self, config: &Config) -> ConnectionParams {
        let defaults = &config.defaults;

        let pick = |flag: &Option<String>, fallback: &Option<String>| {
            flag.clone()
                .or_else(|| fallback.clone())
                .unwrap_or_default()
        };

        let connect_timeout = self
            .connect_timeout
            .or(defaults.connect_timeout.filter(|secs| *secs > 0))
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);

        ConnectionParams {
            host: pick(&self.server, &defaults.server),
            port: self.port.or(defaults.port).unwrap_or(DEFAULT_PORT),
            username: pick(&self.user, &defaults.user),
            password: pick(&self.password, &defaults.password),
            output_dir: self
                .output
                .clone()
                .or_else(|| defaults.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            prefix: self
                .prefix
                .clone()
                .or_else(|| defaults.prefix.clone())
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            connect_timeout: Duration::from_secs(connect_timeout),
        }
    }
}
