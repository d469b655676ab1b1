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

use anyhow::{bail, Result};
use std::net::{IpAddr, Ipv6Addr};

/// Maximum length of a RouterOS file name component we are willing to build.
const MAX_FILE_NAME_LENGTH: usize = 64;

/// Validate a command before it is sent over an exec channel.
pub fn sanitize_command(command: &str) -> Result<String> {
    if command.trim().is_empty() {
        bail!("Empty command not allowed");
    }

    const MAX_COMMAND_LENGTH: usize = 16384;
    if command.len() > MAX_COMMAND_LENGTH {
        bail!(
            "Command too long: {} bytes (max: {} bytes)",
            command.len(),
            MAX_COMMAND_LENGTH
        );
    }

    if command.contains('\0') {
        bail!("Command contains null bytes");
    }

    // The RouterOS console runs each line as a separate command
    if command.contains('\n') || command.contains('\r') {
        bail!("Command contains line breaks");
    }

    Ok(command.to_string())
}

/// Maximum length of a DNS name.
const MAX_HOSTNAME_LENGTH: usize = 253;

/// Maximum length of a single DNS label.
const MAX_LABEL_LENGTH: usize = 63;

/// Validate a device address: an IPv4 or IPv6 literal (optionally in
/// brackets, IPv6 optionally with a `%<zone>` suffix) or a DNS name.
pub fn sanitize_hostname(hostname: &str) -> Result<String> {
    if hostname.trim().is_empty() {
        bail!("Empty hostname not allowed");
    }

    let unbracketed = hostname
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(hostname);
    if unbracketed.parse::<IpAddr>().is_ok() {
        return Ok(hostname.to_string());
    }
    if let Some((addr, zone)) = unbracketed.split_once('%') {
        if addr.parse::<Ipv6Addr>().is_ok() && is_valid_zone(zone) {
            return Ok(hostname.to_string());
        }
        bail!("Invalid scoped IPv6 address: {}", hostname);
    }

    if hostname.len() > MAX_HOSTNAME_LENGTH {
        bail!(
            "Hostname too long: {} bytes (max: {} bytes)",
            hostname.len(),
            MAX_HOSTNAME_LENGTH
        );
    }

    for label in hostname.trim_end_matches('.').split('.') {
        if label.is_empty() {
            bail!("Empty label in hostname: {}", hostname);
        }
        if label.len() > MAX_LABEL_LENGTH {
            bail!("Hostname label too long: {}", label);
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            bail!("Invalid characters in hostname: {}", hostname);
        }
        if label.starts_with('-') || label.ends_with('-') {
            bail!("Hostname labels cannot start or end with a hyphen: {}", hostname);
        }
    }

    Ok(hostname.to_string())
}

// Interface name or numeric scope id.
fn is_valid_zone(zone: &str) -> bool {
    !zone.is_empty()
        && zone.len() <= 64
        && zone
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Validate a token that is spliced into a RouterOS file name.
///
/// The value ends up unquoted in `name=<value>` on the device console, so
/// only characters that cannot start a new argument or expression pass.
pub fn sanitize_file_name(name: &str) -> Result<String> {
    if name.is_empty() {
        bail!("Empty file name not allowed");
    }

    if name.len() > MAX_FILE_NAME_LENGTH {
        bail!(
            "File name too long: {} bytes (max: {} bytes)",
            name.len(),
            MAX_FILE_NAME_LENGTH
        );
    }

    let valid_chars = |c: char| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
    if !name.chars().all(valid_chars) {
        bail!("Invalid characters in file name: {}", name);
    }

    if name.contains("..") {
        bail!("Double dots not allowed in file name");
    }

    Ok(name.to_string())
}
