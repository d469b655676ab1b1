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

use chrono::NaiveDate;
use std::fmt;

/// Extension RouterOS appends to binary backups.
pub const BACKUP_EXTENSION: &str = "backup";

/// Calendar format embedded in artifact names.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Name of the backup artifact produced on the device.
///
/// The name is computed locally and handed to the device; nothing checks
/// that the device actually wrote a file under that name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupArtifact {
    base_name: String,
}

impl BackupArtifact {
    /// Artifact for `prefix` created on `date`: `<prefix>-<YYYYMMDD>`.
    pub fn for_date(prefix: &str, date: NaiveDate) -> Self {
        Self {
            base_name: format!("{prefix}-{}", date.format(DATE_FORMAT)),
        }
    }

    /// Name passed to `/system backup save name=...`, without extension.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// File name the device stores, and the local file name.
    pub fn file_name(&self) -> String {
        format!("{}.{BACKUP_EXTENSION}", self.base_name)
    }
}

impl fmt::Display for BackupArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{BACKUP_EXTENSION}", self.base_name)
    }
}
