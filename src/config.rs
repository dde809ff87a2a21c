// Copyright 2026 The wordcards Authors
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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;
use wordcards_core::ErrorReport;
use wordcards_core::Fallible;
use wordcards_core::due::UPCOMING_DAYS;
use wordcards_core::fail;

pub const CONFIG_FILE: &str = "wordcards.toml";

/// Settings read from `wordcards.toml` in the collection directory.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// How many days ahead `upcoming` looks.
    pub upcoming_days: i64,
    /// Whether review sessions are shuffled.
    pub shuffle: bool,
    /// Maximum number of items per review session.
    pub session_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upcoming_days: UPCOMING_DAYS,
            shuffle: true,
            session_limit: None,
        }
    }
}

impl Config {
    /// Reads the config file in `directory`, or the defaults if there is none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE} in {}, using defaults", directory.display());
            return Ok(Self::default());
        }
        let text = read_to_string(&path)?;
        let config: Config = toml::from_str(&text).map_err(|e| {
            ErrorReport::new(format!("Failed to parse {}: {e}", path.display()))
        })?;
        if config.upcoming_days < 0 {
            return fail(format!(
                "{}: upcoming_days must not be negative.",
                path.display()
            ));
        }
        Ok(config)
    }
}
