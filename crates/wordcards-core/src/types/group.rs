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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::timestamp::Timestamp;

/// Identifier of the reserved group that holds ungrouped items.
pub const DEFAULT_GROUP_ID: &str = "default";

pub const DEFAULT_GROUP_NAME: &str = "Ungrouped";

/// Palette offered for new groups.
pub const GROUP_COLORS: [&str; 10] = [
    "#6366f1", // indigo
    "#8b5cf6", // purple
    "#ec4899", // pink
    "#ef4444", // red
    "#f97316", // orange
    "#eab308", // yellow
    "#22c55e", // green
    "#14b8a6", // teal
    "#06b6d4", // cyan
    "#3b82f6", // blue
];

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn default_group() -> Self {
        Self(DEFAULT_GROUP_ID.to_string())
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_GROUP_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A named partition of items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
    pub created_at: Timestamp,
}

impl Group {
    /// The reserved group every orphaned item falls back to.
    pub fn default_group(created_at: Timestamp) -> Self {
        Self {
            id: GroupId::default_group(),
            name: DEFAULT_GROUP_NAME.to_string(),
            description: "Items not assigned to any group".to_string(),
            color: GROUP_COLORS[0].to_string(),
            created_at,
        }
    }

    /// Case-insensitive name comparison, ignoring surrounding whitespace.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}
