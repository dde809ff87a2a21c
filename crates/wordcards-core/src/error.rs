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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::group::GroupId;
use crate::types::item::ItemId;

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value:#?}"),
        }
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            message: format!("JSON error: {value:#?}"),
        }
    }
}

impl From<GroupError> for ErrorReport {
    fn from(value: GroupError) -> Self {
        match value {
            GroupError::Storage(report) => report,
            declined => ErrorReport {
                message: declined.to_string(),
            },
        }
    }
}

impl From<ItemError> for ErrorReport {
    fn from(value: ItemError) -> Self {
        match value {
            ItemError::Storage(report) => report,
            declined => ErrorReport {
                message: declined.to_string(),
            },
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {
    fn description(&self) -> &str {
        &self.message
    }
}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}

/// Why a group operation did not go through.
#[derive(Debug, PartialEq)]
pub enum GroupError {
    /// The trimmed name was empty.
    EmptyName,
    /// Another group already uses this name, ignoring case.
    DuplicateName(String),
    /// The default group cannot be renamed, recolored or deleted.
    DefaultGroupProtected,
    NotFound(GroupId),
    /// The store failed to read or write.
    Storage(ErrorReport),
}

impl GroupError {
    /// True when the caller can fix the input and try again.
    pub fn is_declined(&self) -> bool {
        !matches!(self, GroupError::Storage(_))
    }
}

impl Display for GroupError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            GroupError::EmptyName => write!(f, "group name must not be empty"),
            GroupError::DuplicateName(name) => {
                write!(f, "a group named '{name}' already exists")
            }
            GroupError::DefaultGroupProtected => {
                write!(f, "the default group cannot be modified or deleted")
            }
            GroupError::NotFound(id) => write!(f, "no group with id '{id}'"),
            GroupError::Storage(report) => write!(f, "{report}"),
        }
    }
}

impl Error for GroupError {}

impl From<ErrorReport> for GroupError {
    fn from(value: ErrorReport) -> Self {
        GroupError::Storage(value)
    }
}

/// Why an item operation did not go through.
#[derive(Debug, PartialEq)]
pub enum ItemError {
    /// A required content field was empty after trimming.
    MissingField(&'static str),
    NotFound(ItemId),
    Storage(ErrorReport),
}

impl ItemError {
    pub fn is_declined(&self) -> bool {
        !matches!(self, ItemError::Storage(_))
    }
}

impl Display for ItemError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ItemError::MissingField(field) => write!(f, "the {field} field is required"),
            ItemError::NotFound(id) => write!(f, "no item with id '{id}'"),
            ItemError::Storage(report) => write!(f, "{report}"),
        }
    }
}

impl Error for ItemError {}

impl From<ErrorReport> for ItemError {
    fn from(value: ErrorReport) -> Self {
        ItemError::Storage(value)
    }
}
