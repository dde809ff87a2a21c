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

//! JSON backup of the whole collection.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs::read_to_string;
use std::fs::write;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;
use wordcards_core::Fallible;
use wordcards_core::Group;
use wordcards_core::Item;
use wordcards_core::Store;
use wordcards_core::Timestamp;
use wordcards_core::fail;
use wordcards_core::groups::ensure_default_group;
use wordcards_core::groups::repair_group_references;

use crate::collection::Collection;

const BACKUP_VERSION: &str = "1.0";

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub version: String,
    pub exported_at: Timestamp,
    pub items: Vec<Item>,
    pub groups: Vec<Group>,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum ImportMode {
    /// Discard the current collection.
    Replace,
    /// Keep current groups, add new ones, and upsert items by id.
    Merge,
}

impl Display for ImportMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportMode::Replace => write!(f, "replace"),
            ImportMode::Merge => write!(f, "merge"),
        }
    }
}

pub fn export_collection(directory: Option<String>, output: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let backup = Backup {
        version: BACKUP_VERSION.to_string(),
        exported_at: Timestamp::now(),
        items: collection.db.load_items()?,
        groups: collection.db.load_groups()?,
    };
    let json = serde_json::to_string_pretty(&backup)?;
    match output {
        Some(path) => {
            write(&path, json)?;
            log::info!(
                "Exported {} items and {} groups to {path}",
                backup.items.len(),
                backup.groups.len()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn parse_backup(json: &str) -> Fallible<Backup> {
    let backup: Backup = serde_json::from_str(json)?;
    if backup.version != BACKUP_VERSION {
        return fail(format!("unsupported backup version: {}", backup.version));
    }
    Ok(backup)
}

/// Combines the current collections with a backup.
pub fn merge(
    mode: ImportMode,
    items: Vec<Item>,
    groups: Vec<Group>,
    backup: Backup,
) -> (Vec<Item>, Vec<Group>) {
    match mode {
        ImportMode::Replace => (backup.items, backup.groups),
        ImportMode::Merge => {
            let mut groups = groups;
            for group in backup.groups {
                if !groups.iter().any(|g| g.id == group.id) {
                    groups.push(group);
                }
            }
            let mut items = items;
            for item in backup.items {
                match items.iter_mut().find(|i| i.id == item.id) {
                    Some(existing) => *existing = item,
                    None => items.push(item),
                }
            }
            (items, groups)
        }
    }
}

/// Repairs imported records before they are stored: scheduling state is
/// brought back into range and dangling group references go to the default
/// group.
pub fn prepare_import(items: &mut [Item], groups: &mut Vec<Group>, now: Timestamp) {
    let normalized = items.iter_mut().map(|item| item.normalize()).filter(|&changed| changed).count();
    if normalized > 0 {
        log::warn!("Normalized the scheduling state of {normalized} imported items");
    }
    ensure_default_group(groups, now);
    let repaired = repair_group_references(items, groups);
    if repaired > 0 {
        log::warn!("Moved {repaired} items with unknown groups to the default group");
    }
}

pub fn import_collection(directory: Option<String>, file: String, mode: ImportMode) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let backup = parse_backup(&read_to_string(&file)?)?;
    let current_items = collection.db.load_items()?;
    let current_groups = collection.db.load_groups()?;
    let (mut items, mut groups) = merge(mode, current_items, current_groups, backup);
    prepare_import(&mut items, &mut groups, Timestamp::now());
    collection.db.replace_all(&items, &groups)?;
    log::info!(
        "Imported {file} ({mode}): {} items, {} groups",
        items.len(),
        groups.len()
    );
    Ok(())
}
