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

use wordcards_core::Fallible;
use wordcards_core::GroupError;
use wordcards_core::GroupId;
use wordcards_core::Store;
use wordcards_core::Timestamp;
use wordcards_core::groups::GroupDraft;
use wordcards_core::groups::create_group;
use wordcards_core::groups::delete_group;
use wordcards_core::groups::list_groups;
use wordcards_core::groups::update_group;
use wordcards_core::stats::group_stats;

use crate::collection::Collection;
use crate::utils::new_rng;

fn warn_declined(e: &GroupError) {
    if e.is_declined() {
        log::warn!("Declined: {e}");
    }
}

pub fn list(directory: Option<String>) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let now = Timestamp::now();
    let groups = list_groups(&mut collection.db, now)?;
    let items = collection.db.load_items()?;
    for stats in group_stats(&items, &groups, now) {
        println!(
            "{}  {} {}  {} items, {}% learned, {} due",
            stats.group.id,
            stats.group.color,
            stats.group.name,
            stats.total,
            stats.progress,
            stats.due_today
        );
    }
    Ok(())
}

pub fn create(
    directory: Option<String>,
    name: String,
    description: Option<String>,
    color: Option<String>,
) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let draft = GroupDraft {
        name,
        description: description.unwrap_or_default(),
        color,
    };
    let mut rng = new_rng();
    let group = create_group(&mut collection.db, draft, Timestamp::now(), &mut rng)
        .inspect_err(warn_declined)?;
    log::info!("Created group '{}' ({})", group.name, group.id);
    println!("{}", group.id);
    Ok(())
}

pub fn update(
    directory: Option<String>,
    id: String,
    name: Option<String>,
    description: Option<String>,
    color: Option<String>,
) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let id = GroupId::new(id);
    let groups = collection.db.load_groups()?;
    let current = groups.iter().find(|g| g.id == id);
    let draft = GroupDraft {
        name: name
            .or_else(|| current.map(|g| g.name.clone()))
            .unwrap_or_default(),
        description: description
            .or_else(|| current.map(|g| g.description.clone()))
            .unwrap_or_default(),
        color,
    };
    let group = update_group(&mut collection.db, &id, draft).inspect_err(warn_declined)?;
    log::info!("Updated group '{}' ({})", group.name, group.id);
    Ok(())
}

pub fn delete(directory: Option<String>, id: String) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let id = GroupId::new(id);
    let moved = delete_group(&mut collection.db, &id).inspect_err(warn_declined)?;
    log::info!("Deleted group {id}, moved {moved} items to the default group");
    println!("Deleted group {id}; {moved} items moved to the default group.");
    Ok(())
}
