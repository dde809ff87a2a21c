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

use clap::Args;
use wordcards_core::Fallible;
use wordcards_core::GroupFilter;
use wordcards_core::GroupId;
use wordcards_core::Item;
use wordcards_core::ItemError;
use wordcards_core::ItemId;
use wordcards_core::NewItem;
use wordcards_core::Store;
use wordcards_core::Timestamp;
use wordcards_core::due::NextReview;
use wordcards_core::due::by_group;
use wordcards_core::fail;
use wordcards_core::vocabulary::add_item;
use wordcards_core::vocabulary::delete_item;
use wordcards_core::vocabulary::get_item;
use wordcards_core::vocabulary::search_items;
use wordcards_core::vocabulary::update_item_content;

use crate::collection::Collection;
use crate::utils::new_rng;

/// Content fields given on the command line. Absent fields keep their
/// current value when editing.
#[derive(Args, Default)]
pub struct ItemFields {
    /// The word or phrase being learned.
    #[arg(long)]
    pub text: Option<String>,
    /// Reading or romanization.
    #[arg(long)]
    pub pronunciation: Option<String>,
    /// Translation or definition.
    #[arg(long)]
    pub meaning: Option<String>,
    /// An example sentence.
    #[arg(long)]
    pub example: Option<String>,
    /// Group id. Unknown groups fall back to the default group.
    #[arg(long)]
    pub group: Option<String>,
}

impl ItemFields {
    fn into_new_item(self) -> NewItem {
        NewItem {
            text: self.text.unwrap_or_default(),
            pronunciation: self.pronunciation.unwrap_or_default(),
            meaning: self.meaning.unwrap_or_default(),
            example: self.example,
            group_id: self.group.as_deref().map(GroupId::from),
        }
    }

    fn apply_to(self, item: &Item) -> NewItem {
        NewItem {
            text: self.text.unwrap_or_else(|| item.text.clone()),
            pronunciation: self
                .pronunciation
                .unwrap_or_else(|| item.pronunciation.clone()),
            meaning: self.meaning.unwrap_or_else(|| item.meaning.clone()),
            example: self.example.or_else(|| item.example.clone()),
            group_id: self
                .group
                .as_deref()
                .map(GroupId::from)
                .or_else(|| item.group_id.clone()),
        }
    }
}

fn warn_declined(e: &ItemError) {
    if e.is_declined() {
        log::warn!("Declined: {e}");
    }
}

/// One line describing an item, for listings.
pub fn item_line(item: &Item, now: Timestamp) -> String {
    let mut line = format!(
        "{}  {} [{}] {}  ({}, {})",
        item.id,
        item.text,
        item.pronunciation,
        item.meaning,
        item.group_key(),
        NextReview::describe(item.next_review_at, now)
    );
    if item.learned {
        line.push_str(" *");
    }
    line
}

pub fn add(directory: Option<String>, fields: ItemFields) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let mut rng = new_rng();
    let item = add_item(
        &mut collection.db,
        fields.into_new_item(),
        Timestamp::now(),
        &mut rng,
    )
    .inspect_err(warn_declined)?;
    log::info!("Added item {}", item.id);
    println!("{}", item.id);
    Ok(())
}

pub fn edit(directory: Option<String>, id: String, fields: ItemFields) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let id = ItemId::new(id);
    let Some(current) = get_item(&collection.db, &id)? else {
        return fail(format!("no item with id '{id}'"));
    };
    let item = update_item_content(&mut collection.db, &id, fields.apply_to(&current))
        .inspect_err(warn_declined)?;
    println!("{}", item_line(&item, Timestamp::now()));
    Ok(())
}

pub fn delete(directory: Option<String>, id: String) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let id = ItemId::new(id);
    if delete_item(&mut collection.db, &id)? {
        log::info!("Deleted item {id}");
        Ok(())
    } else {
        fail(format!("no item with id '{id}'"))
    }
}

pub fn list(
    directory: Option<String>,
    group: Option<String>,
    search: Option<String>,
) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let items = collection.db.load_items()?;
    let filter = GroupFilter::from(group.as_deref());
    let scoped: Vec<Item> = by_group(&items, &filter).into_iter().cloned().collect();
    let found = search_items(&scoped, search.as_deref().unwrap_or_default());
    let now = Timestamp::now();
    for item in &found {
        println!("{}", item_line(item, now));
    }
    log::debug!("Listed {} of {} items", found.len(), items.len());
    Ok(())
}
