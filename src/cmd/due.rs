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
use wordcards_core::GroupFilter;
use wordcards_core::Store;
use wordcards_core::Timestamp;
use wordcards_core::due::due_today_by_group;
use wordcards_core::due::upcoming;

use crate::cmd::items::item_line;
use crate::collection::Collection;

/// Prints the items due today, optionally within one group.
pub fn print_due(directory: Option<String>, group: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let items = collection.db.load_items()?;
    let now = Timestamp::now();
    let filter = GroupFilter::from(group.as_deref());
    let due = due_today_by_group(&items, &filter, now);
    if due.is_empty() {
        println!("No items due today.");
        return Ok(());
    }
    for item in &due {
        println!("{}", item_line(item, now));
    }
    println!("{} due today ({filter}).", due.len());
    Ok(())
}

/// Prints scheduled items coming up within `days` (default from the config).
pub fn print_upcoming(directory: Option<String>, days: Option<i64>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let days = days.unwrap_or(collection.config.upcoming_days);
    let items = collection.db.load_items()?;
    let now = Timestamp::now();
    let soon = upcoming(&items, now, days);
    for item in &soon {
        println!("{}", item_line(item, now));
    }
    println!("{} upcoming in the next {days} days.", soon.len());
    Ok(())
}
