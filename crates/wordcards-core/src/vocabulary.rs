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

//! Item management and the outcome recorder.
//!
//! Every mutating operation reads the whole collection, changes it in memory
//! and writes it back. Operations take the store by `&mut`, so two writes
//! can never interleave through this API.

use crate::error::Fallible;
use crate::error::ItemError;
use crate::rng::TinyRng;
use crate::rng::generate_id;
use crate::sm2::LEARNED_INTERVAL;
use crate::sm2::Outcome;
use crate::sm2::compute_next_schedule;
use crate::store::Store;
use crate::types::group::Group;
use crate::types::group::GroupId;
use crate::types::item::Item;
use crate::types::item::ItemId;
use crate::types::item::NewItem;
use crate::types::timestamp::Timestamp;

/// Trims content, checks required fields and resolves the group reference
/// against `groups`.
fn clean(content: NewItem, groups: &[Group]) -> Result<NewItem, ItemError> {
    let text = content.text.trim().to_string();
    let pronunciation = content.pronunciation.trim().to_string();
    let meaning = content.meaning.trim().to_string();
    if text.is_empty() {
        return Err(ItemError::MissingField("text"));
    }
    if pronunciation.is_empty() {
        return Err(ItemError::MissingField("pronunciation"));
    }
    if meaning.is_empty() {
        return Err(ItemError::MissingField("meaning"));
    }
    let example = content
        .example
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());
    let group_id = match content.group_id {
        Some(id) if !id.is_default() && groups.iter().any(|g| g.id == id) => id,
        _ => GroupId::default_group(),
    };
    Ok(NewItem {
        text,
        pronunciation,
        meaning,
        example,
        group_id: Some(group_id),
    })
}

pub fn add_item<S: Store>(
    store: &mut S,
    content: NewItem,
    now: Timestamp,
    rng: &mut TinyRng,
) -> Result<Item, ItemError> {
    let groups = store.load_groups()?;
    let content = clean(content, &groups)?;
    let mut items = store.load_items()?;
    let item = Item::new(ItemId::new(generate_id(now, rng)), content, now);
    items.push(item.clone());
    store.save_items(&items)?;
    Ok(item)
}

/// The result of a bulk insert.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BulkReport {
    pub added: usize,
    pub skipped: usize,
}

/// Adds many items to one group with a single write. Entries missing a
/// required field are skipped.
pub fn add_items_bulk<S: Store>(
    store: &mut S,
    contents: Vec<NewItem>,
    group: &GroupId,
    now: Timestamp,
    rng: &mut TinyRng,
) -> Fallible<BulkReport> {
    let groups = store.load_groups()?;
    let mut items = store.load_items()?;
    let mut report = BulkReport::default();
    for content in contents {
        let content = NewItem {
            group_id: Some(group.clone()),
            ..content
        };
        match clean(content, &groups) {
            Ok(content) => {
                items.push(Item::new(ItemId::new(generate_id(now, rng)), content, now));
                report.added += 1;
            }
            Err(_) => report.skipped += 1,
        }
    }
    if report.added > 0 {
        store.save_items(&items)?;
    }
    Ok(report)
}

/// Replaces an item's content and group. Scheduling fields are untouched.
pub fn update_item_content<S: Store>(
    store: &mut S,
    id: &ItemId,
    content: NewItem,
) -> Result<Item, ItemError> {
    let groups = store.load_groups()?;
    let content = clean(content, &groups)?;
    let mut items = store.load_items()?;
    let item = items
        .iter_mut()
        .find(|item| &item.id == id)
        .ok_or_else(|| ItemError::NotFound(id.clone()))?;
    item.text = content.text;
    item.pronunciation = content.pronunciation;
    item.meaning = content.meaning;
    item.example = content.example;
    item.group_id = content.group_id;
    let updated = item.clone();
    store.save_items(&items)?;
    Ok(updated)
}

/// Removes an item. Returns false if no item had this id.
pub fn delete_item<S: Store>(store: &mut S, id: &ItemId) -> Fallible<bool> {
    let mut items = store.load_items()?;
    let before = items.len();
    items.retain(|item| &item.id != id);
    if items.len() == before {
        return Ok(false);
    }
    store.save_items(&items)?;
    Ok(true)
}

pub fn get_item<S: Store>(store: &S, id: &ItemId) -> Fallible<Option<Item>> {
    Ok(store.load_items()?.into_iter().find(|item| &item.id == id))
}

/// Case-insensitive substring search over text, pronunciation and meaning.
pub fn search_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            item.text.to_lowercase().contains(&query)
                || item.pronunciation.to_lowercase().contains(&query)
                || item.meaning.to_lowercase().contains(&query)
        })
        .collect()
}

/// Applies a review outcome to one item and persists the collection.
///
/// Returns the updated item, or `None` without writing anything if no item
/// has this id.
pub fn record_outcome<S: Store>(
    store: &mut S,
    id: &ItemId,
    outcome: Outcome,
    now: Timestamp,
) -> Fallible<Option<Item>> {
    let mut items = store.load_items()?;
    let Some(item) = items.iter_mut().find(|item| &item.id == id) else {
        return Ok(None);
    };
    let schedule = compute_next_schedule(item.scheduling(), outcome.quality(), now);
    item.interval = schedule.fields.interval;
    item.ease_factor = schedule.fields.ease_factor;
    item.repetitions = schedule.fields.repetitions;
    item.last_review_at = Some(schedule.last_review_at);
    item.next_review_at = Some(schedule.next_review_at);
    if outcome.is_correct() {
        item.correct_count += 1;
    } else {
        item.wrong_count += 1;
    }
    item.learned = outcome.is_correct() && schedule.fields.interval >= LEARNED_INTERVAL;
    let updated = item.clone();
    store.save_items(&items)?;
    Ok(Some(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::GroupDraft;
    use crate::groups::create_group;
    use crate::sm2::MAX_INTERVAL;
    use crate::store::MemoryStore;
    use crate::types::group::DEFAULT_GROUP_ID;

    fn feq(a: f64, b: f64) -> bool {
        f64::abs(a - b) < 1e-9
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn now() -> Timestamp {
        ts("2024-06-01T10:00:00.000")
    }

    fn content(text: &str) -> NewItem {
        NewItem {
            text: text.to_string(),
            pronunciation: format!("{text}-pron"),
            meaning: format!("{text}-meaning"),
            example: None,
            group_id: None,
        }
    }

    /// Stores a single item with the given scheduling state.
    fn store_with(interval: i64, ease_factor: f64, repetitions: i64) -> (MemoryStore, ItemId) {
        let mut item = Item::new(ItemId::from("w"), content("w"), now());
        item.interval = interval;
        item.ease_factor = ease_factor;
        item.repetitions = repetitions;
        (MemoryStore::with_items(vec![item]), ItemId::from("w"))
    }

    #[test]
    fn test_end_to_end_scenario() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(3);
        let item = add_item(&mut store, content("学习"), now(), &mut rng)?;
        assert_eq!(item.interval, 0);
        assert_eq!(item.ease_factor, 2.5);
        assert_eq!(item.repetitions, 0);

        let item = record_outcome(&mut store, &item.id, Outcome::Pass, now())?.unwrap();
        assert_eq!(item.interval, 1);
        assert_eq!(item.repetitions, 1);
        assert!(feq(item.ease_factor, 2.6));
        assert!(!item.learned);

        let later = now().plus_days(1);
        let item = record_outcome(&mut store, &item.id, Outcome::Pass, later)?.unwrap();
        assert_eq!(item.interval, 6);
        assert_eq!(item.repetitions, 2);

        let item = record_outcome(&mut store, &item.id, Outcome::Fail, later)?.unwrap();
        assert_eq!(item.interval, 1);
        assert_eq!(item.repetitions, 0);
        assert_eq!(item.correct_count, 2);
        assert_eq!(item.wrong_count, 1);
        assert_eq!(item.last_review_at, Some(later));
        assert_eq!(item.next_review_at, Some(later.plus_days(1)));

        assert_eq!(store.load_items()?, vec![item]);
        Ok(())
    }

    #[test]
    fn test_learned_at_twenty_one() -> Fallible<()> {
        let (mut store, id) = store_with(10, 2.1, 3);
        let item = record_outcome(&mut store, &id, Outcome::Pass, now())?.unwrap();
        assert_eq!(item.interval, 21);
        assert!(item.learned);
        Ok(())
    }

    #[test]
    fn test_long_pass_streak_stays_in_range() -> Fallible<()> {
        let (mut store, id) = store_with(0, 2.5, 0);
        let mut at = now();
        for _ in 0..40 {
            let item = record_outcome(&mut store, &id, Outcome::Pass, at)?.unwrap();
            assert!(item.interval <= MAX_INTERVAL);
            at = item.next_review_at.unwrap();
        }
        let item = get_item(&store, &id)?.unwrap();
        assert_eq!(item.interval, MAX_INTERVAL);
        assert_eq!(item.correct_count, 40);
        Ok(())
    }

    #[test]
    fn test_huge_stored_interval() -> Fallible<()> {
        let (mut store, id) = store_with(50_000_000, 2.5, 4);
        let item = record_outcome(&mut store, &id, Outcome::Pass, now())?.unwrap();
        assert_eq!(item.interval, MAX_INTERVAL);
        assert_eq!(item.next_review_at, Some(now().plus_days(MAX_INTERVAL)));
        assert!(item.learned);
        Ok(())
    }

    #[test]
    fn test_not_learned_at_twenty() -> Fallible<()> {
        let (mut store, id) = store_with(10, 2.0, 3);
        let item = record_outcome(&mut store, &id, Outcome::Pass, now())?.unwrap();
        assert_eq!(item.interval, 20);
        assert!(!item.learned);
        Ok(())
    }

    #[test]
    fn test_failure_clears_learned() -> Fallible<()> {
        let (mut store, id) = store_with(30, 2.5, 5);
        let item = record_outcome(&mut store, &id, Outcome::Pass, now())?.unwrap();
        assert!(item.learned);
        let item = record_outcome(&mut store, &id, Outcome::Fail, now())?.unwrap();
        assert!(!item.learned);
        Ok(())
    }

    #[test]
    fn test_unknown_id_is_noop() -> Fallible<()> {
        let (mut store, _) = store_with(0, 2.5, 0);
        let before = store.load_items()?;
        let result = record_outcome(&mut store, &ItemId::from("nope"), Outcome::Pass, now())?;
        assert!(result.is_none());
        assert_eq!(store.load_items()?, before);
        Ok(())
    }

    #[test]
    fn test_each_call_increments_exactly_one_counter() -> Fallible<()> {
        let (mut store, id) = store_with(0, 2.5, 0);
        record_outcome(&mut store, &id, Outcome::Pass, now())?;
        record_outcome(&mut store, &id, Outcome::Pass, now())?;
        record_outcome(&mut store, &id, Outcome::Fail, now())?;
        let item = get_item(&store, &id)?.unwrap();
        assert_eq!(item.correct_count, 2);
        assert_eq!(item.wrong_count, 1);
        Ok(())
    }

    #[test]
    fn test_only_target_item_changes() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(3);
        let a = add_item(&mut store, content("a"), now(), &mut rng)?;
        let b = add_item(&mut store, content("b"), now(), &mut rng)?;
        record_outcome(&mut store, &a.id, Outcome::Pass, now())?;
        assert_eq!(get_item(&store, &b.id)?, Some(b));
        Ok(())
    }

    #[test]
    fn test_add_requires_content() {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(3);
        let mut missing = content("x");
        missing.meaning = "  ".to_string();
        assert_eq!(
            add_item(&mut store, missing, now(), &mut rng),
            Err(ItemError::MissingField("meaning"))
        );
        assert!(store.load_items().unwrap().is_empty());
    }

    #[test]
    fn test_add_resolves_unknown_group_to_default() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(3);
        let mut c = content("x");
        c.group_id = Some(GroupId::from("ghost"));
        c.example = Some("   ".to_string());
        let item = add_item(&mut store, c, now(), &mut rng)?;
        assert_eq!(item.group_key(), DEFAULT_GROUP_ID);
        assert!(item.example.is_none());
        Ok(())
    }

    #[test]
    fn test_add_keeps_existing_group() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(3);
        let group = create_group(&mut store, GroupDraft::named("Food"), now(), &mut rng)?;
        let mut c = content("饭");
        c.group_id = Some(group.id.clone());
        let item = add_item(&mut store, c, now(), &mut rng)?;
        assert!(item.belongs_to(&group.id));
        Ok(())
    }

    #[test]
    fn test_bulk_add_skips_incomplete() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(3);
        let mut broken = content("b");
        broken.pronunciation = String::new();
        let report = add_items_bulk(
            &mut store,
            vec![content("a"), broken, content("c")],
            &GroupId::default_group(),
            now(),
            &mut rng,
        )?;
        assert_eq!(report, BulkReport { added: 2, skipped: 1 });
        let items = store.load_items()?;
        assert_eq!(items.len(), 2);
        assert_ne!(items[0].id, items[1].id);
        Ok(())
    }

    #[test]
    fn test_update_content_keeps_schedule() -> Fallible<()> {
        let (mut store, id) = store_with(0, 2.5, 0);
        record_outcome(&mut store, &id, Outcome::Pass, now())?;
        let mut c = content("w2");
        c.example = Some("w2 in a sentence".to_string());
        let updated = update_item_content(&mut store, &id, c)?;
        assert_eq!(updated.text, "w2");
        assert_eq!(updated.example.as_deref(), Some("w2 in a sentence"));
        assert_eq!(updated.interval, 1);
        assert_eq!(updated.correct_count, 1);
        assert_eq!(
            update_item_content(&mut store, &ItemId::from("nope"), content("z")),
            Err(ItemError::NotFound(ItemId::from("nope")))
        );
        Ok(())
    }

    #[test]
    fn test_delete_item() -> Fallible<()> {
        let (mut store, id) = store_with(0, 2.5, 0);
        assert!(!delete_item(&mut store, &ItemId::from("nope"))?);
        assert!(delete_item(&mut store, &id)?);
        assert!(store.load_items()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_search() {
        let items = vec![
            Item::new(ItemId::from("1"), content("Apple"), now()),
            Item::new(ItemId::from("2"), content("pear"), now()),
        ];
        let found: Vec<&str> = search_items(&items, " APP ")
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(found, ["1"]);
        assert_eq!(search_items(&items, "meaning").len(), 2);
        assert_eq!(search_items(&items, "").len(), 2);
    }
}
