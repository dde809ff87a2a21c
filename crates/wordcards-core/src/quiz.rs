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

//! Multiple-choice quizzes.
//!
//! A quiz asks about items from one group, regardless of whether they are
//! due. Answers are recorded with the same outcome recorder as reviews.

use crate::due::GroupFilter;
use crate::due::by_group;
use crate::rng::TinyRng;
use crate::rng::shuffle;
use crate::types::item::Item;

/// Choices per question, the correct one included.
pub const OPTIONS_COUNT: usize = 4;

/// Picks up to `count` items to ask about, in random order. Empty when the
/// group has fewer items than a question has options.
pub fn quiz_questions<'a>(
    items: &'a [Item],
    filter: &GroupFilter,
    count: usize,
    rng: &mut TinyRng,
) -> Vec<&'a Item> {
    let scoped = by_group(items, filter);
    if scoped.len() < OPTIONS_COUNT {
        return Vec::new();
    }
    let mut questions = shuffle(scoped, rng);
    questions.truncate(count);
    questions
}

/// The shuffled choices for a question about `correct`: the item itself and
/// up to three distractors from the same group. A group too small to fill
/// a question borrows distractors from the whole collection.
pub fn quiz_options<'a>(
    items: &'a [Item],
    correct: &'a Item,
    filter: &GroupFilter,
    rng: &mut TinyRng,
) -> Vec<&'a Item> {
    let mut pool = by_group(items, filter);
    if pool.len() < OPTIONS_COUNT {
        pool = items.iter().collect();
    }
    pool.retain(|item| item.id != correct.id);
    let mut options = shuffle(pool, rng);
    options.truncate(OPTIONS_COUNT - 1);
    options.push(correct);
    shuffle(options, rng)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::types::group::GroupId;
    use crate::types::item::ItemId;
    use crate::types::item::NewItem;
    use crate::types::timestamp::Timestamp;

    fn item(id: &str, group: &str) -> Item {
        Item::new(
            ItemId::from(id),
            NewItem {
                text: id.to_string(),
                pronunciation: id.to_string(),
                meaning: format!("{id}-meaning"),
                example: None,
                group_id: Some(GroupId::from(group)),
            },
            Timestamp::try_from("2024-06-01T10:00:00.000".to_string()).unwrap(),
        )
    }

    fn ids<'a>(items: &[&'a Item]) -> Vec<&'a str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            item("a", "hsk1"),
            item("b", "hsk1"),
            item("c", "hsk1"),
            item("d", "hsk1"),
            item("e", "hsk1"),
            item("x", "hsk2"),
            item("y", "hsk2"),
        ]
    }

    #[test]
    fn test_options_come_from_the_group() {
        let items = sample();
        let filter = GroupFilter::from("hsk1");
        for seed in 0..20 {
            let mut rng = TinyRng::from_seed(seed);
            let options = quiz_options(&items, &items[0], &filter, &mut rng);
            assert_eq!(options.len(), OPTIONS_COUNT);
            assert!(options.iter().all(|o| o.belongs_to(&GroupId::from("hsk1"))));
            let unique: HashSet<&str> = ids(&options).into_iter().collect();
            assert_eq!(unique.len(), OPTIONS_COUNT);
            assert_eq!(ids(&options).iter().filter(|id| **id == "a").count(), 1);
        }
    }

    #[test]
    fn test_small_group_borrows_from_collection() {
        let items = sample();
        let filter = GroupFilter::from("hsk2");
        let mut rng = TinyRng::from_seed(5);
        let options = quiz_options(&items, &items[5], &filter, &mut rng);
        assert_eq!(options.len(), OPTIONS_COUNT);
        assert!(ids(&options).contains(&"x"));
        assert!(options.iter().any(|o| o.belongs_to(&GroupId::from("hsk1"))));
    }

    #[test]
    fn test_tiny_collection_gives_fewer_options() {
        let items = vec![item("a", "g"), item("b", "g")];
        let mut rng = TinyRng::from_seed(1);
        let options = quiz_options(&items, &items[1], &GroupFilter::All, &mut rng);
        let mut found = ids(&options);
        found.sort();
        assert_eq!(found, ["a", "b"]);
    }

    #[test]
    fn test_questions() {
        let items = sample();
        let mut rng = TinyRng::from_seed(9);
        let questions = quiz_questions(&items, &GroupFilter::from("hsk1"), 3, &mut rng);
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| q.belongs_to(&GroupId::from("hsk1"))));

        let all = quiz_questions(&items, &GroupFilter::All, 50, &mut rng);
        assert_eq!(all.len(), items.len());

        assert!(quiz_questions(&items, &GroupFilter::from("hsk2"), 10, &mut rng).is_empty());
    }
}
