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

use crate::sm2::INITIAL_EASE_FACTOR;
use crate::sm2::LEARNED_INTERVAL;
use crate::sm2::SchedulingFields;
use crate::types::group::DEFAULT_GROUP_ID;
use crate::types::group::GroupId;
use crate::types::timestamp::Timestamp;

/// Opaque, stable identifier of an item.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

fn default_ease_factor() -> f64 {
    INITIAL_EASE_FACTOR
}

/// A vocabulary entry together with its review state.
///
/// Content fields belong to whoever edits the entry; the scheduling fields
/// (`interval` through `learned`) are only written by the outcome recorder.
/// Scheduling fields missing from stored data deserialize to their initial
/// values, so entries written before scheduling existed still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    /// The word or phrase being learned.
    pub text: String,
    /// Pronunciation aid, e.g. pinyin.
    pub pronunciation: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Owning group. Absent means the default group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Days until the next review.
    #[serde(default)]
    pub interval: i64,
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
    /// Consecutive successful reviews.
    #[serde(default)]
    pub repetitions: i64,
    #[serde(default)]
    pub last_review_at: Option<Timestamp>,
    /// Absent until the first review; an absent value means due now.
    #[serde(default)]
    pub next_review_at: Option<Timestamp>,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub wrong_count: u32,
    #[serde(default)]
    pub learned: bool,
    pub created_at: Timestamp,
}

impl Item {
    /// Creates an item with fresh scheduling fields.
    pub fn new(id: ItemId, content: NewItem, created_at: Timestamp) -> Self {
        let initial = SchedulingFields::default();
        Self {
            id,
            text: content.text,
            pronunciation: content.pronunciation,
            meaning: content.meaning,
            example: content.example,
            group_id: content.group_id,
            interval: initial.interval,
            ease_factor: initial.ease_factor,
            repetitions: initial.repetitions,
            last_review_at: None,
            next_review_at: None,
            correct_count: 0,
            wrong_count: 0,
            learned: false,
            created_at,
        }
    }

    /// The owning group's id, resolving an absent reference to the default group.
    pub fn group_key(&self) -> &str {
        self.group_id
            .as_ref()
            .map(GroupId::as_str)
            .unwrap_or(DEFAULT_GROUP_ID)
    }

    pub fn belongs_to(&self, group: &GroupId) -> bool {
        self.group_key() == group.as_str()
    }

    pub fn scheduling(&self) -> SchedulingFields {
        SchedulingFields {
            interval: self.interval,
            ease_factor: self.ease_factor,
            repetitions: self.repetitions,
        }
    }

    /// True if the item has never been reviewed.
    pub fn is_new(&self) -> bool {
        self.last_review_at.is_none()
    }

    /// Brings stored scheduling state back into range for records that did
    /// not come from the scheduler. The fields are normalized, a reviewed
    /// item is due one interval after its last review, and `learned`
    /// requires a learned-length interval. Returns whether anything changed.
    pub fn normalize(&mut self) -> bool {
        let before = self.clone();
        let fields = self.scheduling().normalized();
        self.interval = fields.interval;
        self.ease_factor = fields.ease_factor;
        self.repetitions = fields.repetitions;
        if let Some(last) = self.last_review_at {
            self.next_review_at = Some(last.plus_days(self.interval));
        }
        if self.interval < LEARNED_INTERVAL {
            self.learned = false;
        }
        *self != before
    }
}

/// The user-editable part of an item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub text: String,
    pub pronunciation: String,
    pub meaning: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn created() -> Timestamp {
        Timestamp::try_from("2024-05-01T09:00:00.000".to_string()).unwrap()
    }

    fn sample() -> NewItem {
        NewItem {
            text: "你好".to_string(),
            pronunciation: "nǐ hǎo".to_string(),
            meaning: "hello".to_string(),
            example: None,
            group_id: None,
        }
    }

    #[test]
    fn test_new_item_defaults() {
        let item = Item::new(ItemId::from("a1"), sample(), created());
        assert_eq!(item.interval, 0);
        assert_eq!(item.ease_factor, 2.5);
        assert_eq!(item.repetitions, 0);
        assert!(item.last_review_at.is_none());
        assert!(item.next_review_at.is_none());
        assert!(!item.learned);
        assert!(item.is_new());
        assert_eq!(item.created_at, created());
    }

    #[test]
    fn test_absent_group_is_default() {
        let item = Item::new(ItemId::from("a1"), sample(), created());
        assert_eq!(item.group_key(), DEFAULT_GROUP_ID);
        assert!(item.belongs_to(&GroupId::default_group()));
        assert!(!item.belongs_to(&GroupId::from("hsk1")));
    }

    #[test]
    fn test_legacy_record_loads_with_defaults() -> Fallible<()> {
        let json = r#"{
            "id": "old",
            "text": "谢谢",
            "pronunciation": "xièxie",
            "meaning": "thanks",
            "createdAt": "2023-01-01T00:00:00.000"
        }"#;
        let item: Item = serde_json::from_str(json)?;
        assert_eq!(item.ease_factor, 2.5);
        assert_eq!(item.interval, 0);
        assert_eq!(item.correct_count, 0);
        assert_eq!(item.group_key(), DEFAULT_GROUP_ID);
        Ok(())
    }

    #[test]
    fn test_normalize_repairs_out_of_range_state() {
        let mut item = Item::new(ItemId::from("a1"), sample(), created());
        item.ease_factor = 0.5;
        item.interval = -3;
        item.repetitions = -1;
        item.learned = true;
        item.last_review_at = Some(created());
        item.next_review_at = Some(created().plus_days(400));
        assert!(item.normalize());
        assert_eq!(item.ease_factor, 1.3);
        assert_eq!(item.interval, 0);
        assert_eq!(item.repetitions, 0);
        assert!(!item.learned);
        assert_eq!(item.next_review_at, Some(created()));
        assert!(!item.normalize());
    }

    #[test]
    fn test_normalize_keeps_consistent_item() {
        let mut item = Item::new(ItemId::from("a1"), sample(), created());
        assert!(!item.normalize());
        item.interval = 30;
        item.repetitions = 4;
        item.learned = true;
        item.last_review_at = Some(created());
        item.next_review_at = Some(created().plus_days(30));
        assert!(!item.normalize());
        assert!(item.learned);
    }

    #[test]
    fn test_serialized_field_names() -> Fallible<()> {
        let item = Item::new(ItemId::from("a1"), sample(), created());
        let value = serde_json::to_value(&item)?;
        assert_eq!(value["easeFactor"], 2.5);
        assert_eq!(value["nextReviewAt"], serde_json::Value::Null);
        assert_eq!(value["createdAt"], "2024-05-01T09:00:00.000");
        assert!(value.get("groupId").is_none());
        Ok(())
    }
}
