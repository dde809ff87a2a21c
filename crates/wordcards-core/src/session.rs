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

//! Review sessions.
//!
//! A session is a queue of item ids captured from the due set at start. Each
//! learning mode owns its own session, so sessions never see each other's
//! progress.

use crate::due::GroupFilter;
use crate::due::due_today_by_group;
use crate::error::Fallible;
use crate::rng::TinyRng;
use crate::rng::shuffle;
use crate::sm2::Outcome;
use crate::store::Store;
use crate::types::item::Item;
use crate::types::item::ItemId;
use crate::types::timestamp::Timestamp;
use crate::vocabulary::record_outcome;

/// Presentation options applied when the queue is captured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Maximum number of items in the queue.
    pub limit: Option<usize>,
    /// Seed for shuffling the queue. `None` keeps collection order.
    pub shuffle_seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewSession {
    filter: GroupFilter,
    options: SessionOptions,
    queue: Vec<ItemId>,
    position: usize,
    correct: usize,
    incorrect: usize,
}

impl ReviewSession {
    /// Captures the items due as of `as_of` that match `filter`.
    pub fn start(
        items: &[Item],
        filter: GroupFilter,
        options: SessionOptions,
        as_of: Timestamp,
    ) -> Self {
        let queue = Self::capture(items, &filter, options, as_of);
        Self {
            filter,
            options,
            queue,
            position: 0,
            correct: 0,
            incorrect: 0,
        }
    }

    fn capture(
        items: &[Item],
        filter: &GroupFilter,
        options: SessionOptions,
        as_of: Timestamp,
    ) -> Vec<ItemId> {
        let mut queue: Vec<ItemId> = due_today_by_group(items, filter, as_of)
            .into_iter()
            .map(|item| item.id.clone())
            .collect();
        if let Some(seed) = options.shuffle_seed {
            let mut rng = TinyRng::from_seed(seed);
            queue = shuffle(queue, &mut rng);
        }
        if let Some(limit) = options.limit {
            queue.truncate(limit);
        }
        queue
    }

    /// Starts over with a fresh due set, keeping the filter and options.
    pub fn restart(&mut self, items: &[Item], as_of: Timestamp) {
        *self = Self::start(items, self.filter.clone(), self.options, as_of);
    }

    pub fn filter(&self) -> &GroupFilter {
        &self.filter
    }

    pub fn current(&self) -> Option<&ItemId> {
        self.queue.get(self.position)
    }

    /// Records the outcome for the current item and moves to the next one.
    ///
    /// Returns the updated item. If the current item no longer exists in the
    /// store, nothing is recorded and the session still advances.
    pub fn answer<S: Store>(
        &mut self,
        store: &mut S,
        outcome: Outcome,
        now: Timestamp,
    ) -> Fallible<Option<Item>> {
        let Some(id) = self.current().cloned() else {
            return Ok(None);
        };
        let updated = record_outcome(store, &id, outcome, now)?;
        if updated.is_some() {
            if outcome.is_correct() {
                self.correct += 1;
            } else {
                self.incorrect += 1;
            }
        }
        self.position += 1;
        Ok(updated)
    }

    /// Moves past the current item without recording anything.
    pub fn skip(&mut self) {
        if self.position < self.queue.len() {
            self.position += 1;
        }
    }

    /// Drops a deleted item from the queue. The current item stays current
    /// unless it is the one removed.
    pub fn remove(&mut self, id: &ItemId) {
        if let Some(index) = self.queue.iter().position(|queued| queued == id) {
            self.queue.remove(index);
            if index < self.position {
                self.position -= 1;
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.queue.len()
    }

    /// 1-based position of the current item, for "3 / 10" displays.
    pub fn position(&self) -> usize {
        (self.position + 1).min(self.queue.len())
    }

    pub fn total(&self) -> usize {
        self.queue.len()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len() - self.position.min(self.queue.len())
    }

    /// Fraction of the queue already handled. An empty session is complete.
    pub fn progress(&self) -> f64 {
        if self.queue.is_empty() {
            1.0
        } else {
            self.position.min(self.queue.len()) as f64 / self.queue.len() as f64
        }
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn incorrect(&self) -> usize {
        self.incorrect
    }
}
