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

//! The persistence boundary.
//!
//! Collections are read and written whole. A save either replaces the
//! entire collection or leaves the previous one in place.

use crate::error::Fallible;
use crate::types::group::Group;
use crate::types::item::Item;

pub trait Store {
    fn load_items(&self) -> Fallible<Vec<Item>>;

    fn save_items(&mut self, items: &[Item]) -> Fallible<()>;

    fn load_groups(&self) -> Fallible<Vec<Group>>;

    fn save_groups(&mut self, groups: &[Group]) -> Fallible<()>;
}

/// A store that keeps both collections in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Vec<Item>,
    groups: Vec<Group>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items,
            groups: Vec::new(),
        }
    }
}

impl Store for MemoryStore {
    fn load_items(&self) -> Fallible<Vec<Item>> {
        Ok(self.items.clone())
    }

    fn save_items(&mut self, items: &[Item]) -> Fallible<()> {
        self.items = items.to_vec();
        Ok(())
    }

    fn load_groups(&self) -> Fallible<Vec<Group>> {
        Ok(self.groups.clone())
    }

    fn save_groups(&mut self, groups: &[Group]) -> Fallible<()> {
        self.groups = groups.to_vec();
        Ok(())
    }
}
