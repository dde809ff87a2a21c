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

use std::path::Path;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wordcards_core::ErrorReport;
use wordcards_core::Fallible;
use wordcards_core::Group;
use wordcards_core::Item;
use wordcards_core::Store;

const ITEMS_KEY: &str = "items";
const GROUPS_KEY: &str = "groups";

fn db_error(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}

/// A key-value table holding each collection as one JSON document.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(db_error)?;
        Self::init(conn)
    }

    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(db_error)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            (),
        )
        .map_err(db_error)?;
        Ok(Self { conn })
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Fallible<Vec<T>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(db_error)?;
        log::debug!("Loaded '{key}' ({} bytes)", value.as_ref().map_or(0, String::len));
        match value {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Writes all the given entries in one transaction.
    fn put(&mut self, entries: &[(&str, String)]) -> Fallible<()> {
        let tx = self.conn.transaction().map_err(db_error)?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(db_error)?;
            log::debug!("Saved '{key}' ({} bytes)", value.len());
        }
        tx.commit().map_err(db_error)
    }

    fn encode<T: Serialize>(values: &[T]) -> Fallible<String> {
        Ok(serde_json::to_string(values)?)
    }

    /// Replaces both collections atomically.
    pub fn replace_all(&mut self, items: &[Item], groups: &[Group]) -> Fallible<()> {
        let entries = [
            (ITEMS_KEY, Self::encode(items)?),
            (GROUPS_KEY, Self::encode(groups)?),
        ];
        self.put(&entries)
    }
}

impl Store for Database {
    fn load_items(&self) -> Fallible<Vec<Item>> {
        self.get(ITEMS_KEY)
    }

    fn save_items(&mut self, items: &[Item]) -> Fallible<()> {
        let entries = [(ITEMS_KEY, Self::encode(items)?)];
        self.put(&entries)
    }

    fn load_groups(&self) -> Fallible<Vec<Group>> {
        self.get(GROUPS_KEY)
    }

    fn save_groups(&mut self, groups: &[Group]) -> Fallible<()> {
        let entries = [(GROUPS_KEY, Self::encode(groups)?)];
        self.put(&entries)
    }
}
