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

//! Word lists: delimited text files with one item per row.
//!
//! Columns are text, pronunciation, meaning and an optional example. A
//! first row that looks like a header is skipped.

use std::fs::File;
use std::io::Read;

use csv::ReaderBuilder;
use csv::Trim;
use wordcards_core::ErrorReport;
use wordcards_core::Fallible;
use wordcards_core::Group;
use wordcards_core::GroupId;
use wordcards_core::NewItem;
use wordcards_core::Timestamp;
use wordcards_core::fail;
use wordcards_core::groups::list_groups;
use wordcards_core::groups::resolve_group;
use wordcards_core::vocabulary::add_items_bulk;

use crate::collection::Collection;
use crate::utils::new_rng;

const HEADER_KEYWORDS: [&str; 6] = ["text", "word", "pronunciation", "pinyin", "meaning", "example"];

fn csv_error(e: csv::Error) -> ErrorReport {
    ErrorReport::new(format!("word list error: {e}"))
}

fn is_header(fields: &[String]) -> bool {
    fields.iter().any(|field| {
        let field = field.to_lowercase();
        HEADER_KEYWORDS.iter().any(|keyword| field.contains(keyword))
    })
}

/// Rows read from a word list. Rows with fewer than three columns are
/// counted in `short_rows`.
#[derive(Debug, Default, PartialEq)]
pub struct WordList {
    pub entries: Vec<NewItem>,
    pub short_rows: usize,
}

pub fn parse_word_list<R: Read>(reader: R, delimiter: u8) -> Fallible<WordList> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_reader(reader);
    let mut list = WordList::default();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        if index == 0 && is_header(&fields) {
            continue;
        }
        let [text, pronunciation, meaning, rest @ ..] = fields.as_slice() else {
            list.short_rows += 1;
            continue;
        };
        list.entries.push(NewItem {
            text: text.clone(),
            pronunciation: pronunciation.clone(),
            meaning: meaning.clone(),
            example: rest.first().cloned(),
            group_id: None,
        });
    }
    Ok(list)
}

pub fn import_words(
    directory: Option<String>,
    file: String,
    group: Option<String>,
    delimiter: char,
) -> Fallible<()> {
    if !delimiter.is_ascii() {
        return fail("the delimiter must be an ASCII character");
    }
    let mut collection = Collection::new(directory)?;
    let list = parse_word_list(File::open(&file)?, delimiter as u8)?;
    let now = Timestamp::now();
    let groups = list_groups(&mut collection.db, now)?;
    let requested = group.map(GroupId::new).unwrap_or_else(GroupId::default_group);
    let target = resolve_group(&groups, &requested)
        .cloned()
        .unwrap_or_else(|| Group::default_group(now));
    if target.id != requested {
        log::warn!("No group with id '{requested}', using the default group");
    }
    let mut rng = new_rng();
    let report = add_items_bulk(&mut collection.db, list.entries, &target.id, now, &mut rng)?;
    let skipped = report.skipped + list.short_rows;
    log::info!("Imported {} words from {file} into {}", report.added, target.id);
    println!(
        "Added {} words to '{}', skipped {skipped} incomplete rows.",
        report.added, target.name
    );
    Ok(())
}
