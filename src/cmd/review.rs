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

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use wordcards_core::Fallible;
use wordcards_core::GroupFilter;
use wordcards_core::Item;
use wordcards_core::Outcome;
use wordcards_core::ReviewSession;
use wordcards_core::Store;
use wordcards_core::Timestamp;
use wordcards_core::due::NextReview;
use wordcards_core::session::SessionOptions;
use wordcards_core::vocabulary::get_item;

use crate::collection::Collection;
use crate::utils::time_seed;

enum Answer {
    Outcome(Outcome),
    Skip,
    Quit,
}

/// Reads one trimmed, lowercased line. `None` on end of input.
fn read_answer<R: BufRead>(input: &mut R) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Fallible<Answer> {
    loop {
        write!(output, "Did you know it? [y/n/s/q] ")?;
        output.flush()?;
        let Some(line) = read_answer(input)? else {
            return Ok(Answer::Quit);
        };
        match line.as_str() {
            "y" | "yes" => return Ok(Answer::Outcome(Outcome::Pass)),
            "n" | "no" => return Ok(Answer::Outcome(Outcome::Fail)),
            "s" | "skip" => return Ok(Answer::Skip),
            "q" | "quit" => return Ok(Answer::Quit),
            _ => writeln!(output, "Please answer y, n, s or q.")?,
        }
    }
}

fn reveal<W: Write>(output: &mut W, item: &Item) -> Fallible<()> {
    writeln!(output, "  {}", item.pronunciation)?;
    writeln!(output, "  {}", item.meaning)?;
    if let Some(example) = &item.example {
        writeln!(output, "  e.g. {example}")?;
    }
    Ok(())
}

/// Runs a review session against `store` until the queue is exhausted or
/// the user quits.
pub fn review_loop<S, R, W, C>(
    store: &mut S,
    session: &mut ReviewSession,
    input: &mut R,
    output: &mut W,
    clock: C,
) -> Fallible<()>
where
    S: Store,
    R: BufRead,
    W: Write,
    C: Fn() -> Timestamp,
{
    while let Some(id) = session.current().cloned() {
        let Some(item) = get_item(store, &id)? else {
            log::debug!("Item {id} vanished during the session");
            session.remove(&id);
            continue;
        };
        writeln!(output)?;
        writeln!(output, "[{}/{}] {}", session.position(), session.total(), item.text)?;
        write!(output, "Press Enter to reveal, q to quit. ")?;
        output.flush()?;
        match read_answer(input)?.as_deref() {
            None | Some("q") | Some("quit") => break,
            Some(_) => {}
        }
        reveal(output, &item)?;
        match ask(input, output)? {
            Answer::Outcome(outcome) => {
                let now = clock();
                if let Some(updated) = session.answer(store, outcome, now)? {
                    writeln!(
                        output,
                        "Next review {}.",
                        NextReview::describe(updated.next_review_at, now)
                    )?;
                }
            }
            Answer::Skip => session.skip(),
            Answer::Quit => break,
        }
    }
    let reviewed = session.correct() + session.incorrect();
    if session.total() == 0 {
        writeln!(output, "Nothing to review.")?;
    } else {
        writeln!(
            output,
            "Reviewed {reviewed}: {} correct, {} incorrect, {} remaining.",
            session.correct(),
            session.incorrect(),
            session.remaining()
        )?;
    }
    Ok(())
}

pub fn run_review(
    directory: Option<String>,
    group: Option<String>,
    limit: Option<usize>,
    no_shuffle: bool,
) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let items = collection.db.load_items()?;
    let options = SessionOptions {
        limit: limit.or(collection.config.session_limit),
        shuffle_seed: (collection.config.shuffle && !no_shuffle).then(time_seed),
    };
    let filter = GroupFilter::from(group.as_deref());
    let mut session = ReviewSession::start(&items, filter, options, Timestamp::now());
    log::debug!("Starting review of {} items", session.total());
    review_loop(
        &mut collection.db,
        &mut session,
        &mut stdin().lock(),
        &mut stdout(),
        Timestamp::now,
    )
}
