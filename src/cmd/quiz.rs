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
use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use clap::ValueEnum;
use wordcards_core::Fallible;
use wordcards_core::GroupFilter;
use wordcards_core::Item;
use wordcards_core::Outcome;
use wordcards_core::Store;
use wordcards_core::Timestamp;
use wordcards_core::quiz::OPTIONS_COUNT;
use wordcards_core::quiz::quiz_options;
use wordcards_core::quiz::quiz_questions;
use wordcards_core::record_outcome;
use wordcards_core::rng::TinyRng;

use crate::collection::Collection;
use crate::utils::new_rng;

const LETTERS: [char; OPTIONS_COUNT] = ['a', 'b', 'c', 'd'];

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum QuizMode {
    /// Show the word, choose its meaning.
    Meaning,
    /// Show the meaning, choose the word.
    Text,
}

impl QuizMode {
    fn prompt(self, item: &Item) -> &str {
        match self {
            QuizMode::Meaning => &item.text,
            QuizMode::Text => &item.meaning,
        }
    }

    fn choice(self, item: &Item) -> &str {
        match self {
            QuizMode::Meaning => &item.meaning,
            QuizMode::Text => &item.text,
        }
    }
}

impl Display for QuizMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizMode::Meaning => write!(f, "meaning"),
            QuizMode::Text => write!(f, "text"),
        }
    }
}

/// Reads a choice until it names one of `options`. `None` means quit.
fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    options: usize,
) -> Fallible<Option<usize>> {
    loop {
        write!(output, "Your answer: ")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim().to_lowercase();
        if line == "q" || line == "quit" {
            return Ok(None);
        }
        let mut chars = line.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(index) = LETTERS[..options].iter().position(|l| *l == c) {
                return Ok(Some(index));
            }
        }
        writeln!(output, "Please answer with a letter, or q to quit.")?;
    }
}

/// Runs a multiple-choice quiz over `items`, recording every answer in
/// `store`. Returns the number of correct answers.
#[allow(clippy::too_many_arguments)]
pub fn quiz_loop<S, R, W, C>(
    store: &mut S,
    items: &[Item],
    filter: &GroupFilter,
    mode: QuizMode,
    count: usize,
    rng: &mut TinyRng,
    input: &mut R,
    output: &mut W,
    clock: C,
) -> Fallible<usize>
where
    S: Store,
    R: BufRead,
    W: Write,
    C: Fn() -> Timestamp,
{
    let questions = quiz_questions(items, filter, count, rng);
    if questions.is_empty() {
        writeln!(output, "A quiz needs at least {OPTIONS_COUNT} items in the group.")?;
        return Ok(0);
    }
    let mut score = 0;
    let mut answered = 0;
    for (n, question) in questions.iter().copied().enumerate() {
        let options = quiz_options(items, question, filter, rng);
        writeln!(output)?;
        writeln!(output, "[{}/{}] {}", n + 1, questions.len(), mode.prompt(question))?;
        for (letter, option) in LETTERS.iter().zip(&options) {
            writeln!(output, "  {letter}. {}", mode.choice(option))?;
        }
        let Some(index) = read_choice(input, output, options.len())? else {
            break;
        };
        let correct = options[index].id == question.id;
        record_outcome(store, &question.id, Outcome::from_correct(correct), clock())?;
        answered += 1;
        if correct {
            score += 1;
            writeln!(output, "Correct!")?;
        } else {
            writeln!(output, "Wrong, the answer is: {}", mode.choice(question))?;
        }
    }
    writeln!(output, "Score: {score}/{answered}")?;
    Ok(score)
}

pub fn run_quiz(
    directory: Option<String>,
    group: Option<String>,
    mode: QuizMode,
    count: usize,
) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let items = collection.db.load_items()?;
    let filter = GroupFilter::from(group.as_deref());
    let mut rng = new_rng();
    let score = quiz_loop(
        &mut collection.db,
        &items,
        &filter,
        mode,
        count,
        &mut rng,
        &mut stdin().lock(),
        &mut stdout(),
        Timestamp::now,
    )?;
    log::debug!("Quiz ({mode}) finished with {score} correct");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use wordcards_core::ItemId;
    use wordcards_core::MemoryStore;
    use wordcards_core::NewItem;

    use super::*;

    fn now() -> Timestamp {
        Timestamp::try_from("2024-06-01T10:00:00.000".to_string()).unwrap()
    }

    fn item(id: &str) -> Item {
        Item::new(
            ItemId::from(id),
            NewItem {
                text: format!("{id}-text"),
                pronunciation: format!("{id}-pron"),
                meaning: format!("{id}-meaning"),
                example: None,
                group_id: None,
            },
            now(),
        )
    }

    fn run(
        store: &mut MemoryStore,
        mode: QuizMode,
        count: usize,
        script: &str,
    ) -> Fallible<(usize, String)> {
        let items = store.load_items()?;
        let mut rng = TinyRng::from_seed(42);
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let score = quiz_loop(
            store,
            &items,
            &GroupFilter::All,
            mode,
            count,
            &mut rng,
            &mut input,
            &mut output,
            now,
        )?;
        Ok((score, String::from_utf8(output).unwrap()))
    }

    #[test]
    fn test_every_answer_is_recorded() -> Fallible<()> {
        let mut store = MemoryStore::with_items(vec![item("a"), item("b"), item("c"), item("d")]);
        let (score, output) = run(&mut store, QuizMode::Meaning, 10, "a\nzz\nb\nc\nd\n")?;
        assert!(output.contains("Please answer with a letter, or q to quit."));
        assert!(output.contains(&format!("Score: {score}/4")));
        let items = store.load_items()?;
        for item in &items {
            assert_eq!(item.correct_count + item.wrong_count, 1);
            assert_eq!(item.last_review_at, Some(now()));
        }
        let correct: u32 = items.iter().map(|i| i.correct_count).sum();
        assert_eq!(correct as usize, score);
        Ok(())
    }

    #[test]
    fn test_text_mode_shows_meaning_and_lists_words() -> Fallible<()> {
        let mut store = MemoryStore::with_items(vec![item("a"), item("b"), item("c"), item("d")]);
        let (_, output) = run(&mut store, QuizMode::Text, 1, "q\n")?;
        assert!(output.contains("[1/1] "));
        assert!(output.contains("-meaning\n"));
        for id in ["a", "b", "c", "d"] {
            assert!(output.contains(&format!(". {id}-text\n")));
        }
        assert!(output.contains("Score: 0/0"));
        assert!(store.load_items()?.iter().all(Item::is_new));
        Ok(())
    }

    #[test]
    fn test_too_few_items() -> Fallible<()> {
        let mut store = MemoryStore::with_items(vec![item("a"), item("b")]);
        let (score, output) = run(&mut store, QuizMode::Meaning, 10, "a\n")?;
        assert_eq!(score, 0);
        assert!(output.contains("A quiz needs at least 4 items in the group."));
        Ok(())
    }
}
