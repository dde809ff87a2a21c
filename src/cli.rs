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

use clap::Parser;
use clap::Subcommand;
use wordcards_core::Fallible;

use crate::cmd::backup::ImportMode;
use crate::cmd::backup::export_collection;
use crate::cmd::backup::import_collection;
use crate::cmd::due::print_due;
use crate::cmd::due::print_upcoming;
use crate::cmd::groups;
use crate::cmd::items;
use crate::cmd::items::ItemFields;
use crate::cmd::quiz::QuizMode;
use crate::cmd::quiz::run_quiz;
use crate::cmd::review::run_review;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::cmd::words::import_words;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Add a vocabulary item.
    Add {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Edit the content of an item. Scheduling state is kept.
    Edit {
        /// The item id.
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Delete an item.
    Delete {
        /// The item id.
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// List items.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Only list items in this group. Use "all" for every group.
        #[arg(long)]
        group: Option<String>,
        /// Only list items whose text, pronunciation or meaning contains this.
        #[arg(long)]
        search: Option<String>,
    },
    /// List the items due today.
    Due {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Only list items in this group.
        #[arg(long)]
        group: Option<String>,
    },
    /// List items scheduled in the coming days.
    Upcoming {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// How many days ahead to look. Defaults to the collection config.
        #[arg(long)]
        days: Option<i64>,
    },
    /// Review due items in the terminal.
    Review {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Only review items in this group.
        #[arg(long)]
        group: Option<String>,
        /// Maximum number of items to review.
        #[arg(long)]
        limit: Option<usize>,
        /// Review items in collection order.
        #[arg(long)]
        no_shuffle: bool,
    },
    /// Take a multiple-choice quiz. Answers count as reviews.
    Quiz {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Only ask about items in this group.
        #[arg(long)]
        group: Option<String>,
        /// What to show and what to choose.
        #[arg(long, default_value_t = QuizMode::Meaning)]
        mode: QuizMode,
        /// Number of questions.
        #[arg(long, default_value_t = 10)]
        questions: usize,
    },
    /// Add the words in a CSV word list: text, pronunciation, meaning and an optional example.
    ImportWords {
        /// Path to the word list.
        file: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Group to add the words to. By default, the default group is used.
        #[arg(long)]
        group: Option<String>,
        /// Column delimiter.
        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },
    /// Commands relating to groups.
    Groups {
        #[command(subcommand)]
        command: GroupCommand,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Export the collection as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Import a JSON backup.
    Import {
        /// Path to the backup file.
        file: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Whether to replace the collection or merge into it.
        #[arg(long, default_value_t = ImportMode::Merge)]
        mode: ImportMode,
    },
}

#[derive(Subcommand)]
enum GroupCommand {
    /// List groups with their progress.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Create a group.
    Create {
        name: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Display color. By default, one is picked from the palette.
        #[arg(long)]
        color: Option<String>,
    },
    /// Rename or recolor a group.
    Update {
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a group, moving its items to the default group.
    Delete {
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Add { directory, fields } => items::add(directory, fields),
        Command::Edit {
            id,
            directory,
            fields,
        } => items::edit(directory, id, fields),
        Command::Delete { id, directory } => items::delete(directory, id),
        Command::List {
            directory,
            group,
            search,
        } => items::list(directory, group, search),
        Command::Due { directory, group } => print_due(directory, group),
        Command::Upcoming { directory, days } => print_upcoming(directory, days),
        Command::Review {
            directory,
            group,
            limit,
            no_shuffle,
        } => run_review(directory, group, limit, no_shuffle),
        Command::Quiz {
            directory,
            group,
            mode,
            questions,
        } => run_quiz(directory, group, mode, questions),
        Command::ImportWords {
            file,
            directory,
            group,
            delimiter,
        } => import_words(directory, file, group, delimiter),
        Command::Groups { command } => match command {
            GroupCommand::List { directory } => groups::list(directory),
            GroupCommand::Create {
                name,
                directory,
                description,
                color,
            } => groups::create(directory, name, description, color),
            GroupCommand::Update {
                id,
                directory,
                name,
                description,
                color,
            } => groups::update(directory, id, name, description, color),
            GroupCommand::Delete { id, directory } => groups::delete(directory, id),
        },
        Command::Stats { directory, format } => print_stats(directory, format),
        Command::Export { directory, output } => export_collection(directory, output),
        Command::Import {
            file,
            directory,
            mode,
        } => import_collection(directory, file, mode),
    }
}
