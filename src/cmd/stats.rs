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

use clap::ValueEnum;
use serde::Serialize;
use wordcards_core::Fallible;
use wordcards_core::Group;
use wordcards_core::Item;
use wordcards_core::Store;
use wordcards_core::Timestamp;
use wordcards_core::groups::list_groups;
use wordcards_core::stats::CalendarDay;
use wordcards_core::stats::DayActivity;
use wordcards_core::stats::GroupStats;
use wordcards_core::stats::OverallStats;
use wordcards_core::stats::ReviewSummary;
use wordcards_core::stats::group_stats;
use wordcards_core::stats::learning_streak;
use wordcards_core::stats::overall_stats;
use wordcards_core::stats::review_calendar;
use wordcards_core::stats::review_summary;
use wordcards_core::stats::weekly_activity;

use crate::collection::Collection;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    Text,
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    summary: ReviewSummary,
    overall: OverallStats,
    streak: usize,
    groups: Vec<GroupStats>,
    activity: Vec<DayActivity>,
    calendar: Vec<CalendarDay>,
}

fn compute(items: &[Item], groups: &[Group], now: Timestamp, horizon_days: i64) -> Stats {
    Stats {
        summary: review_summary(items, now, horizon_days),
        overall: overall_stats(items, groups, now),
        streak: learning_streak(items, now.date()),
        groups: group_stats(items, groups, now),
        activity: weekly_activity(items, now.date()),
        calendar: review_calendar(items, now.date()),
    }
}

fn render_text(stats: &Stats) -> String {
    let Stats {
        summary,
        overall,
        streak,
        groups,
        activity,
        calendar,
    } = stats;
    let mut out = String::new();
    out.push_str(&format!("Items:      {}\n", overall.total));
    out.push_str(&format!("Due today:  {}\n", summary.due_today));
    out.push_str(&format!("Upcoming:   {}\n", summary.upcoming.unwrap_or(0)));
    out.push_str(&format!(
        "Learned:    {} ({}%)\n",
        summary.learned, summary.mastery
    ));
    out.push_str(&format!(
        "New / learning / mastered: {} / {} / {}\n",
        overall.new_items, overall.learning, overall.mastered
    ));
    out.push_str(&format!("Accuracy:   {}%\n", overall.accuracy));
    out.push_str(&format!("Streak:     {streak} days\n"));
    for g in groups {
        out.push_str(&format!(
            "  {}: {} items, {}% learned, {}% accuracy, {} due\n",
            g.group.name, g.total, g.progress, g.accuracy, g.due_today
        ));
    }
    out.push_str("Last 7 days:\n");
    for day in activity {
        out.push_str(&format!(
            "  {} {}: {} reviewed, {} added\n",
            day.date.weekday_name(),
            day.date,
            day.reviewed,
            day.added
        ));
    }
    out.push_str("Next 7 days:\n");
    for day in calendar {
        let marker = if day.is_today { " (today)" } else { "" };
        out.push_str(&format!(
            "  {} {}: {} due{marker}\n",
            day.date.weekday_name(),
            day.date,
            day.due
        ));
    }
    out
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let now = Timestamp::now();
    let groups = list_groups(&mut collection.db, now)?;
    let items = collection.db.load_items()?;
    let stats = compute(&items, &groups, now, collection.config.upcoming_days);
    match format {
        StatsFormat::Text => print!("{}", render_text(&stats)),
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}
