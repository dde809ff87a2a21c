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

//! Summaries for dashboards and the `stats` command.

use std::collections::HashSet;
use std::iter::successors;

use serde::Serialize;

use crate::due::GroupFilter;
use crate::due::by_group;
use crate::due::is_due;
use crate::due::upcoming;
use crate::types::date::Date;
use crate::types::group::Group;
use crate::types::item::Item;
use crate::types::timestamp::Timestamp;

/// Rounded percentage, 0 when the denominator is 0.
fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    }
}

fn accuracy<'a>(items: impl Iterator<Item = &'a Item>) -> u32 {
    let (correct, wrong) = items.fold((0usize, 0usize), |(c, w), item| {
        (c + item.correct_count as usize, w + item.wrong_count as usize)
    });
    percent(correct, correct + wrong)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub due_today: usize,
    /// `None` for group summaries.
    pub upcoming: Option<usize>,
    pub total: usize,
    pub learned: usize,
    /// Learned share of the total, in percent.
    pub mastery: u32,
}

pub fn review_summary(items: &[Item], as_of: Timestamp, horizon_days: i64) -> ReviewSummary {
    let learned = items.iter().filter(|i| i.learned).count();
    ReviewSummary {
        due_today: items.iter().filter(|i| is_due(i, as_of)).count(),
        upcoming: Some(upcoming(items, as_of, horizon_days).len()),
        total: items.len(),
        learned,
        mastery: percent(learned, items.len()),
    }
}

pub fn group_summary(items: &[Item], filter: &GroupFilter, as_of: Timestamp) -> ReviewSummary {
    let scoped = by_group(items, filter);
    let learned = scoped.iter().filter(|i| i.learned).count();
    ReviewSummary {
        due_today: scoped.iter().filter(|i| is_due(i, as_of)).count(),
        upcoming: None,
        total: scoped.len(),
        learned,
        mastery: percent(learned, scoped.len()),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub group: Group,
    pub total: usize,
    pub learned: usize,
    pub progress: u32,
    pub accuracy: u32,
    pub due_today: usize,
}

pub fn group_stats(items: &[Item], groups: &[Group], as_of: Timestamp) -> Vec<GroupStats> {
    groups
        .iter()
        .map(|group| {
            let scoped: Vec<&Item> = items.iter().filter(|i| i.belongs_to(&group.id)).collect();
            let learned = scoped.iter().filter(|i| i.learned).count();
            GroupStats {
                group: group.clone(),
                total: scoped.len(),
                learned,
                progress: percent(learned, scoped.len()),
                accuracy: accuracy(scoped.iter().copied()),
                due_today: scoped.iter().filter(|i| is_due(i, as_of)).count(),
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total: usize,
    pub learned: usize,
    pub due_today: usize,
    pub accuracy: u32,
    /// Never reviewed.
    pub new_items: usize,
    /// Reviewed at least once but not learned.
    pub learning: usize,
    pub mastered: usize,
    pub group_count: usize,
}

pub fn overall_stats(items: &[Item], groups: &[Group], as_of: Timestamp) -> OverallStats {
    let learned = items.iter().filter(|i| i.learned).count();
    OverallStats {
        total: items.len(),
        learned,
        due_today: items.iter().filter(|i| is_due(i, as_of)).count(),
        accuracy: accuracy(items.iter()),
        new_items: items.iter().filter(|i| i.is_new()).count(),
        learning: items.iter().filter(|i| !i.is_new() && !i.learned).count(),
        mastered: learned,
        group_count: groups.len(),
    }
}

/// Consecutive days, ending today, on which at least one item was last reviewed.
pub fn learning_streak(items: &[Item], today: Date) -> usize {
    let days: HashSet<Date> = items
        .iter()
        .filter_map(|i| i.last_review_at.map(Timestamp::date))
        .collect();
    let mut streak = 0;
    let mut day = Some(today);
    while let Some(d) = day {
        if !days.contains(&d) {
            break;
        }
        streak += 1;
        day = d.previous();
    }
    streak
}

/// Number of days covered by [`weekly_activity`] and [`review_calendar`].
pub const WEEK_DAYS: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayActivity {
    pub date: Date,
    /// Items whose last review fell on this day.
    pub reviewed: usize,
    /// Items created on this day.
    pub added: usize,
}

/// Review and creation counts for the week ending `today`, oldest day first.
pub fn weekly_activity(items: &[Item], today: Date) -> Vec<DayActivity> {
    let mut days: Vec<Date> = successors(Some(today), |d| d.previous())
        .take(WEEK_DAYS)
        .collect();
    days.reverse();
    days.into_iter()
        .map(|date| DayActivity {
            date,
            reviewed: items
                .iter()
                .filter(|i| i.last_review_at.map(Timestamp::date) == Some(date))
                .count(),
            added: items.iter().filter(|i| i.created_at.date() == date).count(),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: Date,
    pub due: usize,
    pub is_today: bool,
}

/// Items scheduled on each of the next seven days, starting today. Items
/// that were never reviewed count toward today; overdue items count toward
/// no day.
pub fn review_calendar(items: &[Item], today: Date) -> Vec<CalendarDay> {
    successors(Some(today), |d| d.next())
        .take(WEEK_DAYS)
        .map(|date| CalendarDay {
            date,
            due: items
                .iter()
                .filter(|i| match i.next_review_at {
                    Some(next) => next.date() == date,
                    None => date == today,
                })
                .count(),
            is_today: date == today,
        })
        .collect()
}
