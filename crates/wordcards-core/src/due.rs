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

//! Read-only queries that decide which items to present.
//!
//! Every query is a stable filter over the collection: output order is
//! input order.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::group::GroupId;
use crate::types::item::Item;
use crate::types::timestamp::Timestamp;

/// Default horizon for [`upcoming`], in days.
pub const UPCOMING_DAYS: i64 = 7;

/// Sentinel accepted wherever a group filter is parsed from text.
pub const ALL_GROUPS: &str = "all";

/// Restricts a query to one group, or to none.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GroupFilter {
    All,
    Group(GroupId),
}

impl GroupFilter {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Group(id) => item.belongs_to(id),
        }
    }
}

impl From<&str> for GroupFilter {
    fn from(value: &str) -> Self {
        if value == ALL_GROUPS {
            GroupFilter::All
        } else {
            GroupFilter::Group(GroupId::from(value))
        }
    }
}

impl From<Option<&str>> for GroupFilter {
    fn from(value: Option<&str>) -> Self {
        value.map(GroupFilter::from).unwrap_or(GroupFilter::All)
    }
}

impl Display for GroupFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupFilter::All => write!(f, "{ALL_GROUPS}"),
            GroupFilter::Group(id) => write!(f, "{id}"),
        }
    }
}

/// An item is due if it was never scheduled, or if its review falls on or
/// before the end of `as_of`'s day.
pub fn is_due(item: &Item, as_of: Timestamp) -> bool {
    match item.next_review_at {
        None => true,
        Some(next) => next <= as_of.end_of_day(),
    }
}

pub fn due_today(items: &[Item], as_of: Timestamp) -> Vec<&Item> {
    items.iter().filter(|item| is_due(item, as_of)).collect()
}

/// Scheduled items whose review lies after `as_of` and at most `horizon_days`
/// ahead. Never-reviewed items are excluded.
pub fn upcoming(items: &[Item], as_of: Timestamp, horizon_days: i64) -> Vec<&Item> {
    let horizon = as_of.plus_days(horizon_days);
    items
        .iter()
        .filter(|item| match item.next_review_at {
            Some(next) => next > as_of && next <= horizon,
            None => false,
        })
        .collect()
}

pub fn by_group<'a>(items: &'a [Item], filter: &GroupFilter) -> Vec<&'a Item> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

pub fn due_today_by_group<'a>(
    items: &'a [Item],
    filter: &GroupFilter,
    as_of: Timestamp,
) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| filter.matches(item) && is_due(item, as_of))
        .collect()
}

/// When an item comes up next, relative to now.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NextReview {
    NotStudied,
    DueNow,
    Tomorrow,
    InDays(i64),
    InWeeks(i64),
    InMonths(i64),
}

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

fn div_ceil(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b > 0 { q + 1 } else { q }
}

impl NextReview {
    /// Whole days are counted by rounding the remaining time up.
    pub fn describe(next_review_at: Option<Timestamp>, now: Timestamp) -> Self {
        let Some(next) = next_review_at else {
            return NextReview::NotStudied;
        };
        let days = div_ceil(next.millis() - now.millis(), MILLIS_PER_DAY);
        match days {
            d if d <= 0 => NextReview::DueNow,
            1 => NextReview::Tomorrow,
            d if d <= 7 => NextReview::InDays(d),
            d if d <= 30 => NextReview::InWeeks(div_ceil(d, 7)),
            d => NextReview::InMonths(div_ceil(d, 30)),
        }
    }
}

impl Display for NextReview {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NextReview::NotStudied => write!(f, "not studied"),
            NextReview::DueNow => write!(f, "due now"),
            NextReview::Tomorrow => write!(f, "tomorrow"),
            NextReview::InDays(n) => write!(f, "in {n} days"),
            NextReview::InWeeks(n) => write!(f, "in {n} weeks"),
            NextReview::InMonths(n) => write!(f, "in {n} months"),
        }
    }
}
