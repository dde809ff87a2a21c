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

//! SM-2 scheduling.
//!
//! A passing review (quality 3 and above) grows the interval from 1 day to
//! 6 days and then by the ease factor; a failing review resets the streak and
//! schedules the item for tomorrow. The ease factor moves on every review,
//! including failures, and never drops below 1.3.

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::timestamp::Timestamp;

pub const INITIAL_EASE_FACTOR: f64 = 2.5;

pub const MIN_EASE_FACTOR: f64 = 1.3;

/// An item counts as learned once a correct review schedules it this many days out.
pub const LEARNED_INTERVAL: i64 = 21;

/// Longest interval the scheduler hands out, about a hundred years.
pub const MAX_INTERVAL: i64 = 36_500;

/// Recall quality on the classic 0-5 scale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Quality(u8);

impl Quality {
    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_pass(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<u8> for Quality {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 5 {
            return fail(format!("quality must be between 0 and 5, got {value}"));
        }
        Ok(Quality(value))
    }
}

/// What the learner did with an item. Every learning mode reports one of these.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct { Outcome::Pass } else { Outcome::Fail }
    }

    pub fn is_correct(self) -> bool {
        self == Outcome::Pass
    }

    pub fn quality(self) -> Quality {
        match self {
            Outcome::Pass => Quality(5),
            Outcome::Fail => Quality(1),
        }
    }
}

/// The part of an item the scheduler reads and rewrites.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SchedulingFields {
    pub interval: i64,
    pub ease_factor: f64,
    pub repetitions: i64,
}

impl Default for SchedulingFields {
    fn default() -> Self {
        Self {
            interval: 0,
            ease_factor: INITIAL_EASE_FACTOR,
            repetitions: 0,
        }
    }
}

impl SchedulingFields {
    /// Replaces out-of-range values: negative counts become zero, intervals
    /// are capped at [`MAX_INTERVAL`], a missing or non-positive ease factor
    /// becomes the initial one, and a positive ease factor below the floor is
    /// raised to the floor.
    pub fn normalized(self) -> Self {
        let ease_factor = if !self.ease_factor.is_finite() || self.ease_factor <= 0.0 {
            INITIAL_EASE_FACTOR
        } else {
            self.ease_factor.max(MIN_EASE_FACTOR)
        };
        Self {
            interval: self.interval.clamp(0, MAX_INTERVAL),
            ease_factor,
            repetitions: self.repetitions.max(0),
        }
    }
}

/// The result of scheduling one review.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Schedule {
    pub fields: SchedulingFields,
    pub last_review_at: Timestamp,
    pub next_review_at: Timestamp,
}

pub fn new_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let q = quality.value() as f64;
    let ef = ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
    ef.max(MIN_EASE_FACTOR)
}

/// Computes the next interval, ease factor and repetition count, and the
/// resulting review timestamps. The interval grows with the ease factor the
/// item had before this review.
pub fn compute_next_schedule(
    current: SchedulingFields,
    quality: Quality,
    now: Timestamp,
) -> Schedule {
    let SchedulingFields {
        interval,
        ease_factor,
        repetitions,
    } = current.normalized();
    let (interval, repetitions) = if quality.is_pass() {
        let interval = match repetitions {
            0 => 1,
            1 => 6,
            _ => ((interval as f64 * ease_factor).round() as i64).min(MAX_INTERVAL),
        };
        (interval, repetitions + 1)
    } else {
        (1, 0)
    };
    let ease_factor = new_ease_factor(ease_factor, quality);
    Schedule {
        fields: SchedulingFields {
            interval,
            ease_factor,
            repetitions,
        },
        last_review_at: now,
        next_review_at: now.plus_days(interval),
    }
}
