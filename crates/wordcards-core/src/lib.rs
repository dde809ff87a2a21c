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

//! wordcards-core: Core library for the wordcards vocabulary trainer.
//!
//! This library provides storage-agnostic types and algorithms for:
//! - SM-2 review scheduling
//! - Selecting due and upcoming items
//! - Item and group lifecycle over a whole-collection store
//! - Review sessions, multiple-choice quizzes and learning statistics

pub mod due;
pub mod error;
pub mod groups;
pub mod quiz;
pub mod rng;
pub mod session;
pub mod sm2;
pub mod stats;
pub mod store;
pub mod types;
pub mod vocabulary;

// Re-exports for convenience
pub use due::GroupFilter;
pub use error::{ErrorReport, Fallible, GroupError, ItemError, fail};
pub use session::ReviewSession;
pub use sm2::{Outcome, Quality, compute_next_schedule};
pub use store::{MemoryStore, Store};
pub use types::date::Date;
pub use types::group::{Group, GroupId};
pub use types::item::{Item, ItemId, NewItem};
pub use types::timestamp::Timestamp;
pub use vocabulary::record_outcome;
