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

//! Group lifecycle.
//!
//! The default group always exists, cannot be edited or deleted, and
//! receives the items of any group that is deleted.

use crate::error::Fallible;
use crate::error::GroupError;
use crate::rng::TinyRng;
use crate::rng::generate_id;
use crate::store::Store;
use crate::types::group::GROUP_COLORS;
use crate::types::group::Group;
use crate::types::group::GroupId;
use crate::types::item::Item;
use crate::types::timestamp::Timestamp;

/// User input for creating or editing a group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupDraft {
    pub name: String,
    pub description: String,
    /// `None` picks a palette color on create and keeps the current color on update.
    pub color: Option<String>,
}

impl GroupDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Inserts the default group at the front if it is missing. Returns whether
/// it was inserted.
pub fn ensure_default_group(groups: &mut Vec<Group>, now: Timestamp) -> bool {
    if groups.iter().any(|g| g.id.is_default()) {
        return false;
    }
    groups.insert(0, Group::default_group(now));
    true
}

/// All groups, default first if it had to be created. Creating it is persisted.
pub fn list_groups<S: Store>(store: &mut S, now: Timestamp) -> Fallible<Vec<Group>> {
    let mut groups = store.load_groups()?;
    if ensure_default_group(&mut groups, now) {
        store.save_groups(&groups)?;
    }
    Ok(groups)
}

/// Looks a group up by id, falling back to the default group.
pub fn resolve_group<'a>(groups: &'a [Group], id: &GroupId) -> Option<&'a Group> {
    groups
        .iter()
        .find(|g| &g.id == id)
        .or_else(|| groups.iter().find(|g| g.id.is_default()))
}

fn validate_name(
    groups: &[Group],
    name: &str,
    except: Option<&GroupId>,
) -> Result<String, GroupError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GroupError::EmptyName);
    }
    let taken = groups
        .iter()
        .filter(|g| Some(&g.id) != except)
        .any(|g| g.has_name(name));
    if taken {
        return Err(GroupError::DuplicateName(name.to_string()));
    }
    Ok(name.to_string())
}

pub fn create_group<S: Store>(
    store: &mut S,
    draft: GroupDraft,
    now: Timestamp,
    rng: &mut TinyRng,
) -> Result<Group, GroupError> {
    let mut groups = store.load_groups()?;
    ensure_default_group(&mut groups, now);
    let name = validate_name(&groups, &draft.name, None)?;
    let color = draft.color.unwrap_or_else(|| {
        let index = rng.generate(GROUP_COLORS.len() as u32) as usize;
        GROUP_COLORS[index].to_string()
    });
    let group = Group {
        id: GroupId::new(generate_id(now, rng)),
        name,
        description: draft.description.trim().to_string(),
        color,
        created_at: now,
    };
    groups.push(group.clone());
    store.save_groups(&groups)?;
    Ok(group)
}

/// Renames, redescribes or recolors a group. The id never changes.
pub fn update_group<S: Store>(
    store: &mut S,
    id: &GroupId,
    draft: GroupDraft,
) -> Result<Group, GroupError> {
    if id.is_default() {
        return Err(GroupError::DefaultGroupProtected);
    }
    let mut groups = store.load_groups()?;
    let Some(index) = groups.iter().position(|g| &g.id == id) else {
        return Err(GroupError::NotFound(id.clone()));
    };
    let name = validate_name(&groups, &draft.name, Some(id))?;
    let group = &mut groups[index];
    group.name = name;
    group.description = draft.description.trim().to_string();
    if let Some(color) = draft.color {
        group.color = color;
    }
    let updated = group.clone();
    store.save_groups(&groups)?;
    Ok(updated)
}

/// Deletes a group, moving its items to the default group first.
///
/// Items are saved before the group record is removed. If the second write
/// fails the group is still listed and calling this again finishes the job.
/// Returns the number of items that were moved.
pub fn delete_group<S: Store>(store: &mut S, id: &GroupId) -> Result<usize, GroupError> {
    if id.is_default() {
        return Err(GroupError::DefaultGroupProtected);
    }
    let mut groups = store.load_groups()?;
    if !groups.iter().any(|g| &g.id == id) {
        return Err(GroupError::NotFound(id.clone()));
    }
    let mut items = store.load_items()?;
    let mut moved = 0;
    for item in items.iter_mut().filter(|item| item.belongs_to(id)) {
        item.group_id = Some(GroupId::default_group());
        moved += 1;
    }
    if moved > 0 {
        store.save_items(&items)?;
    }
    groups.retain(|g| &g.id != id);
    store.save_groups(&groups)?;
    Ok(moved)
}

/// Points items whose group does not exist at the default group. Returns how
/// many items changed.
pub fn repair_group_references(items: &mut [Item], groups: &[Group]) -> usize {
    let mut repaired = 0;
    for item in items.iter_mut() {
        let known = item.group_id.is_none()
            || item.group_id.as_ref().is_some_and(GroupId::is_default)
            || groups.iter().any(|g| item.belongs_to(&g.id));
        if !known {
            item.group_id = Some(GroupId::default_group());
            repaired += 1;
        }
    }
    repaired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorReport;
    use crate::error::fail;
    use crate::store::MemoryStore;
    use crate::types::group::DEFAULT_GROUP_ID;
    use crate::types::item::ItemId;
    use crate::types::item::NewItem;

    fn now() -> Timestamp {
        Timestamp::try_from("2024-06-01T10:00:00.000".to_string()).unwrap()
    }

    fn item(id: &str, group: &GroupId) -> Item {
        Item::new(
            ItemId::from(id),
            NewItem {
                text: id.to_string(),
                pronunciation: id.to_string(),
                meaning: id.to_string(),
                example: None,
                group_id: Some(group.clone()),
            },
            now(),
        )
    }

    #[test]
    fn test_list_creates_default_once() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let groups = list_groups(&mut store, now())?;
        assert_eq!(groups.len(), 1);
        assert!(groups[0].id.is_default());
        assert_eq!(store.load_groups()?.len(), 1);
        assert_eq!(list_groups(&mut store, now())?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_create_trims_and_assigns_id() -> Result<(), GroupError> {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(1);
        let draft = GroupDraft {
            name: "  HSK 1 ".to_string(),
            description: " basics ".to_string(),
            color: None,
        };
        let group = create_group(&mut store, draft, now(), &mut rng)?;
        assert_eq!(group.name, "HSK 1");
        assert_eq!(group.description, "basics");
        assert!(GROUP_COLORS.contains(&group.color.as_str()));
        assert!(!group.id.is_default());
        assert_eq!(group.created_at, now());
        let stored = store.load_groups()?;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1], group);
        Ok(())
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(1);
        let result = create_group(&mut store, GroupDraft::named("   "), now(), &mut rng);
        assert_eq!(result, Err(GroupError::EmptyName));
        assert!(store.load_groups().unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_duplicate_ignoring_case() -> Result<(), GroupError> {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(1);
        create_group(&mut store, GroupDraft::named("Food"), now(), &mut rng)?;
        let result = create_group(&mut store, GroupDraft::named("fOOd"), now(), &mut rng);
        assert_eq!(result, Err(GroupError::DuplicateName("fOOd".to_string())));
        assert_eq!(store.load_groups()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_update_keeps_id_and_color() -> Result<(), GroupError> {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(1);
        let draft = GroupDraft {
            name: "Food".to_string(),
            description: String::new(),
            color: Some("#22c55e".to_string()),
        };
        let group = create_group(&mut store, draft, now(), &mut rng)?;
        let updated = update_group(&mut store, &group.id, GroupDraft::named("FOOD"))?;
        assert_eq!(updated.id, group.id);
        assert_eq!(updated.name, "FOOD");
        assert_eq!(updated.color, "#22c55e");
        Ok(())
    }

    #[test]
    fn test_update_rejects_name_of_other_group() -> Result<(), GroupError> {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(1);
        create_group(&mut store, GroupDraft::named("Food"), now(), &mut rng)?;
        let travel = create_group(&mut store, GroupDraft::named("Travel"), now(), &mut rng)?;
        let result = update_group(&mut store, &travel.id, GroupDraft::named("food"));
        assert_eq!(result, Err(GroupError::DuplicateName("food".to_string())));
        Ok(())
    }

    #[test]
    fn test_default_group_is_protected() {
        let mut store = MemoryStore::new();
        let default = GroupId::default_group();
        assert_eq!(
            update_group(&mut store, &default, GroupDraft::named("Mine")),
            Err(GroupError::DefaultGroupProtected)
        );
        assert_eq!(
            delete_group(&mut store, &default),
            Err(GroupError::DefaultGroupProtected)
        );
    }

    #[test]
    fn test_update_unknown_group() {
        let mut store = MemoryStore::new();
        let id = GroupId::from("ghost");
        assert_eq!(
            update_group(&mut store, &id, GroupDraft::named("Ghost")),
            Err(GroupError::NotFound(id.clone()))
        );
        assert_eq!(
            update_group(&mut store, &id, GroupDraft::default()),
            Err(GroupError::NotFound(id))
        );
    }

    #[test]
    fn test_delete_cascades_to_default() -> Result<(), GroupError> {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(1);
        let g = create_group(&mut store, GroupDraft::named("Food"), now(), &mut rng)?;
        let other = GroupId::from("other");
        store.save_items(&[item("a", &g.id), item("b", &g.id), item("x", &other), item("c", &g.id)])?;

        let moved = delete_group(&mut store, &g.id)?;
        assert_eq!(moved, 3);

        let items = store.load_items()?;
        assert_eq!(items.len(), 4);
        for id in ["a", "b", "c"] {
            let it = items.iter().find(|i| i.id.as_str() == id).unwrap();
            assert_eq!(it.group_key(), DEFAULT_GROUP_ID);
        }
        assert_eq!(items[2].group_key(), "other");
        assert!(!store.load_groups()?.iter().any(|grp| grp.id == g.id));
        Ok(())
    }

    /// Fails the first group save after being armed.
    struct FlakyStore {
        inner: MemoryStore,
        fail_group_save: bool,
    }

    impl Store for FlakyStore {
        fn load_items(&self) -> Fallible<Vec<Item>> {
            self.inner.load_items()
        }

        fn save_items(&mut self, items: &[Item]) -> Fallible<()> {
            self.inner.save_items(items)
        }

        fn load_groups(&self) -> Fallible<Vec<Group>> {
            self.inner.load_groups()
        }

        fn save_groups(&mut self, groups: &[Group]) -> Fallible<()> {
            if self.fail_group_save {
                self.fail_group_save = false;
                return fail("disk full");
            }
            self.inner.save_groups(groups)
        }
    }

    #[test]
    fn test_delete_can_be_retried_after_partial_failure() -> Result<(), GroupError> {
        let mut store = FlakyStore {
            inner: MemoryStore::new(),
            fail_group_save: false,
        };
        let mut rng = TinyRng::from_seed(1);
        let g = create_group(&mut store, GroupDraft::named("Food"), now(), &mut rng)?;
        store.save_items(&[item("a", &g.id), item("b", &g.id)])?;

        store.fail_group_save = true;
        let result = delete_group(&mut store, &g.id);
        assert_eq!(
            result,
            Err(GroupError::Storage(ErrorReport::new("disk full")))
        );
        // Items already moved, group still listed.
        assert!(store.load_items()?.iter().all(|i| i.group_key() == DEFAULT_GROUP_ID));
        assert!(store.load_groups()?.iter().any(|grp| grp.id == g.id));

        assert_eq!(delete_group(&mut store, &g.id)?, 0);
        assert!(!store.load_groups()?.iter().any(|grp| grp.id == g.id));
        Ok(())
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let groups = vec![Group::default_group(now())];
        let found = resolve_group(&groups, &GroupId::from("missing"));
        assert!(found.is_some_and(|g| g.id.is_default()));
        assert!(resolve_group(&[], &GroupId::from("missing")).is_none());
    }

    #[test]
    fn test_repair_group_references() {
        let groups = vec![Group::default_group(now())];
        let mut items = vec![
            item("a", &GroupId::from("gone")),
            item("b", &GroupId::default_group()),
        ];
        items.push(Item {
            group_id: None,
            ..item("c", &GroupId::default_group())
        });
        assert_eq!(repair_group_references(&mut items, &groups), 1);
        assert_eq!(items[0].group_key(), DEFAULT_GROUP_ID);
        assert!(items[2].group_id.is_none());
    }
}
