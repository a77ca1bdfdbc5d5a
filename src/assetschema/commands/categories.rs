//! Category tree mutations and path lookup.
//!
//! `children` lists are kept in step with `parent_id` by these commands only;
//! nothing re-derives them. Deleting a category leaves its children in place
//! with a `parent_id` that no longer resolves, which every walk treats as
//! "no further ancestors".

use crate::commands::helpers::apply;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SchemaError};
use crate::ids;
use crate::model::Category;
use crate::store::{DataStore, SchemaState};
use tracing::{debug, warn};

pub fn add<S: DataStore>(store: &mut S, name: &str, parent_id: Option<&str>) -> Result<CmdResult> {
    let id = ids::category_id();
    let name = name.to_string();

    apply(store, |state| {
        if let Some(parent_id) = parent_id {
            match state.category_mut(parent_id) {
                Some(parent) => parent.children.push(id.clone()),
                None => warn!(parent = parent_id, "new category links to unknown parent"),
            }
        }
        state
            .categories
            .push(Category::new(id.clone(), name.clone(), parent_id.map(str::to_string)));
        Ok(())
    })?;

    debug!(category = %id, "category added");
    Ok(CmdResult::default()
        .with_affected(id)
        .with_message(CmdMessage::success(format!("Category created: {}", name))))
}

pub fn edit<S: DataStore>(store: &mut S, id: &str, name: &str) -> Result<CmdResult> {
    apply(store, |state| {
        state.require_category_mut(id)?.name = name.to_string();
        Ok(())
    })?;

    debug!(category = id, "category renamed");
    Ok(CmdResult::default()
        .with_affected(id)
        .with_message(CmdMessage::success(format!("Category renamed: {}", name))))
}

pub fn delete<S: DataStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    let removed = apply(store, |state| {
        let position = state
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| SchemaError::CategoryNotFound(id.to_string()))?;
        let removed = state.categories.remove(position);

        if let Some(parent) = removed
            .parent_id
            .as_deref()
            .and_then(|parent_id| state.category_mut(parent_id))
        {
            parent.children.retain(|child| child != id);
        }
        state.custom_catalog.remove(id);
        Ok(removed)
    })?;

    let mut result = CmdResult::default()
        .with_affected(id)
        .with_message(CmdMessage::success(format!(
            "Category deleted: {}",
            removed.name
        )));
    if !removed.children.is_empty() {
        warn!(category = id, children = removed.children.len(), "deleted category had children");
        result.add_message(CmdMessage::warning(format!(
            "{} child categories now have no parent",
            removed.children.len()
        )));
    }
    debug!(category = id, "category deleted");
    Ok(result)
}

/// Root-to-leaf path ending at `id`. Unknown ids give an empty path.
pub fn path(state: &SchemaState, id: &str, max_depth: usize) -> Vec<Category> {
    let Some(leaf) = state.category(id) else {
        return Vec::new();
    };
    let mut path: Vec<Category> = state
        .ancestors(id, max_depth)
        .into_iter()
        .rev()
        .cloned()
        .collect();
    path.push(leaf.clone());
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attribute, AttributeType};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn names(path: &[Category]) -> Vec<&str> {
        path.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn add_links_child_to_parent() {
        let mut store = StoreFixture::new()
            .with_category("boiler", "Boiler", None)
            .store;

        let result = add(&mut store, "Combi Boiler", Some("boiler")).unwrap();
        let id = result.created_id().unwrap().to_string();

        assert!(id.starts_with("category-"));
        let state = store.state();
        assert!(state.category("boiler").unwrap().children.contains(&id));
        let created = state.category(&id).unwrap();
        assert_eq!(created.parent_id.as_deref(), Some("boiler"));
        assert!(created.system_attributes.is_empty());
        assert!(created.custom_attributes.is_empty());
    }

    #[test]
    fn add_with_unknown_parent_still_creates_node() {
        let mut store = InMemoryStore::new();
        let result = add(&mut store, "Stray", Some("nowhere")).unwrap();
        let id = result.created_id().unwrap();

        let created = store.state().category(id).unwrap();
        assert_eq!(created.parent_id.as_deref(), Some("nowhere"));
        assert_eq!(path(store.state(), id, 64).len(), 1);
    }

    #[test]
    fn add_root() {
        let mut store = InMemoryStore::new();
        let result = add(&mut store, "Plant", None).unwrap();
        assert!(store
            .state()
            .category(result.created_id().unwrap())
            .unwrap()
            .is_root());
    }

    #[test]
    fn edit_renames() {
        let mut store = StoreFixture::new().with_category("boiler", "Boiler", None).store;
        edit(&mut store, "boiler", "Boilers").unwrap();
        assert_eq!(store.state().category("boiler").unwrap().name, "Boilers");
    }

    #[test]
    fn edit_unknown_is_not_found() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            edit(&mut store, "ghost", "Name"),
            Err(SchemaError::CategoryNotFound(id)) if id == "ghost"
        ));
    }

    #[test]
    fn delete_unlinks_parent_and_drops_custom_pool() {
        let mut store = StoreFixture::new()
            .with_category("plant", "Plant", None)
            .with_category("boiler", "Boiler", Some("plant"))
            .with_custom_attribute(
                "boiler",
                Attribute::new("custom-1", "Flue", AttributeType::Text),
                true,
                0,
            )
            .store;

        delete(&mut store, "boiler").unwrap();

        let state = store.state();
        assert!(state.category("boiler").is_none());
        assert!(state.category("plant").unwrap().children.is_empty());
        assert!(!state.custom_catalog.contains_key("boiler"));
    }

    #[test]
    fn delete_leaves_children_dangling() {
        let mut store = StoreFixture::new()
            .with_category("plant", "Plant", None)
            .with_category("boiler", "Boiler", Some("plant"))
            .with_category("combi", "Combi", Some("boiler"))
            .store;

        let result = delete(&mut store, "boiler").unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == crate::commands::MessageLevel::Warning));

        let state = store.state();
        let combi = state.category("combi").unwrap();
        assert_eq!(combi.parent_id.as_deref(), Some("boiler"));
        assert_eq!(names(&path(state, "combi", 64)), vec!["Combi"]);
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let mut store = StoreFixture::new().with_category("plant", "Plant", None).store;
        assert!(delete(&mut store, "ghost").unwrap_err().is_not_found());
        assert_eq!(store.state().categories.len(), 1);
    }

    #[test]
    fn path_is_root_to_leaf() {
        let store = StoreFixture::new()
            .with_category("plant", "Plant", None)
            .with_category("boiler", "Boiler", Some("plant"))
            .with_category("combi", "Combi", Some("boiler"))
            .store;

        assert_eq!(
            names(&path(store.state(), "combi", 64)),
            vec!["Plant", "Boiler", "Combi"]
        );
        assert!(path(store.state(), "ghost", 64).is_empty());
    }

    #[test]
    fn path_terminates_on_cycle() {
        let mut store = StoreFixture::new()
            .with_category("a", "A", None)
            .with_category("b", "B", Some("a"))
            .store;
        let mut next = store.state().clone();
        next.category_mut("a").unwrap().parent_id = Some("b".into());
        store.commit(next).unwrap();

        assert_eq!(names(&path(store.state(), "b", 64)), vec!["A", "B"]);
    }
}
