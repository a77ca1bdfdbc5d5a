use crate::commands::{CmdMessage, CmdResult};
use crate::model::AttributeOrigin;
use crate::store::SchemaState;
use std::collections::{BTreeMap, HashSet};

/// Structural problems found in a snapshot. Nothing is repaired.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Categories whose `parent_id` does not resolve
    pub orphaned: Vec<String>,
    /// `(parent, child)` where the parent lists a child id that does not resolve
    pub dangling_children: Vec<(String, String)>,
    /// `(parent, child)` where the child points at the parent but is not listed
    pub unlisted_children: Vec<(String, String)>,
    /// Categories whose ancestor chain loops back on itself
    pub in_cycle: Vec<String>,
    /// `(category, attribute, origin)` configs with no body in the pool
    pub missing_bodies: Vec<(String, String, AttributeOrigin)>,
    /// `(category, origin, order)` ranks used more than once in one list
    pub duplicate_orders: Vec<(String, AttributeOrigin, u32)>,
}

impl ConsistencyReport {
    pub fn is_clean(&self) -> bool {
        *self == ConsistencyReport::default()
    }
}

pub fn check(state: &SchemaState) -> ConsistencyReport {
    let mut report = ConsistencyReport::default();

    for category in &state.categories {
        if let Some(parent_id) = &category.parent_id {
            match state.category(parent_id) {
                Some(parent) if !parent.children.contains(&category.id) => report
                    .unlisted_children
                    .push((parent_id.clone(), category.id.clone())),
                Some(_) => {}
                None => report.orphaned.push(category.id.clone()),
            }
        }

        for child in &category.children {
            if state.category(child).is_none() {
                report
                    .dangling_children
                    .push((category.id.clone(), child.clone()));
            }
        }

        if loops_back(state, &category.id) {
            report.in_cycle.push(category.id.clone());
        }

        for origin in [AttributeOrigin::System, AttributeOrigin::Custom] {
            let mut seen: BTreeMap<u32, usize> = BTreeMap::new();
            for config in category.configs(origin) {
                if state
                    .resolve_attribute(&category.id, origin, &config.attribute_id)
                    .is_none()
                {
                    report.missing_bodies.push((
                        category.id.clone(),
                        config.attribute_id.clone(),
                        origin,
                    ));
                }
                *seen.entry(config.order).or_default() += 1;
            }
            report.duplicate_orders.extend(
                seen.into_iter()
                    .filter(|(_, count)| *count > 1)
                    .map(|(order, _)| (category.id.clone(), origin, order)),
            );
        }
    }

    report
}

/// True when following `parent_id` from `id` reaches `id` again.
fn loops_back(state: &SchemaState, id: &str) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut next = state.category(id).and_then(|c| c.parent_id.as_deref());
    while let Some(parent_id) = next {
        if parent_id == id {
            return true;
        }
        if !visited.insert(parent_id) {
            return false;
        }
        next = state.category(parent_id).and_then(|c| c.parent_id.as_deref());
    }
    false
}

pub fn run(state: &SchemaState) -> CmdResult {
    let report = check(state);
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return result;
    }

    result.add_message(CmdMessage::warning("Inconsistencies found:"));
    for id in &report.orphaned {
        result.add_message(CmdMessage::info(format!(
            "  - Category {} points at a parent that does not exist.",
            id
        )));
    }
    for (parent, child) in &report.dangling_children {
        result.add_message(CmdMessage::info(format!(
            "  - Category {} lists missing child {}.",
            parent, child
        )));
    }
    for (parent, child) in &report.unlisted_children {
        result.add_message(CmdMessage::info(format!(
            "  - Category {} is not listed as a child of {}.",
            child, parent
        )));
    }
    for id in &report.in_cycle {
        result.add_message(CmdMessage::error(format!(
            "  - Category {} is its own ancestor.",
            id
        )));
    }
    for (category, attribute, origin) in &report.missing_bodies {
        result.add_message(CmdMessage::info(format!(
            "  - Category {} enables {} attribute {} with no definition.",
            category, origin, attribute
        )));
    }
    for (category, origin, order) in &report.duplicate_orders {
        result.add_message(CmdMessage::info(format!(
            "  - Category {} has several {} attributes ranked {}.",
            category, origin, order
        )));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{attributes, categories, MessageLevel};
    use crate::model::{Attribute, AttributeType};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::DataStore;

    #[test]
    fn clean_tree_reports_nothing() {
        let store = StoreFixture::new()
            .with_category("plant", "Plant", None)
            .with_category("boiler", "Boiler", Some("plant"))
            .with_system_attribute("boiler", Attribute::new("s", "S", AttributeType::Text), true, 0)
            .store;

        assert!(check(store.state()).is_clean());
        let result = run(store.state());
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn deleting_a_parent_orphans_children() {
        let mut store = StoreFixture::new()
            .with_category("plant", "Plant", None)
            .with_category("boiler", "Boiler", Some("plant"))
            .store;
        categories::delete(&mut store, "plant").unwrap();

        assert_eq!(check(store.state()).orphaned, vec!["boiler"]);
    }

    #[test]
    fn partial_reorder_shows_duplicate_ranks() {
        let mut store = StoreFixture::new()
            .with_category("boiler", "Boiler", None)
            .with_custom_attribute("boiler", Attribute::new("c1", "One", AttributeType::Text), true, 0)
            .with_custom_attribute("boiler", Attribute::new("c2", "Two", AttributeType::Text), true, 1)
            .store;
        attributes::reorder(&mut store, "boiler", &["c1", "c2"]).unwrap();
        assert!(check(store.state()).is_clean());

        attributes::reorder(&mut store, "boiler", &["c2"]).unwrap();
        assert_eq!(
            check(store.state()).duplicate_orders,
            vec![("boiler".to_string(), AttributeOrigin::Custom, 0)]
        );
    }

    #[test]
    fn detects_cycles_and_link_mismatches() {
        let mut store = StoreFixture::new()
            .with_category("a", "A", None)
            .with_category("b", "B", Some("a"))
            .store;
        let mut next = store.state().clone();
        next.category_mut("a").unwrap().parent_id = Some("b".into());
        next.category_mut("a").unwrap().children.push("ghost".into());
        store.commit(next).unwrap();

        let report = check(store.state());
        assert_eq!(report.in_cycle, vec!["a", "b"]);
        assert_eq!(report.unlisted_children, vec![("b".to_string(), "a".to_string())]);
        assert_eq!(report.dangling_children, vec![("a".to_string(), "ghost".to_string())]);
        assert!(!run(store.state()).messages.is_empty());
    }

    #[test]
    fn detects_missing_bodies() {
        let mut store = StoreFixture::new().with_category("boiler", "Boiler", None).store;
        let mut next = store.state().clone();
        next.category_mut("boiler")
            .unwrap()
            .system_attributes
            .push(crate::model::CategoryAttributeConfig::new("ghost", true, 0));
        store.commit(next).unwrap();

        assert_eq!(
            check(store.state()).missing_bodies,
            vec![("boiler".to_string(), "ghost".to_string(), AttributeOrigin::System)]
        );
    }
}
