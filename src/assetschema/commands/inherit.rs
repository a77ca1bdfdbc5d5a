//! Ancestor inheritance.
//!
//! A category inherits every enabled system and custom attribute declared
//! directly on each of its ancestors. Nothing is cached: each call walks the
//! full chain again. Inherited entries are read-only from the descendant; they
//! change only through the ancestor that declares them.

use crate::model::{Attribute, AttributeOrigin};
use crate::store::SchemaState;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InheritedAttribute {
    pub attribute: Attribute,
    /// Rank within the declaring ancestor's own list
    pub order: u32,
    pub source: AttributeOrigin,
    pub parent_category_id: String,
    pub parent_category_name: String,
}

/// Enabled attributes declared on any ancestor of `category_id`, by rank.
///
/// Ranks are only unique within one ancestor's list, so entries from different
/// levels may tie; ties keep walk order (nearest ancestor first, system before
/// custom).
pub fn run(state: &SchemaState, category_id: &str, max_depth: usize) -> Vec<InheritedAttribute> {
    let mut inherited = Vec::new();

    for ancestor in state.ancestors(category_id, max_depth) {
        for source in [AttributeOrigin::System, AttributeOrigin::Custom] {
            for config in ancestor.configs(source).iter().filter(|c| c.is_enabled) {
                let Some(attribute) =
                    state.resolve_attribute(&ancestor.id, source, &config.attribute_id)
                else {
                    warn!(
                        category = %ancestor.id,
                        attribute = %config.attribute_id,
                        "inherited config references missing attribute body"
                    );
                    continue;
                };
                inherited.push(InheritedAttribute {
                    attribute: attribute.clone(),
                    order: config.order,
                    source,
                    parent_category_id: ancestor.id.clone(),
                    parent_category_name: ancestor.name.clone(),
                });
            }
        }
    }

    inherited.sort_by_key(|entry| entry.order);
    inherited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::attributes;
    use crate::model::AttributeType;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::store::DataStore;

    fn chain() -> InMemoryStore {
        StoreFixture::new()
            .with_category("a", "A", None)
            .with_category("b", "B", Some("a"))
            .with_category("c", "C", Some("b"))
            .with_custom_attribute(
                "a",
                Attribute::new("foo", "Foo", AttributeType::Text),
                true,
                0,
            )
            .with_system_attribute(
                "b",
                Attribute::new("bar", "Bar", AttributeType::Number),
                true,
                1,
            )
            .store
    }

    #[test]
    fn collects_from_every_ancestor() {
        let store = chain();
        let inherited = run(store.state(), "c", 64);

        assert_eq!(inherited.len(), 2);
        assert_eq!(inherited[0].attribute.id, "foo");
        assert_eq!(inherited[0].parent_category_name, "A");
        assert_eq!(inherited[0].source, AttributeOrigin::Custom);
        assert_eq!(inherited[1].attribute.id, "bar");
        assert_eq!(inherited[1].parent_category_name, "B");
        assert_eq!(inherited[1].parent_category_id, "b");
        assert_eq!(inherited[1].source, AttributeOrigin::System);
    }

    #[test]
    fn disabled_ancestor_attribute_is_excluded() {
        let mut store = chain();
        attributes::toggle(&mut store, "a", "foo", AttributeOrigin::Custom).unwrap();

        let inherited = run(store.state(), "c", 64);
        assert_eq!(inherited.len(), 1);
        assert_eq!(inherited[0].attribute.id, "bar");
    }

    #[test]
    fn root_inherits_nothing() {
        let store = chain();
        assert!(run(store.state(), "a", 64).is_empty());
        assert!(run(store.state(), "ghost", 64).is_empty());
    }

    #[test]
    fn own_attributes_are_not_inherited() {
        let store = chain();
        let inherited = run(store.state(), "b", 64);
        assert_eq!(inherited.len(), 1);
        assert_eq!(inherited[0].attribute.id, "foo");
    }

    #[test]
    fn depth_limit_cuts_far_ancestors() {
        let store = chain();
        let inherited = run(store.state(), "c", 1);
        assert_eq!(inherited.len(), 1);
        assert_eq!(inherited[0].parent_category_id, "b");
    }

    #[test]
    fn ties_keep_nearest_ancestor_first() {
        let store = StoreFixture::new()
            .with_category("a", "A", None)
            .with_category("b", "B", Some("a"))
            .with_category("c", "C", Some("b"))
            .with_custom_attribute("a", Attribute::new("far", "Far", AttributeType::Text), true, 0)
            .with_custom_attribute("b", Attribute::new("near", "Near", AttributeType::Text), true, 0)
            .store;

        let ids: Vec<String> = run(store.state(), "c", 64)
            .into_iter()
            .map(|i| i.attribute.id)
            .collect();
        assert_eq!(ids, vec!["near", "far"]);
    }

    #[test]
    fn dangling_parent_stops_walk() {
        let mut store = chain();
        let mut next = store.state().clone();
        next.category_mut("b").unwrap().parent_id = Some("vanished".into());
        store.commit(next).unwrap();

        let inherited = run(store.state(), "c", 64);
        assert_eq!(inherited.len(), 1);
        assert_eq!(inherited[0].attribute.id, "bar");
    }
}
