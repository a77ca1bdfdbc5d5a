use crate::error::{Result, SchemaError};
use crate::model::{Attribute, AttributeOrigin, Category, GlobalAttribute, GlobalSection};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Everything the engine knows: the category tree, the global catalog and the
/// per-category attribute pools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaState {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub global_attributes: Vec<GlobalAttribute>,
    /// Predefined attribute bodies, keyed by the category that declares them
    #[serde(default)]
    pub system_catalog: BTreeMap<String, Vec<Attribute>>,
    /// User-created attribute bodies, keyed by their owning category
    #[serde(default)]
    pub custom_catalog: BTreeMap<String, Vec<Attribute>>,
}

impl SchemaState {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    pub fn require_category(&self, id: &str) -> Result<&Category> {
        self.category(id)
            .ok_or_else(|| SchemaError::CategoryNotFound(id.to_string()))
    }

    pub fn require_category_mut(&mut self, id: &str) -> Result<&mut Category> {
        self.category_mut(id)
            .ok_or_else(|| SchemaError::CategoryNotFound(id.to_string()))
    }

    pub fn roots(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_root())
    }

    /// Children as recorded in the parent's `children` list, skipping ids that
    /// no longer resolve.
    pub fn children_of(&self, id: &str) -> Vec<&Category> {
        self.category(id)
            .map(|parent| {
                parent
                    .children
                    .iter()
                    .filter_map(|child| self.category(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn pool(&self, category_id: &str, origin: AttributeOrigin) -> &[Attribute] {
        let catalog = match origin {
            AttributeOrigin::System => &self.system_catalog,
            AttributeOrigin::Custom => &self.custom_catalog,
        };
        catalog.get(category_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn resolve_attribute(
        &self,
        category_id: &str,
        origin: AttributeOrigin,
        attribute_id: &str,
    ) -> Option<&Attribute> {
        self.pool(category_id, origin)
            .iter()
            .find(|a| a.id == attribute_id)
    }

    pub fn global(&self, id: &str) -> Option<&GlobalAttribute> {
        self.global_attributes.iter().find(|g| g.id == id)
    }

    /// Globals in render order: grouped by section, then by rank.
    ///
    /// The sort is stable, so equal ranks keep their insertion order.
    pub fn sorted_globals(&self) -> Vec<&GlobalAttribute> {
        let mut globals: Vec<&GlobalAttribute> = self.global_attributes.iter().collect();
        globals.sort_by_key(|g| (section_rank(g.section), g.order));
        globals
    }

    pub fn globals_in_section(&self, section: GlobalSection) -> Vec<&GlobalAttribute> {
        self.sorted_globals()
            .into_iter()
            .filter(|g| g.section == section)
            .collect()
    }

    /// Ancestors of `id`, nearest first.
    ///
    /// The walk stops at a root, at a `parent_id` that does not resolve, at a
    /// category already visited, or after `max_depth` ancestors. An unknown
    /// starting id yields no ancestors.
    pub fn ancestors(&self, id: &str, max_depth: usize) -> Vec<&Category> {
        let mut ancestors = Vec::new();
        let Some(start) = self.category(id) else {
            return ancestors;
        };

        let mut visited: HashSet<&str> = HashSet::from([start.id.as_str()]);
        let mut next = start.parent_id.as_deref();

        while let Some(parent_id) = next {
            if ancestors.len() >= max_depth {
                warn!(category = id, max_depth, "ancestor walk hit depth limit");
                break;
            }
            let Some(parent) = self.category(parent_id) else {
                warn!(category = id, parent = parent_id, "orphaned ancestor, walk stops");
                break;
            };
            if !visited.insert(parent.id.as_str()) {
                warn!(category = id, parent = parent_id, "cycle in category tree");
                break;
            }
            ancestors.push(parent);
            next = parent.parent_id.as_deref();
        }

        ancestors
    }
}

fn section_rank(section: GlobalSection) -> usize {
    GlobalSection::ALL
        .iter()
        .position(|s| *s == section)
        .unwrap_or(GlobalSection::ALL.len())
}
