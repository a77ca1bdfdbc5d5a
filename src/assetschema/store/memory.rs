use super::{DataStore, SchemaState};
use crate::error::Result;

/// Process-local store. The snapshot lives as long as the store does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: SchemaState,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: SchemaState) -> Self {
        Self { state }
    }

    pub fn into_state(self) -> SchemaState {
        self.state
    }
}

impl DataStore for InMemoryStore {
    fn state(&self) -> &SchemaState {
        &self.state
    }

    fn commit(&mut self, next: SchemaState) -> Result<()> {
        self.state = next;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Attribute, Category, CategoryAttributeConfig, GlobalAttribute};

    /// Builder for seeded stores. Links `children` the way `add_category` would.
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_category(mut self, id: &str, name: &str, parent: Option<&str>) -> Self {
            let state = &mut self.store.state;
            if let Some(parent_id) = parent {
                if let Some(parent) = state.category_mut(parent_id) {
                    parent.children.push(id.to_string());
                }
            }
            state
                .categories
                .push(Category::new(id, name, parent.map(str::to_string)));
            self
        }

        pub fn with_system_attribute(
            mut self,
            category_id: &str,
            attribute: Attribute,
            is_enabled: bool,
            order: u32,
        ) -> Self {
            let state = &mut self.store.state;
            if let Some(category) = state.category_mut(category_id) {
                category.system_attributes.push(CategoryAttributeConfig::new(
                    attribute.id.clone(),
                    is_enabled,
                    order,
                ));
            }
            state
                .system_catalog
                .entry(category_id.to_string())
                .or_default()
                .push(Attribute {
                    is_system: true,
                    ..attribute
                });
            self
        }

        pub fn with_custom_attribute(
            mut self,
            category_id: &str,
            attribute: Attribute,
            is_enabled: bool,
            order: u32,
        ) -> Self {
            let state = &mut self.store.state;
            if let Some(category) = state.category_mut(category_id) {
                category.custom_attributes.push(CategoryAttributeConfig::new(
                    attribute.id.clone(),
                    is_enabled,
                    order,
                ));
            }
            state
                .custom_catalog
                .entry(category_id.to_string())
                .or_default()
                .push(attribute);
            self
        }

        pub fn with_global(mut self, attribute: GlobalAttribute) -> Self {
            self.store.state.global_attributes.push(attribute);
            self
        }
    }
}
