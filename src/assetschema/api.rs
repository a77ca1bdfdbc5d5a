//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every schema operation, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Owns** the store and the configuration, so callers pass one object around
//!   instead of reaching for shared global state
//! - **Dispatches** to the matching command function
//! - **Supplies** configuration the commands need (the ancestor depth bound)
//!
//! It does no business logic, no I/O and no formatting.
//!
//! ## Errors
//!
//! Mutations return `Err` when their target does not resolve
//! ([`SchemaError::is_not_found`](crate::error::SchemaError::is_not_found)) or
//! is locked ([`SchemaError::is_locked`](crate::error::SchemaError::is_locked)).
//! In both cases the state is unchanged.

use crate::commands::{self, attributes, categories, doctor, form, globals, inherit};
use crate::config::SchemaConfig;
use crate::error::Result;
use crate::model::{
    Attribute, AttributeOrigin, AttributeUpdate, Category, GlobalAttribute, GlobalAttributeUpdate,
    GlobalSection, NewAttribute, NewGlobalAttribute,
};
use crate::store::{DataStore, SchemaState};

/// The main API facade for schema operations.
///
/// Generic over `DataStore` so tests and embedders can supply their own store.
pub struct SchemaApi<S: DataStore> {
    store: S,
    config: SchemaConfig,
}

impl<S: DataStore> SchemaApi<S> {
    pub fn new(store: S, config: SchemaConfig) -> Self {
        Self { store, config }
    }

    pub fn state(&self) -> &SchemaState {
        self.store.state()
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    // --- Reads ---

    pub fn categories(&self) -> &[Category] {
        &self.state().categories
    }

    pub fn global_attributes(&self) -> Vec<&GlobalAttribute> {
        self.state().sorted_globals()
    }

    pub fn globals_in_section(&self, section: GlobalSection) -> Vec<&GlobalAttribute> {
        self.state().globals_in_section(section)
    }

    pub fn system_attributes(&self, category_id: &str) -> &[Attribute] {
        self.state().pool(category_id, AttributeOrigin::System)
    }

    pub fn custom_attributes(&self, category_id: &str) -> &[Attribute] {
        self.state().pool(category_id, AttributeOrigin::Custom)
    }

    pub fn category_attributes(&self, category_id: &str) -> Result<Vec<attributes::OwnAttribute>> {
        attributes::own(self.state(), category_id)
    }

    pub fn category_path(&self, id: &str) -> Vec<Category> {
        categories::path(self.state(), id, self.config.max_ancestor_depth)
    }

    pub fn inherited_attributes(&self, category_id: &str) -> Vec<inherit::InheritedAttribute> {
        inherit::run(self.state(), category_id, self.config.max_ancestor_depth)
    }

    pub fn organize_form(
        &self,
        category_id: Option<&str>,
        include_category_field: bool,
    ) -> form::OrganizedForm {
        form::organize(
            self.state(),
            category_id,
            include_category_field,
            self.config.max_ancestor_depth,
        )
    }

    pub fn doctor(&self) -> commands::CmdResult {
        doctor::run(self.state())
    }

    // --- Category tree ---

    pub fn add_category(&mut self, name: &str, parent_id: Option<&str>) -> Result<commands::CmdResult> {
        categories::add(&mut self.store, name, parent_id)
    }

    pub fn edit_category(&mut self, id: &str, name: &str) -> Result<commands::CmdResult> {
        categories::edit(&mut self.store, id, name)
    }

    pub fn delete_category(&mut self, id: &str) -> Result<commands::CmdResult> {
        categories::delete(&mut self.store, id)
    }

    // --- Category attributes ---

    pub fn add_attribute(
        &mut self,
        attribute: NewAttribute,
        category_id: &str,
    ) -> Result<commands::CmdResult> {
        attributes::add(&mut self.store, attribute, category_id)
    }

    pub fn edit_attribute(
        &mut self,
        id: &str,
        category_id: &str,
        updates: &AttributeUpdate,
    ) -> Result<commands::CmdResult> {
        attributes::edit(&mut self.store, id, category_id, updates)
    }

    pub fn delete_attribute(&mut self, id: &str, category_id: &str) -> Result<commands::CmdResult> {
        attributes::delete(&mut self.store, id, category_id)
    }

    pub fn toggle_attribute(
        &mut self,
        category_id: &str,
        attribute_id: &str,
        origin: AttributeOrigin,
    ) -> Result<commands::CmdResult> {
        attributes::toggle(&mut self.store, category_id, attribute_id, origin)
    }

    pub fn toggle_preferred(
        &mut self,
        attribute_id: &str,
        category_id: &str,
    ) -> Result<commands::CmdResult> {
        attributes::toggle_preferred(&mut self.store, attribute_id, category_id)
    }

    pub fn reorder_attributes<I: AsRef<str>>(
        &mut self,
        category_id: &str,
        ordered_ids: &[I],
    ) -> Result<commands::CmdResult> {
        attributes::reorder(&mut self.store, category_id, ordered_ids)
    }

    // --- Global attributes ---

    pub fn toggle_global_attribute(&mut self, id: &str) -> Result<commands::CmdResult> {
        globals::toggle(&mut self.store, id)
    }

    pub fn add_global_attribute(
        &mut self,
        attribute: NewGlobalAttribute,
        section: Option<GlobalSection>,
    ) -> Result<commands::CmdResult> {
        globals::add(&mut self.store, attribute, section)
    }

    pub fn edit_global_attribute(
        &mut self,
        id: &str,
        updates: &GlobalAttributeUpdate,
    ) -> Result<commands::CmdResult> {
        globals::edit(&mut self.store, id, updates)
    }

    pub fn delete_global_attribute(&mut self, id: &str) -> Result<commands::CmdResult> {
        globals::delete(&mut self.store, id)
    }

    pub fn reorder_global_attributes<I: AsRef<str>>(
        &mut self,
        section: GlobalSection,
        ordered_ids: &[I],
    ) -> Result<commands::CmdResult> {
        globals::reorder(&mut self.store, section, ordered_ids)
    }
}

pub use commands::doctor::ConsistencyReport;
pub use commands::form::{FieldSource, FormBucket, FormField, OrganizedForm};
pub use commands::inherit::InheritedAttribute;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
