//! Category-scoped attribute catalog: custom attribute CRUD plus enablement,
//! preference and ranking for both system and custom attributes.
//!
//! System attribute bodies are read-only here. Editing or deleting one is
//! refused with [`LockReason::SystemAttribute`]; toggling and preference flips
//! are allowed.

use crate::commands::helpers::apply;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LockReason, Result, SchemaError};
use crate::ids;
use crate::model::{
    Attribute, AttributeOrigin, AttributeUpdate, CategoryAttributeConfig, NewAttribute,
};
use crate::store::{DataStore, SchemaState};
use tracing::{debug, warn};

/// One of a category's own attributes, resolved against its pool.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnAttribute {
    pub attribute: Attribute,
    pub config: CategoryAttributeConfig,
    pub origin: AttributeOrigin,
}

fn not_found(category_id: &str, attribute_id: &str) -> SchemaError {
    SchemaError::AttributeNotFound {
        category_id: category_id.to_string(),
        attribute_id: attribute_id.to_string(),
    }
}

/// Custom-pool body for `id`, or the reason it cannot be touched.
fn custom_body_mut<'a>(
    state: &'a mut SchemaState,
    category_id: &str,
    id: &str,
) -> Result<&'a mut Attribute> {
    state.require_category(category_id)?;
    if state
        .resolve_attribute(category_id, AttributeOrigin::System, id)
        .is_some()
    {
        return Err(SchemaError::Locked(LockReason::SystemAttribute(
            id.to_string(),
        )));
    }
    state
        .custom_catalog
        .get_mut(category_id)
        .and_then(|pool| pool.iter_mut().find(|a| a.id == id))
        .ok_or_else(|| not_found(category_id, id))
}

pub fn add<S: DataStore>(
    store: &mut S,
    attribute: NewAttribute,
    category_id: &str,
) -> Result<CmdResult> {
    let id = ids::custom_attribute_id();
    let label = attribute.label.clone();

    let order = apply(store, |state| {
        let category = state.require_category_mut(category_id)?;
        let order = category
            .next_order()
            .ok_or_else(|| SchemaError::RankExhausted(format!("category {}", category_id)))?;
        category
            .custom_attributes
            .push(CategoryAttributeConfig::new(id.clone(), true, order));
        state
            .custom_catalog
            .entry(category_id.to_string())
            .or_default()
            .push(attribute.into_attribute(id.clone()));
        Ok(order)
    })?;

    debug!(category = category_id, attribute = %id, order, "custom attribute added");
    Ok(CmdResult::default()
        .with_affected(id)
        .with_message(CmdMessage::success(format!("Attribute added: {}", label))))
}

pub fn edit<S: DataStore>(
    store: &mut S,
    id: &str,
    category_id: &str,
    updates: &AttributeUpdate,
) -> Result<CmdResult> {
    let label = apply(store, |state| {
        let body = custom_body_mut(state, category_id, id)?;
        updates.apply(body);
        Ok(body.label.clone())
    })?;

    debug!(category = category_id, attribute = id, "custom attribute edited");
    Ok(CmdResult::default()
        .with_affected(id)
        .with_message(CmdMessage::success(format!("Attribute updated: {}", label))))
}

pub fn delete<S: DataStore>(store: &mut S, id: &str, category_id: &str) -> Result<CmdResult> {
    let label = apply(store, |state| {
        let label = custom_body_mut(state, category_id, id)?.label.clone();
        if let Some(pool) = state.custom_catalog.get_mut(category_id) {
            pool.retain(|a| a.id != id);
        }
        state
            .require_category_mut(category_id)?
            .custom_attributes
            .retain(|config| config.attribute_id != id);
        Ok(label)
    })?;

    debug!(category = category_id, attribute = id, "custom attribute deleted");
    Ok(CmdResult::default()
        .with_affected(id)
        .with_message(CmdMessage::success(format!("Attribute deleted: {}", label))))
}

pub fn toggle<S: DataStore>(
    store: &mut S,
    category_id: &str,
    attribute_id: &str,
    origin: AttributeOrigin,
) -> Result<CmdResult> {
    let is_enabled = apply(store, |state| {
        let config = state
            .require_category_mut(category_id)?
            .configs_mut(origin)
            .iter_mut()
            .find(|config| config.attribute_id == attribute_id)
            .ok_or_else(|| not_found(category_id, attribute_id))?;
        config.is_enabled = !config.is_enabled;
        Ok(config.is_enabled)
    })?;

    debug!(category = category_id, attribute = attribute_id, %origin, is_enabled, "attribute toggled");
    let verb = if is_enabled { "enabled" } else { "disabled" };
    Ok(CmdResult::default()
        .with_affected(attribute_id)
        .with_message(CmdMessage::success(format!(
            "Attribute {}: {}",
            verb, attribute_id
        ))))
}

/// Flip `is_preferred` on the body, looking in the system pool before the custom one.
pub fn toggle_preferred<S: DataStore>(
    store: &mut S,
    attribute_id: &str,
    category_id: &str,
) -> Result<CmdResult> {
    let is_preferred = apply(store, |state| {
        state.require_category(category_id)?;
        let body = [&mut state.system_catalog, &mut state.custom_catalog]
            .into_iter()
            .filter_map(|catalog| catalog.get_mut(category_id))
            .flat_map(|pool| pool.iter_mut())
            .find(|a| a.id == attribute_id)
            .ok_or_else(|| not_found(category_id, attribute_id))?;
        body.is_preferred = !body.is_preferred;
        Ok(body.is_preferred)
    })?;

    debug!(category = category_id, attribute = attribute_id, is_preferred, "preference toggled");
    let verb = if is_preferred { "marked" } else { "unmarked" };
    Ok(CmdResult::default()
        .with_affected(attribute_id)
        .with_message(CmdMessage::success(format!(
            "Attribute {} preferred: {}",
            verb, attribute_id
        ))))
}

/// Rank every listed id by its position in `ordered_ids`, across both lists.
///
/// Ids that are not listed keep their previous rank, so a partial reorder can
/// leave duplicate or gapped ranks behind.
pub fn reorder<S: DataStore, I: AsRef<str>>(
    store: &mut S,
    category_id: &str,
    ordered_ids: &[I],
) -> Result<CmdResult> {
    let matched = apply(store, |state| {
        let category = state.require_category_mut(category_id)?;
        let mut matched = Vec::new();
        for (position, id) in ordered_ids.iter().enumerate() {
            let id = id.as_ref();
            let config = category
                .system_attributes
                .iter_mut()
                .chain(category.custom_attributes.iter_mut())
                .find(|config| config.attribute_id == id);
            match config {
                Some(config) => {
                    config.order = position as u32;
                    matched.push(id.to_string());
                }
                None => warn!(category = category_id, attribute = id, "reorder skips unknown id"),
            }
        }
        Ok(matched)
    })?;

    debug!(category = category_id, count = matched.len(), "attributes reordered");
    let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Reordered {} attributes in {}",
        matched.len(),
        category_id
    )));
    result.affected_ids = matched;
    Ok(result)
}

/// The category's own system and custom attributes in rank order.
///
/// Configs whose body is missing from the pool are skipped.
pub fn own(state: &SchemaState, category_id: &str) -> Result<Vec<OwnAttribute>> {
    let category = state.require_category(category_id)?;
    let mut own = Vec::new();

    for origin in [AttributeOrigin::System, AttributeOrigin::Custom] {
        for config in category.configs(origin) {
            match state.resolve_attribute(category_id, origin, &config.attribute_id) {
                Some(attribute) => own.push(OwnAttribute {
                    attribute: attribute.clone(),
                    config: config.clone(),
                    origin,
                }),
                None => warn!(
                    category = category_id,
                    attribute = %config.attribute_id,
                    %origin,
                    "config references missing attribute body"
                ),
            }
        }
    }

    own.sort_by_key(|entry| entry.config.order);
    Ok(own)
}
