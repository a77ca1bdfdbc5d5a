//! Global attribute catalog.
//!
//! Globals carry a persistent `order` rank inside their section. Reordering a
//! section rewrites ranks for that section only; reads sort by rank.

use crate::commands::helpers::apply;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LockReason, Result, SchemaError};
use crate::ids;
use crate::model::{GlobalAttribute, GlobalAttributeUpdate, GlobalSection, NewGlobalAttribute};
use crate::store::{DataStore, SchemaState};
use tracing::{debug, warn};

fn require_global_mut<'a>(state: &'a mut SchemaState, id: &str) -> Result<&'a mut GlobalAttribute> {
    state
        .global_attributes
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(|| SchemaError::GlobalAttributeNotFound(id.to_string()))
}

fn next_order_in(state: &SchemaState, section: GlobalSection) -> Result<u32> {
    state
        .global_attributes
        .iter()
        .filter(|g| g.section == section)
        .map(|g| g.order)
        .max()
        .map_or(Some(0), |max| max.checked_add(1))
        .ok_or_else(|| SchemaError::RankExhausted(format!("section {}", section)))
}

/// Flip `is_enabled`. Required globals are locked enabled.
pub fn toggle<S: DataStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    let is_enabled = apply(store, |state| {
        let global = require_global_mut(state, id)?;
        if global.is_required {
            return Err(SchemaError::Locked(LockReason::RequiredGlobal(
                id.to_string(),
            )));
        }
        global.is_enabled = !global.is_enabled;
        Ok(global.is_enabled)
    })?;

    debug!(global = id, is_enabled, "global attribute toggled");
    let verb = if is_enabled { "enabled" } else { "disabled" };
    Ok(CmdResult::default()
        .with_affected(id)
        .with_message(CmdMessage::success(format!("Global attribute {}: {}", verb, id))))
}

/// Create a user-defined global.
///
/// The section is `section`, else the attribute's declared section, else
/// `your-attributes`. The new global is ranked last in that section.
pub fn add<S: DataStore>(
    store: &mut S,
    attribute: NewGlobalAttribute,
    section: Option<GlobalSection>,
) -> Result<CmdResult> {
    let id = ids::global_custom_id();
    let section = section
        .or(attribute.section)
        .unwrap_or(GlobalSection::YourAttributes);
    let label = attribute.label.clone();

    apply(store, |state| {
        let order = next_order_in(state, section)?;
        state.global_attributes.push(GlobalAttribute {
            id: id.clone(),
            label: attribute.label,
            kind: attribute.kind,
            section,
            is_enabled: true,
            is_required: attribute.is_required,
            order,
            description: attribute.description,
            dropdown_options: attribute.dropdown_options,
            format: attribute.format,
        });
        Ok(())
    })?;

    debug!(global = %id, %section, "global attribute added");
    Ok(CmdResult::default()
        .with_affected(id)
        .with_message(CmdMessage::success(format!(
            "Global attribute added to {}: {}",
            section, label
        ))))
}

/// Partial update. Applies to required globals too; moving a global to another
/// section ranks it last there.
pub fn edit<S: DataStore>(
    store: &mut S,
    id: &str,
    updates: &GlobalAttributeUpdate,
) -> Result<CmdResult> {
    let label = apply(store, |state| {
        let current_section = require_global_mut(state, id)?.section;
        let moved_to = updates.section.filter(|s| *s != current_section);
        let new_order = moved_to
            .map(|section| next_order_in(state, section))
            .transpose()?;

        let global = require_global_mut(state, id)?;
        updates.apply(global);
        if let Some(order) = new_order {
            global.order = order;
        }
        Ok(global.label.clone())
    })?;

    debug!(global = id, "global attribute edited");
    Ok(CmdResult::default()
        .with_affected(id)
        .with_message(CmdMessage::success(format!(
            "Global attribute updated: {}",
            label
        ))))
}

pub fn delete<S: DataStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    let removed = apply(store, |state| {
        let position = state
            .global_attributes
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| SchemaError::GlobalAttributeNotFound(id.to_string()))?;
        Ok(state.global_attributes.remove(position))
    })?;

    debug!(global = id, "global attribute deleted");
    Ok(CmdResult::default()
        .with_affected(id)
        .with_message(CmdMessage::success(format!(
            "Global attribute deleted: {}",
            removed.label
        ))))
}

/// Rank the section's globals by their position in `ordered_ids`.
///
/// Globals of the section that are not listed follow the listed ones in their
/// previous relative order. Listed ids from other sections are ignored, and
/// globals outside `section` are never touched.
pub fn reorder<S: DataStore, I: AsRef<str>>(
    store: &mut S,
    section: GlobalSection,
    ordered_ids: &[I],
) -> Result<CmdResult> {
    let listed = apply(store, |state| {
        let previous: Vec<String> = state
            .globals_in_section(section)
            .iter()
            .map(|g| g.id.clone())
            .collect();

        let mut ranked: Vec<String> = Vec::with_capacity(previous.len());
        for id in ordered_ids {
            let id = id.as_ref();
            if previous.iter().any(|p| p == id) {
                if !ranked.iter().any(|r| r == id) {
                    ranked.push(id.to_string());
                }
            } else {
                warn!(%section, global = id, "reorder skips id outside section");
            }
        }
        let listed = ranked.len();
        let unlisted: Vec<String> = previous
            .into_iter()
            .filter(|p| !ranked.contains(p))
            .collect();
        ranked.extend(unlisted);

        for (position, id) in ranked.iter().enumerate() {
            require_global_mut(state, id)?.order = position as u32;
        }
        Ok(listed)
    })?;

    debug!(%section, listed, "global section reordered");
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Reordered {} global attributes in {}",
        listed, section
    ))))
}
