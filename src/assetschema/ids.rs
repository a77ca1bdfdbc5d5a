//! Identifier generation.
//!
//! Ids are opaque strings of the form `<kind>-<suffix>`. The suffix is the
//! simple (hyphen-less) rendering of a v4 UUID. Nothing checks generated ids
//! for collisions against existing ones.

use uuid::Uuid;

pub const CATEGORY_PREFIX: &str = "category";
pub const CUSTOM_PREFIX: &str = "custom";
pub const GLOBAL_CUSTOM_PREFIX: &str = "global-custom";

fn generate(kind: &str) -> String {
    format!("{}-{}", kind, Uuid::new_v4().simple())
}

pub fn category_id() -> String {
    generate(CATEGORY_PREFIX)
}

pub fn custom_attribute_id() -> String {
    generate(CUSTOM_PREFIX)
}

pub fn global_custom_id() -> String {
    generate(GLOBAL_CUSTOM_PREFIX)
}

/// Globals created through `add_global_attribute` are recognised by their prefix.
pub fn is_user_created_global(id: &str) -> bool {
    id.strip_prefix(GLOBAL_CUSTOM_PREFIX)
        .is_some_and(|rest| rest.starts_with('-'))
}
