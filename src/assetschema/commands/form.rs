//! # Form Organizer
//!
//! Turns the resolved schema for one category into the six buckets a form
//! renderer draws: `asset_info`, `location`, `manufacturer`, `attributes`,
//! `installation` and `warranty`.
//!
//! ## Routing
//!
//! Enabled globals are routed by `(section, id)`:
//!
//! | Section           | Bucket         | Notes                                            |
//! |-------------------|----------------|--------------------------------------------------|
//! | `asset-info`      | `asset_info`   | `category` only when the category field is shown |
//! | `contact`         | `location`     | only `contact` and `location`                    |
//! | `status`          | `asset_info`   | only `condition`                                 |
//! | `dates`           | `installation` | `end-of-life` goes to `warranty`                 |
//! | `warranty`        | `warranty`     |                                                  |
//! | `your-attributes` | `attributes`   |                                                  |
//! | `custom`          | (none)         |                                                  |
//!
//! Manufacturer and installation-date fields skip the table and are appended
//! in a fixed order afterwards, whatever section they were declared in.
//!
//! ## Category Attributes
//!
//! The category's own enabled attributes and everything it inherits land in
//! `attributes`, which is then sorted by rank. Globals carry no per-category
//! rank and sort last.

use crate::commands::{attributes, inherit};
use crate::model::{Attribute, AttributeOrigin, FieldType, GlobalAttribute, GlobalSection};
use crate::store::SchemaState;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Ids of the globals the organizer treats specially.
pub mod field_ids {
    pub const CATEGORY: &str = "category";
    pub const REFERENCE: &str = "reference";
    pub const MANUFACTURER: &str = "manufacturer";
    pub const MODEL: &str = "model";
    pub const SERIAL_NUMBER: &str = "serial-number";
    pub const DATE_OF_MANUFACTURE: &str = "date-of-manufacture";
    pub const DATE_OF_INSTALLATION: &str = "date-of-installation";
    pub const DATE_OF_LAST_SERVICE: &str = "date-of-last-service";
    pub const CONTACT: &str = "contact";
    pub const LOCATION: &str = "location";
    pub const CONDITION: &str = "condition";
    pub const END_OF_LIFE: &str = "end-of-life";
}

use field_ids::*;

const MANUFACTURER_FIELDS: [&str; 4] = [MANUFACTURER, MODEL, SERIAL_NUMBER, DATE_OF_MANUFACTURE];
const INSTALLATION_FIELDS: [&str; 2] = [DATE_OF_INSTALLATION, DATE_OF_LAST_SERVICE];

static ROUTED_SEPARATELY: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    MANUFACTURER_FIELDS
        .iter()
        .chain(INSTALLATION_FIELDS.iter())
        .copied()
        .collect()
});

/// Where a form field came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldSource {
    Global,
    CategorySystem,
    CategoryCustom,
    Inherited {
        origin: AttributeOrigin,
        parent_category_id: String,
        parent_category_name: String,
    },
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSource::Global => f.write_str("global"),
            FieldSource::CategorySystem => f.write_str("category-system"),
            FieldSource::CategoryCustom => f.write_str("category-custom"),
            FieldSource::Inherited {
                parent_category_name,
                ..
            } => write!(f, "inherited from {}", parent_category_name),
        }
    }
}

/// An attribute body of either kind, before it becomes a [`FormField`].
#[derive(Debug, Clone, Copy)]
pub enum AttributeDef<'a> {
    Global(&'a GlobalAttribute),
    Category(&'a Attribute),
}

impl AttributeDef<'_> {
    pub fn id(&self) -> &str {
        match self {
            AttributeDef::Global(g) => &g.id,
            AttributeDef::Category(a) => &a.id,
        }
    }

    pub fn into_field(self, source: FieldSource, order: Option<u32>) -> FormField {
        match self {
            AttributeDef::Global(g) => FormField {
                id: g.id.clone(),
                label: g.label.clone(),
                kind: g.kind,
                is_required: g.is_required,
                is_enabled: g.is_enabled,
                description: g.description.clone(),
                dropdown_options: g.dropdown_options.clone(),
                units: g.format.units(),
                source,
                order,
            },
            AttributeDef::Category(a) => FormField {
                id: a.id.clone(),
                label: a.label.clone(),
                kind: a.kind.into(),
                is_required: false,
                is_enabled: true,
                description: a.description.clone(),
                dropdown_options: a.dropdown_options.clone(),
                units: a.format.units(),
                source,
                order,
            },
        }
    }
}

/// One entry as the form renderer consumes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub is_required: bool,
    pub is_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropdown_options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    pub source: FieldSource,
    /// Per-category rank; `None` for globals
    #[serde(skip)]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormBucket {
    AssetInfo,
    Location,
    Manufacturer,
    Attributes,
    Installation,
    Warranty,
}

impl FormBucket {
    pub const ALL: [FormBucket; 6] = [
        FormBucket::AssetInfo,
        FormBucket::Location,
        FormBucket::Manufacturer,
        FormBucket::Attributes,
        FormBucket::Installation,
        FormBucket::Warranty,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            FormBucket::AssetInfo => "Asset info",
            FormBucket::Location => "Location",
            FormBucket::Manufacturer => "Manufacturer",
            FormBucket::Attributes => "Attributes",
            FormBucket::Installation => "Installation",
            FormBucket::Warranty => "Warranty",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrganizedForm {
    pub asset_info: Vec<FormField>,
    pub location: Vec<FormField>,
    pub manufacturer: Vec<FormField>,
    pub attributes: Vec<FormField>,
    pub installation: Vec<FormField>,
    pub warranty: Vec<FormField>,
}

impl OrganizedForm {
    pub fn bucket(&self, bucket: FormBucket) -> &[FormField] {
        match bucket {
            FormBucket::AssetInfo => &self.asset_info,
            FormBucket::Location => &self.location,
            FormBucket::Manufacturer => &self.manufacturer,
            FormBucket::Attributes => &self.attributes,
            FormBucket::Installation => &self.installation,
            FormBucket::Warranty => &self.warranty,
        }
    }

    fn bucket_mut(&mut self, bucket: FormBucket) -> &mut Vec<FormField> {
        match bucket {
            FormBucket::AssetInfo => &mut self.asset_info,
            FormBucket::Location => &mut self.location,
            FormBucket::Manufacturer => &mut self.manufacturer,
            FormBucket::Attributes => &mut self.attributes,
            FormBucket::Installation => &mut self.installation,
            FormBucket::Warranty => &mut self.warranty,
        }
    }

    pub fn is_empty(&self) -> bool {
        FormBucket::ALL.iter().all(|b| self.bucket(*b).is_empty())
    }

    pub fn field_count(&self) -> usize {
        FormBucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }
}

fn route_global(global: &GlobalAttribute, include_category_field: bool) -> Option<FormBucket> {
    let id = global.id.as_str();
    if ROUTED_SEPARATELY.contains(id) {
        return None;
    }
    match global.section {
        GlobalSection::AssetInfo => {
            (id != CATEGORY || include_category_field).then_some(FormBucket::AssetInfo)
        }
        GlobalSection::Contact => (id == CONTACT || id == LOCATION).then_some(FormBucket::Location),
        GlobalSection::Status => (id == CONDITION).then_some(FormBucket::AssetInfo),
        GlobalSection::Dates if id == END_OF_LIFE => Some(FormBucket::Warranty),
        GlobalSection::Dates => Some(FormBucket::Installation),
        GlobalSection::Warranty => Some(FormBucket::Warranty),
        GlobalSection::YourAttributes => Some(FormBucket::Attributes),
        GlobalSection::Custom => None,
    }
}

fn asset_info_rank(field: &FormField) -> u8 {
    match field.id.as_str() {
        CATEGORY => 0,
        REFERENCE => 1,
        _ => 2,
    }
}

/// Build the form buckets for `category_id`.
///
/// With no category and no category field there is nothing to show and every
/// bucket is empty. An unknown `category_id` gets the global buckets only.
pub fn organize(
    state: &SchemaState,
    category_id: Option<&str>,
    include_category_field: bool,
    max_depth: usize,
) -> OrganizedForm {
    let mut form = OrganizedForm::default();
    if category_id.is_none() && !include_category_field {
        return form;
    }

    let globals: Vec<&GlobalAttribute> = state
        .sorted_globals()
        .into_iter()
        .filter(|g| g.is_enabled)
        .collect();

    for global in &globals {
        if let Some(bucket) = route_global(global, include_category_field) {
            form.bucket_mut(bucket)
                .push(AttributeDef::Global(global).into_field(FieldSource::Global, None));
        }
    }

    for (ids, bucket) in [
        (&MANUFACTURER_FIELDS[..], FormBucket::Manufacturer),
        (&INSTALLATION_FIELDS[..], FormBucket::Installation),
    ] {
        for id in ids {
            if let Some(global) = globals.iter().find(|g| g.id == *id) {
                form.bucket_mut(bucket)
                    .push(AttributeDef::Global(global).into_field(FieldSource::Global, None));
            }
        }
    }

    if let Some(category_id) = category_id {
        if let Ok(own) = attributes::own(state, category_id) {
            for entry in own.iter().filter(|e| e.config.is_enabled) {
                let source = match entry.origin {
                    AttributeOrigin::System => FieldSource::CategorySystem,
                    AttributeOrigin::Custom => FieldSource::CategoryCustom,
                };
                form.attributes.push(
                    AttributeDef::Category(&entry.attribute)
                        .into_field(source, Some(entry.config.order)),
                );
            }
            for inherited in inherit::run(state, category_id, max_depth) {
                let source = FieldSource::Inherited {
                    origin: inherited.source,
                    parent_category_id: inherited.parent_category_id,
                    parent_category_name: inherited.parent_category_name,
                };
                form.attributes.push(
                    AttributeDef::Category(&inherited.attribute)
                        .into_field(source, Some(inherited.order)),
                );
            }
        } else {
            debug!(category = category_id, "unknown category, globals only");
        }
    }

    form.attributes
        .sort_by_key(|field| (field.order.is_none(), field.order));
    form.asset_info.sort_by_key(asset_info_rank);

    form
}
