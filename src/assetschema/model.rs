use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value kinds a category-scoped attribute can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Text,
    Number,
    Dropdown,
    Date,
    Boolean,
}

/// Value kinds a global attribute can hold. Globals add a `search` lookup field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Dropdown,
    Date,
    Boolean,
    Search,
}

impl From<AttributeType> for FieldType {
    fn from(kind: AttributeType) -> Self {
        match kind {
            AttributeType::Text => FieldType::Text,
            AttributeType::Number => FieldType::Number,
            AttributeType::Dropdown => FieldType::Dropdown,
            AttributeType::Date => FieldType::Date,
            AttributeType::Boolean => FieldType::Boolean,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Dropdown => "dropdown",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::Search => "search",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementConfig {
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Numeric-format metadata shared by category and global attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_config: Option<MeasurementConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_config: Option<CurrencyConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl NumberFormat {
    /// The unit label a renderer shows next to the input.
    ///
    /// A measurement unit wins over a currency, which wins over a free suffix.
    pub fn units(&self) -> Option<String> {
        if let Some(measurement) = &self.measurement_config {
            return Some(measurement.unit.clone());
        }
        if let Some(currency) = &self.currency_config {
            return Some(currency.symbol.clone().unwrap_or_else(|| currency.code.clone()));
        }
        self.suffix.clone()
    }
}

/// A category-scoped attribute body, either predefined (system) or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    #[serde(default)]
    pub is_system: bool,
    #[serde(default)]
    pub is_preferred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropdown_options: Option<Vec<String>>,
    #[serde(flatten)]
    pub format: NumberFormat,
}

impl Attribute {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: AttributeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            is_system: false,
            is_preferred: false,
            description: None,
            dropdown_options: None,
            format: NumberFormat::default(),
        }
    }

    pub fn system(id: impl Into<String>, label: impl Into<String>, kind: AttributeType) -> Self {
        Self {
            is_system: true,
            ..Self::new(id, label, kind)
        }
    }
}

/// Input for creating a custom attribute. The id and `is_system` are assigned
/// by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttribute {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    #[serde(default)]
    pub is_preferred: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dropdown_options: Option<Vec<String>>,
    #[serde(flatten)]
    pub format: NumberFormat,
}

impl NewAttribute {
    pub fn new(label: impl Into<String>, kind: AttributeType) -> Self {
        Self {
            label: label.into(),
            kind,
            is_preferred: false,
            description: None,
            dropdown_options: None,
            format: NumberFormat::default(),
        }
    }

    pub(crate) fn into_attribute(self, id: String) -> Attribute {
        Attribute {
            id,
            label: self.label,
            kind: self.kind,
            is_system: false,
            is_preferred: self.is_preferred,
            description: self.description,
            dropdown_options: self.dropdown_options,
            format: self.format,
        }
    }
}

/// Partial update for a custom attribute. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeUpdate {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<AttributeType>,
    pub is_preferred: Option<bool>,
    pub description: Option<String>,
    pub dropdown_options: Option<Vec<String>>,
    pub measurement_config: Option<MeasurementConfig>,
    pub currency_config: Option<CurrencyConfig>,
    pub suffix: Option<String>,
}

impl AttributeUpdate {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn apply(&self, attribute: &mut Attribute) {
        if let Some(label) = &self.label {
            attribute.label = label.clone();
        }
        if let Some(kind) = self.kind {
            attribute.kind = kind;
        }
        if let Some(is_preferred) = self.is_preferred {
            attribute.is_preferred = is_preferred;
        }
        if let Some(description) = &self.description {
            attribute.description = Some(description.clone());
        }
        if let Some(options) = &self.dropdown_options {
            attribute.dropdown_options = Some(options.clone());
        }
        if let Some(measurement) = &self.measurement_config {
            attribute.format.measurement_config = Some(measurement.clone());
        }
        if let Some(currency) = &self.currency_config {
            attribute.format.currency_config = Some(currency.clone());
        }
        if let Some(suffix) = &self.suffix {
            attribute.format.suffix = Some(suffix.clone());
        }
    }
}

/// The fixed sections a global attribute is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlobalSection {
    AssetInfo,
    Status,
    Contact,
    Dates,
    Warranty,
    Custom,
    YourAttributes,
}

impl GlobalSection {
    pub const ALL: [GlobalSection; 7] = [
        GlobalSection::AssetInfo,
        GlobalSection::Status,
        GlobalSection::Contact,
        GlobalSection::Dates,
        GlobalSection::Warranty,
        GlobalSection::Custom,
        GlobalSection::YourAttributes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalSection::AssetInfo => "asset-info",
            GlobalSection::Status => "status",
            GlobalSection::Contact => "contact",
            GlobalSection::Dates => "dates",
            GlobalSection::Warranty => "warranty",
            GlobalSection::Custom => "custom",
            GlobalSection::YourAttributes => "your-attributes",
        }
    }
}

impl fmt::Display for GlobalSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlobalSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GlobalSection::ALL
            .iter()
            .copied()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("Unknown section: {}", s))
    }
}

/// A field present on every asset regardless of category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalAttribute {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub section: GlobalSection,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    #[serde(default)]
    pub is_required: bool,
    /// Rank within `section`. Reads sort by it, ties keep insertion order.
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropdown_options: Option<Vec<String>>,
    #[serde(flatten)]
    pub format: NumberFormat,
}

fn default_true() -> bool {
    true
}

impl GlobalAttribute {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: FieldType,
        section: GlobalSection,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            section,
            is_enabled: true,
            is_required: false,
            order: 0,
            description: None,
            dropdown_options: None,
            format: NumberFormat::default(),
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }
}

/// Input for creating a user-defined global attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGlobalAttribute {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    /// Declared section, used when the caller does not pass one explicitly.
    #[serde(default)]
    pub section: Option<GlobalSection>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dropdown_options: Option<Vec<String>>,
    #[serde(flatten)]
    pub format: NumberFormat,
}

impl NewGlobalAttribute {
    pub fn new(label: impl Into<String>, kind: FieldType) -> Self {
        Self {
            label: label.into(),
            kind,
            section: None,
            is_required: false,
            description: None,
            dropdown_options: None,
            format: NumberFormat::default(),
        }
    }
}

/// Partial update for a global attribute. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalAttributeUpdate {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<FieldType>,
    pub section: Option<GlobalSection>,
    pub is_enabled: Option<bool>,
    pub is_required: Option<bool>,
    pub description: Option<String>,
    pub dropdown_options: Option<Vec<String>>,
    pub measurement_config: Option<MeasurementConfig>,
    pub currency_config: Option<CurrencyConfig>,
    pub suffix: Option<String>,
}

impl GlobalAttributeUpdate {
    pub fn apply(&self, attribute: &mut GlobalAttribute) {
        if let Some(label) = &self.label {
            attribute.label = label.clone();
        }
        if let Some(kind) = self.kind {
            attribute.kind = kind;
        }
        if let Some(section) = self.section {
            attribute.section = section;
        }
        if let Some(is_enabled) = self.is_enabled {
            attribute.is_enabled = is_enabled;
        }
        if let Some(is_required) = self.is_required {
            attribute.is_required = is_required;
        }
        if let Some(description) = &self.description {
            attribute.description = Some(description.clone());
        }
        if let Some(options) = &self.dropdown_options {
            attribute.dropdown_options = Some(options.clone());
        }
        if let Some(measurement) = &self.measurement_config {
            attribute.format.measurement_config = Some(measurement.clone());
        }
        if let Some(currency) = &self.currency_config {
            attribute.format.currency_config = Some(currency.clone());
        }
        if let Some(suffix) = &self.suffix {
            attribute.format.suffix = Some(suffix.clone());
        }
    }
}

/// Per-category enablement and rank of one attribute.
///
/// `order` is unique only within the list that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAttributeConfig {
    pub attribute_id: String,
    pub is_enabled: bool,
    pub order: u32,
}

impl CategoryAttributeConfig {
    pub fn new(attribute_id: impl Into<String>, is_enabled: bool, order: u32) -> Self {
        Self {
            attribute_id: attribute_id.into(),
            is_enabled,
            order,
        }
    }
}

/// Which of a category's two attribute lists an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeOrigin {
    System,
    Custom,
}

impl fmt::Display for AttributeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeOrigin::System => f.write_str("system"),
            AttributeOrigin::Custom => f.write_str("custom"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Mirrors the reverse of `parent_id`. Maintained by mutations, never re-derived.
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub system_attributes: Vec<CategoryAttributeConfig>,
    #[serde(default)]
    pub custom_attributes: Vec<CategoryAttributeConfig>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            children: Vec::new(),
            system_attributes: Vec::new(),
            custom_attributes: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn configs(&self, origin: AttributeOrigin) -> &[CategoryAttributeConfig] {
        match origin {
            AttributeOrigin::System => &self.system_attributes,
            AttributeOrigin::Custom => &self.custom_attributes,
        }
    }

    pub fn configs_mut(&mut self, origin: AttributeOrigin) -> &mut Vec<CategoryAttributeConfig> {
        match origin {
            AttributeOrigin::System => &mut self.system_attributes,
            AttributeOrigin::Custom => &mut self.custom_attributes,
        }
    }

    /// Highest rank across both lists, if the category has any attribute at all.
    pub fn max_order(&self) -> Option<u32> {
        self.system_attributes
            .iter()
            .chain(self.custom_attributes.iter())
            .map(|config| config.order)
            .max()
    }

    /// The rank a newly appended attribute receives, or `None` when the
    /// highest rank is already `u32::MAX`.
    pub fn next_order(&self) -> Option<u32> {
        self.max_order().map_or(Some(0), |max| max.checked_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_order_spans_both_lists() {
        let mut category = Category::new("boiler", "Boiler", None);
        assert_eq!(category.next_order(), Some(0));

        category
            .system_attributes
            .push(CategoryAttributeConfig::new("sys-1", true, 4));
        category
            .custom_attributes
            .push(CategoryAttributeConfig::new("custom-1", true, 2));
        assert_eq!(category.max_order(), Some(4));
        assert_eq!(category.next_order(), Some(5));
    }

    #[test]
    fn next_order_runs_out_at_max_rank() {
        let mut category = Category::new("boiler", "Boiler", None);
        category
            .system_attributes
            .push(CategoryAttributeConfig::new("sys-1", true, u32::MAX));
        assert_eq!(category.next_order(), None);
    }

    #[test]
    fn units_prefer_measurement_then_currency_then_suffix() {
        let mut format = NumberFormat {
            suffix: Some("pcs".into()),
            ..NumberFormat::default()
        };
        assert_eq!(format.units().as_deref(), Some("pcs"));

        format.currency_config = Some(CurrencyConfig {
            code: "GBP".into(),
            symbol: None,
        });
        assert_eq!(format.units().as_deref(), Some("GBP"));

        format.measurement_config = Some(MeasurementConfig {
            unit: "kW".into(),
            precision: Some(1),
        });
        assert_eq!(format.units().as_deref(), Some("kW"));
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut attribute = Attribute::new("custom-1", "Flue Type", AttributeType::Text);
        attribute.description = Some("Outlet".into());

        AttributeUpdate::label("Flue Type v2").apply(&mut attribute);

        assert_eq!(attribute.label, "Flue Type v2");
        assert_eq!(attribute.kind, AttributeType::Text);
        assert_eq!(attribute.description.as_deref(), Some("Outlet"));
    }

    #[test]
    fn section_parses_from_kebab_case() {
        assert_eq!(
            "your-attributes".parse::<GlobalSection>(),
            Ok(GlobalSection::YourAttributes)
        );
        assert!("nowhere".parse::<GlobalSection>().is_err());
    }

    #[test]
    fn global_attribute_deserializes_with_defaults() {
        let json = r#"{"id":"serial-number","label":"Serial","type":"text","section":"asset-info"}"#;
        let attribute: GlobalAttribute = serde_json::from_str(json).unwrap();
        assert!(attribute.is_enabled);
        assert!(!attribute.is_required);
        assert_eq!(attribute.order, 0);
        assert_eq!(attribute.section, GlobalSection::AssetInfo);
    }

    #[test]
    fn attribute_format_fields_are_flattened() {
        let json = r#"{"id":"sys-1","label":"Output","type":"number","is_system":true,
            "measurement_config":{"unit":"kW"}}"#;
        let attribute: Attribute = serde_json::from_str(json).unwrap();
        assert!(attribute.is_system);
        assert_eq!(attribute.format.units().as_deref(), Some("kW"));
    }
}
