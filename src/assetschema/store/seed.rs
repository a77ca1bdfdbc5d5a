//! Seeding from an external JSON catalog.

use super::SchemaState;
use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a catalog file into a fresh snapshot.
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SchemaState> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_seed(&content)
}

pub fn parse_seed(content: &str) -> Result<SchemaState> {
    let state: SchemaState = serde_json::from_str(content)?;
    debug!(
        categories = state.categories.len(),
        globals = state.global_attributes.len(),
        "seed loaded"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::model::AttributeOrigin;

    const SEED: &str = r#"{
        "categories": [
            {"id": "plant", "name": "Plant", "children": ["boiler"]},
            {"id": "boiler", "name": "Boiler", "parent_id": "plant",
             "system_attributes": [{"attribute_id": "sys-1", "is_enabled": true, "order": 0}]}
        ],
        "global_attributes": [
            {"id": "reference", "label": "Reference", "type": "text", "section": "asset-info", "is_required": true}
        ],
        "system_catalog": {
            "boiler": [{"id": "sys-1", "label": "Flue Type", "type": "text", "is_system": true}]
        }
    }"#;

    #[test]
    fn parses_catalog() {
        let state = parse_seed(SEED).unwrap();
        assert_eq!(state.categories.len(), 2);
        assert!(state.custom_catalog.is_empty());
        assert!(state.global("reference").unwrap().is_required);
        assert_eq!(
            state
                .resolve_attribute("boiler", AttributeOrigin::System, "sys-1")
                .unwrap()
                .label,
            "Flue Type"
        );
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        fs::write(&path, SEED).unwrap();
        let state = load_seed(&path).unwrap();
        assert_eq!(state.category("boiler").unwrap().parent_id.as_deref(), Some("plant"));
    }

    #[test]
    fn malformed_seed_is_serialization_error() {
        assert!(matches!(
            parse_seed("{\"categories\": 3}"),
            Err(SchemaError::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_seed(dir.path().join("nope.json")),
            Err(SchemaError::Io(_))
        ));
    }
}
