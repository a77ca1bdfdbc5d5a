use crate::error::{Result, SchemaError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 64;

/// Configuration for assetschema, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Upper bound on how many ancestors a path or inheritance walk visits
    #[serde(default = "default_max_ancestor_depth")]
    pub max_ancestor_depth: usize,

    /// JSON catalog the CLI seeds its state from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

fn default_max_ancestor_depth() -> usize {
    DEFAULT_MAX_ANCESTOR_DEPTH
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            seed_file: None,
        }
    }
}

impl SchemaConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: SchemaConfig = serde_json::from_str(&content)?;
        if config.max_ancestor_depth == 0 {
            return Err(SchemaError::Config(
                "max_ancestor_depth must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Set a key from its CLI spelling (`max-depth`, `seed-file`)
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "max-depth" => {
                let depth: usize = value
                    .parse()
                    .map_err(|_| SchemaError::Config(format!("Invalid depth: {}", value)))?;
                if depth == 0 {
                    return Err(SchemaError::Config(
                        "max-depth must be at least 1".to_string(),
                    ));
                }
                self.max_ancestor_depth = depth;
            }
            "seed-file" => self.seed_file = Some(PathBuf::from(value)),
            other => return Err(SchemaError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    pub fn get_key(&self, key: &str) -> Result<String> {
        match key {
            "max-depth" => Ok(self.max_ancestor_depth.to_string()),
            "seed-file" => Ok(self
                .seed_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            other => Err(SchemaError::Config(format!("Unknown config key: {}", other))),
        }
    }
}
