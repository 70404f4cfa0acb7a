//! YAML loading of item definitions

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{ConfigError, ConfigResult, ItemConfig, ItemEntry};

/// Top-level layout of an inventory YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryFile {
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

/// One item in the file, optionally pinned to an entry id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Stable entry id; a ULID is generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub config: ItemConfig,
}

/// Load and validate every item in a YAML file
pub fn load_items(path: impl AsRef<Path>) -> ConfigResult<Vec<ItemEntry>> {
    let path = path.as_ref();
    debug!("Loading items from {:?}", path);

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_items_str(&content, path)
}

/// Load items from YAML content; `source_path` is used in error messages
pub fn load_items_str(content: &str, source_path: &Path) -> ConfigResult<Vec<ItemEntry>> {
    let file: InventoryFile =
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
            path: source_path.to_path_buf(),
            source: e,
        })?;

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(file.items.len());

    for definition in file.items {
        definition.config.validate()?;

        let entry = match definition.id {
            Some(id) => ItemEntry::with_id(id, definition.config),
            None => ItemEntry::new(definition.config),
        };
        if !seen.insert(entry.entry_id.clone()) {
            return Err(ConfigError::DuplicateEntry { id: entry.entry_id });
        }

        debug!(entry_id = %entry.entry_id, title = %entry.title, "Loaded item");
        entries.push(entry);
    }

    info!("Loaded {} inventory items", entries.len());
    Ok(entries)
}
