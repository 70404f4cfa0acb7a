//! Item entries
//!
//! An ItemEntry is one configured instance of a tracked item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ConfigResult, ItemConfig, ItemOptions};

/// A configured item with its identity and title
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEntry {
    /// Unique identifier (ULID unless given explicitly)
    pub entry_id: String,

    /// Human-readable title derived from the config
    pub title: String,

    pub config: ItemConfig,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub modified_at: DateTime<Utc>,
}

impl ItemEntry {
    /// Create a new entry with a fresh ULID
    pub fn new(config: ItemConfig) -> Self {
        Self::with_id(ulid::Ulid::new().to_string(), config)
    }

    pub fn with_id(entry_id: impl Into<String>, config: ItemConfig) -> Self {
        let now = Utc::now();
        Self {
            entry_id: entry_id.into(),
            title: config.title(),
            config,
            created_at: now,
            modified_at: now,
        }
    }

    /// Merge an options update into the entry, re-deriving the title
    pub fn update(&mut self, options: &ItemOptions) -> ConfigResult<()> {
        self.config = self.config.merged(options)?;
        self.title = self.config.title();
        self.modified_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_new() {
        let entry = ItemEntry::new(ItemConfig::new("Aspirin"));
        assert_eq!(entry.title, "Aspirin");
        assert_eq!(entry.entry_id.len(), 26);
    }

    #[test]
    fn test_update_rederives_title() {
        let mut entry = ItemEntry::with_id("abc", ItemConfig::new("Aspirin"));
        let created = entry.created_at;

        entry
            .update(&ItemOptions {
                item_name: Some("Aspirin Forte".to_string()),
                item_size: Some(50),
                ..ItemOptions::default()
            })
            .unwrap();

        assert_eq!(entry.title, "Aspirin Forte 50");
        assert_eq!(entry.entry_id, "abc");
        assert_eq!(entry.created_at, created);
        assert!(entry.modified_at >= created);
    }

    #[test]
    fn test_failed_update_leaves_entry() {
        let mut entry = ItemEntry::with_id("abc", ItemConfig::new("Aspirin"));
        let result = entry.update(&ItemOptions {
            item_max_consumption: Some(f64::NAN),
            ..ItemOptions::default()
        });

        assert!(result.is_err());
        assert_eq!(entry.config.item_max_consumption, 5.0);
    }
}
