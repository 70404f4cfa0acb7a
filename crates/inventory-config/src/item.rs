//! Per-item configuration and options updates

use inventory_core::UNIT_PCS;
use serde::{Deserialize, Serialize};

use crate::keys;
use crate::{ConfigError, ConfigResult};

/// Static parameters of one tracked item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    /// Display name (required)
    pub item_name: String,

    /// Upper bound of a single consumption slot (default: 5)
    #[serde(default = "default_max_consumption")]
    pub item_max_consumption: f64,

    /// Warn when fewer days of supply remain (default: 10)
    #[serde(default = "default_warning_days")]
    pub warning_days_before_empty: u32,

    /// Package size, appended to the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_size: Option<u32>,

    /// Unit of measurement (default: "pcs.")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_unit: Option<String>,

    /// Active agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_agent: Option<String>,

    /// Manufacturer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_vendor: Option<String>,

    /// Also track weekly and monthly doses
    #[serde(default)]
    pub enable_weekly_monthly: bool,
}

fn default_max_consumption() -> f64 {
    5.0
}

fn default_warning_days() -> u32 {
    10
}

impl ItemConfig {
    /// Minimal configuration with defaults for everything but the name
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            item_max_consumption: default_max_consumption(),
            warning_days_before_empty: default_warning_days(),
            item_size: None,
            item_unit: None,
            item_agent: None,
            item_vendor: None,
            enable_weekly_monthly: false,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.item_name.trim().is_empty() {
            return Err(ConfigError::invalid(keys::ITEM_NAME, "must not be empty"));
        }
        if !self.item_max_consumption.is_finite() || self.item_max_consumption < 0.0 {
            return Err(ConfigError::invalid(
                keys::ITEM_MAX_CONSUMPTION,
                format!("expected a non-negative number, got {}", self.item_max_consumption),
            ));
        }
        if self.item_size == Some(0) {
            return Err(ConfigError::invalid(keys::ITEM_SIZE, "must be positive"));
        }
        Ok(())
    }

    /// Entry title: the name, followed by the size when one is set
    pub fn title(&self) -> String {
        match self.item_size {
            Some(size) => format!("{} {}", self.item_name, size),
            None => self.item_name.clone(),
        }
    }

    /// Unit of measurement, falling back to pieces
    pub fn unit(&self) -> &str {
        self.item_unit
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(UNIT_PCS)
    }

    /// Apply an options update, returning the merged and validated config
    pub fn merged(&self, options: &ItemOptions) -> ConfigResult<ItemConfig> {
        let mut merged = self.clone();
        if let Some(name) = &options.item_name {
            merged.item_name = name.clone();
        }
        if let Some(size) = options.item_size {
            merged.item_size = Some(size);
        }
        if let Some(unit) = &options.item_unit {
            merged.item_unit = Some(unit.clone());
        }
        if let Some(agent) = &options.item_agent {
            merged.item_agent = Some(agent.clone());
        }
        if let Some(vendor) = &options.item_vendor {
            merged.item_vendor = Some(vendor.clone());
        }
        if let Some(max) = options.item_max_consumption {
            merged.item_max_consumption = max;
        }
        if let Some(days) = options.warning_days_before_empty {
            merged.warning_days_before_empty = days;
        }
        if let Some(enabled) = options.enable_weekly_monthly {
            merged.enable_weekly_monthly = enabled;
        }
        merged.validate()?;
        Ok(merged)
    }
}

/// Options update for an existing item; unset fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemOptions {
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub item_size: Option<u32>,
    #[serde(default)]
    pub item_unit: Option<String>,
    #[serde(default)]
    pub item_agent: Option<String>,
    #[serde(default)]
    pub item_vendor: Option<String>,
    #[serde(default)]
    pub item_max_consumption: Option<f64>,
    #[serde(default)]
    pub warning_days_before_empty: Option<u32>,
    #[serde(default)]
    pub enable_weekly_monthly: Option<bool>,
}
