//! Device registry information for an item

use inventory_config::ItemConfig;
use inventory_core::DOMAIN;
use serde::{Deserialize, Serialize};

/// How the device is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceEntryType {
    /// A virtual device backed by a service rather than hardware
    Service,
}

/// Device that groups all facets of one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// `(domain, entry_id)` pairs
    pub identifiers: Vec<(String, String)>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub entry_type: DeviceEntryType,
}

impl DeviceInfo {
    pub fn for_item(entry_id: &str, config: &ItemConfig) -> Self {
        Self {
            identifiers: vec![(DOMAIN.to_string(), entry_id.to_string())],
            name: config.title(),
            manufacturer: config.item_vendor.clone(),
            model: config.item_agent.clone(),
            entry_type: DeviceEntryType::Service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_for_item() {
        let mut config = ItemConfig::new("Ibuprofen");
        config.item_size = Some(400);
        config.item_vendor = Some("Acme".to_string());

        let device = DeviceInfo::for_item("01hx", &config);
        assert_eq!(
            device.identifiers,
            vec![("inventory_manager".to_string(), "01hx".to_string())]
        );
        assert_eq!(device.name, "Ibuprofen 400");
        assert_eq!(device.manufacturer.as_deref(), Some("Acme"));
        assert_eq!(device.entry_type, DeviceEntryType::Service);
    }
}
