//! Service call type for invoking inventory services

use serde::{Deserialize, Serialize};

/// A call to a registered service (e.g. `inventory_manager.consume`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,

    /// Payload, including the `entity_id` target
    pub service_data: serde_json::Value,
}

impl ServiceCall {
    pub fn new(
        domain: impl Into<String>,
        service: impl Into<String>,
        service_data: serde_json::Value,
    ) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            service_data,
        }
    }

    /// Full service identifier (domain.service)
    pub fn service_id(&self) -> String {
        format!("{}.{}", self.domain, self.service)
    }

    /// Get a typed value from service_data
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.service_data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn has(&self, key: &str) -> bool {
        self.service_data.get(key).is_some()
    }

    /// Target entity ids, accepting both a single string and a list
    pub fn entity_ids(&self) -> Vec<String> {
        match self.service_data.get("entity_id") {
            Some(serde_json::Value::String(s)) => vec![s.clone()],
            Some(serde_json::Value::Array(arr)) => arr
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_call_data() {
        let call = ServiceCall::new(
            "inventory_manager",
            "consume",
            json!({"entity_id": "number.pills_supply", "amount": 2}),
        );

        assert_eq!(call.service_id(), "inventory_manager.consume");
        assert_eq!(call.get::<u64>("amount"), Some(2));
        assert_eq!(call.get::<String>("predefined-amount"), None);
        assert!(call.has("amount"));
        assert_eq!(call.entity_ids(), vec!["number.pills_supply"]);
    }

    #[test]
    fn test_entity_ids_list_and_missing() {
        let call = ServiceCall::new(
            "inventory_manager",
            "consume",
            json!({"entity_id": ["number.a_supply", "number.b_supply", 3]}),
        );
        assert_eq!(call.entity_ids(), vec!["number.a_supply", "number.b_supply"]);

        let call = ServiceCall::new("inventory_manager", "consume", json!({}));
        assert!(call.entity_ids().is_empty());
    }
}
