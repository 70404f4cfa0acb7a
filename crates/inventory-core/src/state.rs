//! Rendered state of one entity facet

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EntityId, STATE_UNAVAILABLE};

/// Snapshot of an entity's value at render time
///
/// States are produced fresh from the tracker each time they are requested;
/// nothing holds on to them between renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub entity_id: EntityId,

    /// The state value (e.g. "12.5", "on", an RFC 3339 timestamp, "unavailable")
    pub state: String,

    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,

    /// Render time
    pub last_updated: DateTime<Utc>,
}

impl State {
    pub fn new(
        entity_id: EntityId,
        state: impl Into<String>,
        attributes: HashMap<String, serde_json::Value>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            entity_id,
            state: state.into(),
            attributes,
            last_updated,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.state == STATE_UNAVAILABLE
    }

    /// Get an attribute value by key
    pub fn attribute<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.attributes
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Parse the state value as a number
    pub fn as_f64(&self) -> Option<f64> {
        self.state.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_accessors() {
        let id = EntityId::new("sensor", "pills_emptyprediction").unwrap();
        let attrs = HashMap::from([("days_remaining".to_string(), json!(25.0))]);
        let state = State::new(id, "12.5", attrs, Utc::now());

        assert_eq!(state.as_f64(), Some(12.5));
        assert_eq!(state.attribute::<f64>("days_remaining"), Some(25.0));
        assert_eq!(state.attribute::<f64>("missing"), None);
        assert!(!state.is_unavailable());
    }
}
