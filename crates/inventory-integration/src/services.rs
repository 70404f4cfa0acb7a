//! Services exposed by the integration
//!
//! - `inventory_manager.consume`: take a fixed amount or one predefined dose
//!   from targeted supply entities
//! - `inventory_manager.store`: add to targeted supply entities
//! - `number.set_value`: write any inventory number entity

use std::sync::Arc;

use inventory_core::{EntityId, EntityKind, Quantity, ServiceCall, DOMAIN};
use inventory_entities::domains;
use inventory_services::{ServiceDescription, ServiceError, ServiceRegistry};
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::{ConsumeRequest, InventoryManager};

pub const SERVICE_CONSUME: &str = "consume";
pub const SERVICE_STORE: &str = "store";
pub const SERVICE_SET_VALUE: &str = "set_value";

/// Payload keys
pub const ATTR_AMOUNT: &str = "amount";
pub const ATTR_PREDEFINED_AMOUNT: &str = "predefined-amount";
pub const ATTR_VALUE: &str = "value";

fn entity_id_schema() -> Value {
    json!({
        "anyOf": [
            {"type": "string"},
            {"type": "array", "items": {"type": "string"}}
        ]
    })
}

fn consume_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "entity_id": entity_id_schema(),
            ATTR_AMOUNT: {"type": "integer", "minimum": 0},
            ATTR_PREDEFINED_AMOUNT: {"type": "string"}
        },
        "oneOf": [
            {"required": [ATTR_AMOUNT]},
            {"required": [ATTR_PREDEFINED_AMOUNT]}
        ]
    })
}

fn store_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "entity_id": entity_id_schema(),
            ATTR_AMOUNT: {"type": "number", "minimum": 0}
        },
        "required": [ATTR_AMOUNT]
    })
}

fn set_value_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "entity_id": entity_id_schema(),
            ATTR_VALUE: {"type": "number"}
        },
        "required": [ATTR_VALUE]
    })
}

/// Targeted entities that are the supply of a known item, as (entity_id, entry_id)
fn supply_targets(manager: &InventoryManager, call: &ServiceCall) -> Vec<(EntityId, String)> {
    let mut targets = Vec::new();
    for raw in call.entity_ids() {
        let entity_id: EntityId = match raw.parse() {
            Ok(id) => id,
            Err(e) => {
                warn!(entity_id = %raw, error = %e, "Ignoring malformed target");
                continue;
            }
        };
        match manager.resolve(&entity_id) {
            Some((entry_id, EntityKind::Quantity(Quantity::Supply))) => {
                targets.push((entity_id, entry_id));
            }
            Some((_, kind)) => {
                debug!(%entity_id, %kind, "Target is not a supply entity, skipping");
            }
            None => {
                warn!(%entity_id, "Unknown target entity");
            }
        }
    }
    targets
}

/// Resolve every `number.set_value` target up front, so a bad id rejects
/// the whole call before anything is written
fn number_targets(
    manager: &InventoryManager,
    call: &ServiceCall,
) -> Result<Vec<EntityId>, ServiceError> {
    call.entity_ids()
        .into_iter()
        .map(|raw| {
            let entity_id: EntityId = raw
                .parse()
                .map_err(|e| ServiceError::InvalidData(format!("{}: {}", raw, e)))?;
            manager
                .ensure_writable(&entity_id)
                .map_err(|e| ServiceError::InvalidData(e.to_string()))?;
            Ok(entity_id)
        })
        .collect()
}

/// Parse the consume payload into a request
fn consume_request(call: &ServiceCall) -> Result<ConsumeRequest, ServiceError> {
    if let Some(name) = call.get::<String>(ATTR_PREDEFINED_AMOUNT) {
        debug!(predefined = %name, "Consume with predefined amount");
        let kind: EntityKind = name
            .parse()
            .map_err(|e: inventory_core::UnknownKind| ServiceError::InvalidData(e.to_string()))?;
        return Ok(ConsumeRequest::Dose(kind));
    }
    match call.get::<u64>(ATTR_AMOUNT) {
        Some(amount) => {
            debug!(amount, "Consume with amount");
            Ok(ConsumeRequest::Amount(amount as f64))
        }
        None => Err(ServiceError::InvalidData(format!(
            "one of '{}' or '{}' is required",
            ATTR_AMOUNT, ATTR_PREDEFINED_AMOUNT
        ))),
    }
}

fn call_failed(e: impl std::fmt::Display) -> ServiceError {
    ServiceError::CallFailed(e.to_string())
}

/// Register all inventory services
///
/// The response of `consume` and `store` maps each affected supply entity to
/// its new supply.
pub fn register_services(
    services: &ServiceRegistry,
    manager: Arc<InventoryManager>,
) -> Result<(), ServiceError> {
    let mgr = manager.clone();
    services.register(
        ServiceDescription::new(DOMAIN, SERVICE_CONSUME)
            .with_name("Consume")
            .with_description("Take an amount or a predefined dose from the supply")
            .with_schema(consume_schema()),
        move |call: ServiceCall| {
            let manager = mgr.clone();
            async move {
                let request = consume_request(&call)?;
                let mut response = Map::new();
                for (entity_id, entry_id) in supply_targets(&manager, &call) {
                    let supply = manager.consume(&entry_id, request).map_err(call_failed)?;
                    response.insert(entity_id.to_string(), json!(supply));
                }
                Ok::<_, ServiceError>(Some(Value::Object(response)))
            }
        },
    )?;

    let mgr = manager.clone();
    services.register(
        ServiceDescription::new(DOMAIN, SERVICE_STORE)
            .with_name("Store")
            .with_description("Add an amount to the supply")
            .with_schema(store_schema()),
        move |call: ServiceCall| {
            let manager = mgr.clone();
            async move {
                let amount = call.get::<f64>(ATTR_AMOUNT).unwrap_or(0.0);
                let mut response = Map::new();
                for (entity_id, entry_id) in supply_targets(&manager, &call) {
                    let supply = manager.restock(&entry_id, amount).map_err(call_failed)?;
                    response.insert(entity_id.to_string(), json!(supply));
                }
                Ok::<_, ServiceError>(Some(Value::Object(response)))
            }
        },
    )?;

    let mgr = manager;
    services.register(
        ServiceDescription::new(domains::NUMBER, SERVICE_SET_VALUE)
            .with_name("Set value")
            .with_description("Set the value of an inventory number")
            .with_schema(set_value_schema()),
        move |call: ServiceCall| {
            let manager = mgr.clone();
            async move {
                let value = call.get::<f64>(ATTR_VALUE).unwrap_or(0.0);
                let targets = number_targets(&manager, &call)?;
                for entity_id in &targets {
                    manager
                        .set_number_value(entity_id, value)
                        .map_err(|e| ServiceError::InvalidData(e.to_string()))?;
                }
                Ok::<Option<Value>, ServiceError>(None)
            }
        },
    )?;

    info!("Inventory services registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_request_parsing() {
        let call = ServiceCall::new(DOMAIN, SERVICE_CONSUME, json!({"predefined-amount": "Night"}));
        assert_eq!(
            consume_request(&call).unwrap(),
            ConsumeRequest::Dose(EntityKind::Quantity(Quantity::Night))
        );

        let call = ServiceCall::new(DOMAIN, SERVICE_CONSUME, json!({"amount": 3}));
        assert_eq!(consume_request(&call).unwrap(), ConsumeRequest::Amount(3.0));

        let call = ServiceCall::new(DOMAIN, SERVICE_CONSUME, json!({"predefined-amount": "lunch"}));
        assert!(matches!(
            consume_request(&call),
            Err(ServiceError::InvalidData(_))
        ));
    }
}
