//! Service registry with async handlers
//!
//! Services are how callers mutate trackers (`inventory_manager.consume`,
//! `number.set_value`, ...). Each service may carry a JSON schema; payloads
//! that do not match it are rejected before the handler runs.

use dashmap::DashMap;
use inventory_core::ServiceCall;
use jsonschema::JSONSchema;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Result type for service calls
pub type ServiceResult = Result<Option<serde_json::Value>, ServiceError>;

/// Future type for async service handlers
pub type ServiceFuture = Pin<Box<dyn Future<Output = ServiceResult> + Send>>;

/// Service handler function type
pub type ServiceHandler = Arc<dyn Fn(ServiceCall) -> ServiceFuture + Send + Sync>;

/// Errors that can occur when working with services
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("service not found: {domain}.{service}")]
    NotFound { domain: String, service: String },

    #[error("service call failed: {0}")]
    CallFailed(String),

    #[error("invalid service data: {0}")]
    InvalidData(String),

    #[error("invalid schema for {service}: {reason}")]
    InvalidSchema { service: String, reason: String },
}

/// Information about a registered service
#[derive(Debug, Clone)]
pub struct ServiceDescription {
    pub domain: String,
    pub service: String,
    /// Human-readable name
    pub name: Option<String>,
    pub description: Option<String>,
    /// JSON schema for service data
    pub schema: Option<serde_json::Value>,
}

impl ServiceDescription {
    pub fn new(domain: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            name: None,
            description: None,
            schema: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = Some(schema);
        self
    }

    fn key(&self) -> String {
        service_key(&self.domain, &self.service)
    }
}

fn service_key(domain: &str, service: &str) -> String {
    format!("{}.{}", domain, service)
}

struct RegisteredService {
    handler: ServiceHandler,
    validator: Option<Arc<JSONSchema>>,
}

/// Registry of all services, keyed by "domain.service"
pub struct ServiceRegistry {
    services: DashMap<String, RegisteredService>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    /// Register a service, replacing any previous handler under the same name
    ///
    /// Fails if the description carries a schema that does not compile.
    #[instrument(skip(self, handler), fields(service = %description.key()))]
    pub fn register<F, Fut>(
        &self,
        description: ServiceDescription,
        handler: F,
    ) -> Result<(), ServiceError>
    where
        F: Fn(ServiceCall) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ServiceResult> + Send + 'static,
    {
        let key = description.key();

        let validator = match &description.schema {
            Some(schema) => {
                let compiled =
                    JSONSchema::compile(schema).map_err(|e| ServiceError::InvalidSchema {
                        service: key.clone(),
                        reason: e.to_string(),
                    })?;
                Some(Arc::new(compiled))
            }
            None => None,
        };

        debug!(
            name = ?description.name,
            description = ?description.description,
            "Registering service"
        );

        let handler: ServiceHandler =
            Arc::new(move |call| Box::pin(handler(call)) as ServiceFuture);

        self.services.insert(
            key,
            RegisteredService { handler, validator },
        );
        Ok(())
    }

    /// Call a service, validating the payload against its schema first
    #[instrument(skip(self, service_data))]
    pub async fn call(
        &self,
        domain: &str,
        service: &str,
        service_data: serde_json::Value,
    ) -> ServiceResult {
        let key = service_key(domain, service);

        let registered = self.services.get(&key).ok_or_else(|| {
            warn!("Service not found");
            ServiceError::NotFound {
                domain: domain.to_string(),
                service: service.to_string(),
            }
        })?;

        let handler = registered.handler.clone();
        let validator = registered.validator.clone();
        drop(registered); // Release the shard lock before running the handler

        if let Some(validator) = validator {
            if let Err(errors) = validator.validate(&service_data) {
                let reason = errors
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                debug!(%reason, "Rejected service data");
                return Err(ServiceError::InvalidData(reason));
            }
        }

        debug!("Calling service");
        handler(ServiceCall::new(domain, service, service_data)).await
    }

    pub fn has_service(&self, domain: &str, service: &str) -> bool {
        self.services.contains_key(&service_key(domain, service))
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
