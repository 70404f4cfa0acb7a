//! Error types for the integration layer

use inventory_config::ConfigError;
use inventory_core::EntityIdError;
use thiserror::Error;

pub type IntegrationResult<T> = Result<T, IntegrationError>;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("item entry not found: {0}")]
    EntryNotFound(String),

    #[error("item entry already configured: {0}")]
    AlreadyConfigured(String),

    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("entity {0} does not accept values")]
    NotWritable(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    EntityId(#[from] EntityIdError),
}
