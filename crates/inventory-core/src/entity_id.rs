//! Entity ID type: a `domain.object_id` pair

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for invalid entity IDs
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityIdError {
    #[error("entity_id must contain exactly one '.' separator")]
    InvalidFormat,

    #[error("domain cannot be empty")]
    EmptyDomain,

    #[error("object_id cannot be empty")]
    EmptyObjectId,

    #[error("'{0}' is not lowercase alphanumeric with inner underscores")]
    InvalidChars(String),
}

/// Identifies one entity facet of an item (e.g. "number.abc_supply")
///
/// Both parts must be lowercase alphanumeric with underscores, and may not
/// start or end with an underscore.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    domain: String,
    object_id: String,
}

impl EntityId {
    pub fn new(
        domain: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Result<Self, EntityIdError> {
        let domain = domain.into();
        let object_id = object_id.into();

        if domain.is_empty() {
            return Err(EntityIdError::EmptyDomain);
        }
        if object_id.is_empty() {
            return Err(EntityIdError::EmptyObjectId);
        }
        for part in [&domain, &object_id] {
            if !is_valid_part(part) {
                return Err(EntityIdError::InvalidChars(part.clone()));
            }
        }

        Ok(Self { domain, object_id })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }
}

fn is_valid_part(s: &str) -> bool {
    !s.starts_with('_')
        && !s.ends_with('_')
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((domain, object_id)) if !object_id.contains('.') => Self::new(domain, object_id),
            _ => Err(EntityIdError::InvalidFormat),
        }
    }
}

impl TryFrom<String> for EntityId {
    type Error = EntityIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> String {
        id.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_id() {
        let id: EntityId = "number.01hx_supply".parse().unwrap();
        assert_eq!(id.domain(), "number");
        assert_eq!(id.object_id(), "01hx_supply");
        assert_eq!(id.to_string(), "number.01hx_supply");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(
            "no_separator".parse::<EntityId>().unwrap_err(),
            EntityIdError::InvalidFormat
        );
        assert_eq!(
            "sensor.a.b".parse::<EntityId>().unwrap_err(),
            EntityIdError::InvalidFormat
        );
        assert_eq!(
            ".supply".parse::<EntityId>().unwrap_err(),
            EntityIdError::EmptyDomain
        );
    }

    #[test]
    fn test_invalid_chars() {
        assert!(matches!(
            "number.Supply".parse::<EntityId>(),
            Err(EntityIdError::InvalidChars(_))
        ));
        assert!(matches!(
            "number._supply".parse::<EntityId>(),
            Err(EntityIdError::InvalidChars(_))
        ));
        assert!(matches!(
            "binary-sensor.x".parse::<EntityId>(),
            Err(EntityIdError::InvalidChars(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let id = EntityId::new("binary_sensor", "pills_warning").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"binary_sensor.pills_warning\"");
        let parsed: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
