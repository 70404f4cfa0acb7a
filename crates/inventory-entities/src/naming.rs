//! Unique id and entity id generation

use std::sync::OnceLock;

use inventory_core::{EntityId, EntityIdError, EntityKind};
use regex::Regex;

/// Identity of one facet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityConfig {
    pub unique_id: String,
    pub entity_id: EntityId,
    pub kind: EntityKind,
}

fn non_slug_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static regex"))
}

/// Lowercase `text` and collapse every run of other characters into `_`
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let slug = non_slug_chars().replace_all(&lowered, "_");
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "unknown".to_string()
    } else {
        slug.to_string()
    }
}

/// `<entry_id>_<KIND>`, or a random UUID when there is no entry id
pub fn unique_id(entry_id: &str, kind: EntityKind) -> String {
    if entry_id.is_empty() {
        uuid::Uuid::new_v4().to_string()
    } else {
        format!("{}_{}", entry_id, kind.name())
    }
}

/// Build an entity id in `domain` from `unique_id`, avoiding taken ids
///
/// The first free id of `<slug>`, `<slug>_2`, `<slug>_3`, ... is used.
pub fn generate_entity_id(
    domain: &str,
    unique_id: &str,
    is_taken: impl Fn(&EntityId) -> bool,
) -> Result<EntityId, EntityIdError> {
    let slug = slugify(unique_id);
    let mut candidate = EntityId::new(domain, slug.clone())?;
    let mut suffix = 2;
    while is_taken(&candidate) {
        candidate = EntityId::new(domain, format!("{}_{}", slug, suffix))?;
        suffix += 1;
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::{DerivedOutput, Quantity};

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("01HX3_SUPPLY"), "01hx3_supply");
        assert_eq!(slugify("Vitamin D -- 1000 IU"), "vitamin_d_1000_iu");
        assert_eq!(slugify("__x__"), "x");
        assert_eq!(slugify("***"), "unknown");
    }

    #[test]
    fn test_unique_id() {
        assert_eq!(
            unique_id("01hx", EntityKind::Derived(DerivedOutput::EmptyPrediction)),
            "01hx_EMPTYPREDICTION"
        );
        let random = unique_id("", EntityKind::Quantity(Quantity::Supply));
        assert_eq!(random.len(), 36);
    }

    #[test]
    fn test_generate_entity_id_avoids_collisions() {
        let taken: Vec<EntityId> = vec![
            "number.pills_supply".parse().unwrap(),
            "number.pills_supply_2".parse().unwrap(),
        ];
        let id = generate_entity_id("number", "pills_SUPPLY", |c| taken.contains(c)).unwrap();
        assert_eq!(id.to_string(), "number.pills_supply_3");

        let id = generate_entity_id("sensor", "pills_SUPPLY", |c| taken.contains(c)).unwrap();
        assert_eq!(id.to_string(), "sensor.pills_supply");
    }
}
