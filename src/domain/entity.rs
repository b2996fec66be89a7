// Entity domain model - live state pushed by Home Assistant
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const STATE_ON: &str = "on";
pub const STATE_UNAVAILABLE: &str = "unavailable";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Entity {
    #[cfg(test)]
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: Map::new(),
        }
    }

    #[cfg(test)]
    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Prefix of the entity id before the first `.`; empty when there is none.
    pub fn domain(&self) -> &str {
        domain_of(&self.entity_id)
    }

    pub fn friendly_name(&self) -> Option<&str> {
        self.attributes.get("friendly_name").and_then(Value::as_str)
    }

    pub fn unit_of_measurement(&self) -> Option<&str> {
        self.attributes
            .get("unit_of_measurement")
            .and_then(Value::as_str)
    }

    pub fn is_on(&self) -> bool {
        self.state == STATE_ON
    }

    pub fn is_unavailable(&self) -> bool {
        self.state == STATE_UNAVAILABLE
    }
}

pub fn domain_of(entity_id: &str) -> &str {
    entity_id
        .split_once('.')
        .map(|(domain, _)| domain)
        .unwrap_or("")
}

/// Ordered `(entity_id, Entity)` pairs, replaced wholesale on every state push.
#[derive(Debug, Clone, Default)]
pub struct EntityCollection {
    pairs: Vec<(String, Entity)>,
}

impl EntityCollection {
    pub fn new(pairs: Vec<(String, Entity)>) -> Self {
        Self { pairs }
    }

    pub fn from_states(states: Vec<Entity>) -> Self {
        Self::new(
            states
                .into_iter()
                .map(|entity| (entity.entity_id.clone(), entity))
                .collect(),
        )
    }

    /// Linear scan on `entity_id` equality.
    pub fn find(&self, entity_id: &str) -> Option<&Entity> {
        self.pairs
            .iter()
            .map(|(_, entity)| entity)
            .find(|entity| entity.entity_id == entity_id)
    }
}
