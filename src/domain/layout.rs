// Dashboard layout configuration - groups of cards
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub items: Vec<Group>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cards: Vec<CardSpec>,
}

/// A card record, resolved from its `type` tag once at load time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawCard")]
pub enum CardSpec {
    Hass {
        entity_id: String,
        name: Option<String>,
        icon: Option<String>,
    },
    Link {
        name: String,
        url: String,
        icon: Option<String>,
    },
    Camera {
        name: String,
        url: String,
        still_url: String,
        icon: Option<String>,
    },
    Unknown {
        kind: String,
    },
}

#[derive(Debug, Deserialize)]
struct RawCard {
    #[serde(rename = "type")]
    kind: Option<String>,
    entity_id: Option<String>,
    name: Option<String>,
    url: Option<String>,
    still_url: Option<String>,
    icon: Option<String>,
}

impl From<RawCard> for CardSpec {
    fn from(raw: RawCard) -> Self {
        match raw.kind.as_deref().unwrap_or("hass") {
            "hass" => CardSpec::Hass {
                entity_id: raw.entity_id.unwrap_or_default(),
                name: raw.name,
                icon: raw.icon,
            },
            "link" => CardSpec::Link {
                name: raw.name.unwrap_or_default(),
                url: raw.url.unwrap_or_default(),
                icon: raw.icon,
            },
            "camera" => CardSpec::Camera {
                name: raw.name.unwrap_or_default(),
                url: raw.url.unwrap_or_default(),
                still_url: raw.still_url.unwrap_or_default(),
                icon: raw.icon,
            },
            other => CardSpec::Unknown {
                kind: other.to_string(),
            },
        }
    }
}

/// Position of a card in the configuration: group index, card index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardKey {
    pub group: usize,
    pub card: usize,
}

impl CardKey {
    pub fn new(group: usize, card: usize) -> Self {
        Self { group, card }
    }
}

impl DashboardConfig {
    pub fn card(&self, key: CardKey) -> Option<&CardSpec> {
        self.items.get(key.group)?.cards.get(key.card)
    }
}
