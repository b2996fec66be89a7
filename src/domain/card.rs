// Card descriptor - what the presentation layer renders for one card
use super::entity::Entity;
use super::layout::CardKey;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Hass,
    Link,
    Camera,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDescriptor {
    pub key: CardKey,
    pub kind: CardKind,
    pub name: String,
    pub icon: Option<String>,
    pub entity_id: Option<String>,
    pub domain: Option<String>,
    pub state: Option<String>,
    pub unit: Option<String>,
    pub state_text: Option<String>,
    pub url: Option<String>,
    pub still_url: Option<String>,
    pub active: bool,
    pub interactable: bool,
    pub unavailable: bool,
}

impl CardDescriptor {
    pub fn link(key: CardKey, name: String, url: String, icon: Option<String>) -> Self {
        Self {
            key,
            kind: CardKind::Link,
            name,
            icon,
            entity_id: None,
            domain: None,
            state: None,
            unit: None,
            state_text: None,
            url: Some(url),
            still_url: None,
            active: false,
            interactable: true,
            unavailable: false,
        }
    }

    pub fn camera(key: CardKey, name: String, url: String, still_url: String) -> Self {
        Self {
            kind: CardKind::Camera,
            still_url: Some(still_url),
            icon: None,
            ..Self::link(key, name, url, None)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupLayout {
    pub name: String,
    pub cards: Vec<CardDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraView {
    pub name: String,
    pub still_url: String,
    pub url: String,
}

/// `dispatch(domain, desired_state, { entity_id })`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCommand {
    pub domain: String,
    pub desired_state: bool,
    pub entity_id: String,
}

impl ServiceCommand {
    pub fn new(domain: impl Into<String>, desired_state: bool, entity_id: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            desired_state,
            entity_id: entity_id.into(),
        }
    }

    /// Home Assistant service name for the desired state.
    pub fn service(&self) -> &'static str {
        if self.desired_state { "turn_on" } else { "turn_off" }
    }
}

/// Command dispatched when a hass card is activated, if its domain has one.
pub fn activation_command(entity: &Entity) -> Option<ServiceCommand> {
    match entity.domain() {
        "light" | "switch" => Some(ServiceCommand::new(
            entity.domain(),
            !entity.is_on(),
            entity.entity_id.clone(),
        )),
        "scene" | "script" => Some(ServiceCommand::new(
            entity.domain(),
            true,
            entity.entity_id.clone(),
        )),
        _ => None,
    }
}
