// Card resolver - binds a card record to live entity state
use crate::domain::card::{CardDescriptor, CardKind};
use crate::domain::entity::{Entity, EntityCollection};
use crate::domain::layout::{CardKey, CardSpec};
use chrono::{NaiveDateTime, Timelike};

/// Sensor icons are only drawn for names shorter than this many characters.
const SENSOR_ICON_MAX_NAME_CHARS: usize = 18;

/// Resolve one card for this render pass.
///
/// Returns `None` when the card cannot be rendered right now: a `hass` card whose
/// entity is missing from `entities`, or a card of an unrecognized type.
pub fn resolve(
    key: CardKey,
    card: &CardSpec,
    entities: &EntityCollection,
    now: NaiveDateTime,
) -> Option<CardDescriptor> {
    match card {
        CardSpec::Hass {
            entity_id,
            name,
            icon,
        } => {
            let entity = entities.find(entity_id)?;
            Some(resolve_entity(key, entity, name.as_deref(), icon.as_deref()))
        }
        CardSpec::Link { name, url, icon } => Some(CardDescriptor::link(
            key,
            name.clone(),
            url.clone(),
            icon.clone(),
        )),
        CardSpec::Camera { name, url, .. } => Some(CardDescriptor::camera(
            key,
            name.clone(),
            url.clone(),
            still_url(card, now),
        )),
        CardSpec::Unknown { kind } => {
            tracing::trace!("Dropping card {:?} with unknown type {}", key, kind);
            None
        }
    }
}

fn resolve_entity(
    key: CardKey,
    entity: &Entity,
    name: Option<&str>,
    icon: Option<&str>,
) -> CardDescriptor {
    let domain = entity.domain();
    let is_sensor = domain == "sensor";
    let name = name
        .or_else(|| entity.friendly_name())
        .unwrap_or_default()
        .to_string();
    let unavailable = entity.is_unavailable();

    let show_icon = is_sensor && name.chars().count() < SENSOR_ICON_MAX_NAME_CHARS;
    let state_text = is_sensor.then(|| {
        format!(
            "{}{}",
            entity.state,
            entity.unit_of_measurement().unwrap_or_default()
        )
    });

    CardDescriptor {
        key,
        kind: CardKind::Hass,
        icon: icon.filter(|_| show_icon).map(str::to_string),
        entity_id: Some(entity.entity_id.clone()),
        domain: Some(domain.to_string()),
        state: Some(entity.state.clone()),
        unit: entity.unit_of_measurement().map(str::to_string),
        state_text,
        url: None,
        still_url: None,
        active: entity.is_on(),
        interactable: !unavailable && !is_sensor,
        unavailable,
        name,
    }
}

/// Still-image URL qualified with an `HHMM` token so each minute fetches a fresh snapshot.
///
/// Non-camera cards have no still image and yield an empty string. A URL that already
/// carries a query gets `&HHMM` rather than a second `?`.
pub fn still_url(card: &CardSpec, now: NaiveDateTime) -> String {
    let CardSpec::Camera { still_url, .. } = card else {
        return String::new();
    };
    let separator = if still_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{:02}{:02}",
        still_url,
        separator,
        now.hour(),
        now.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn hass(entity_id: &str) -> CardSpec {
        CardSpec::Hass {
            entity_id: entity_id.to_string(),
            name: None,
            icon: None,
        }
    }

    fn camera() -> CardSpec {
        CardSpec::Camera {
            name: "Driveway".to_string(),
            url: "http://cam.local/stream".to_string(),
            still_url: "http://cam.local/still.jpg".to_string(),
            icon: None,
        }
    }

    const KEY: CardKey = CardKey { group: 0, card: 0 };

    #[test]
    fn test_missing_entity_drops_card() {
        let entities = EntityCollection::from_states(vec![Entity::new("light.hall", "on")]);

        assert!(resolve(KEY, &hass("light.kitchen"), &entities, at(12, 0, 0)).is_none());
        assert!(resolve(KEY, &hass("light.kitchen"), &EntityCollection::default(), at(12, 0, 0)).is_none());
    }

    #[test]
    fn test_light_off_is_interactable() {
        let entities = EntityCollection::from_states(vec![Entity::new("light.kitchen", "off")]);
        let card = resolve(KEY, &hass("light.kitchen"), &entities, at(12, 0, 0)).unwrap();

        assert_eq!(card.kind, CardKind::Hass);
        assert_eq!(card.domain.as_deref(), Some("light"));
        assert_eq!(card.state.as_deref(), Some("off"));
        assert!(card.interactable);
        assert!(!card.active);
        assert!(card.state_text.is_none());
        assert_eq!(card.name, "");
    }

    #[test]
    fn test_sensor_shows_state_suffix_and_is_not_interactable() {
        let entities = EntityCollection::from_states(vec![
            Entity::new("sensor.temp", "21")
                .with_attribute("unit_of_measurement", "°C")
                .with_attribute("friendly_name", "Living Room"),
        ]);
        let spec = CardSpec::Hass {
            entity_id: "sensor.temp".to_string(),
            name: None,
            icon: Some("thermometer".to_string()),
        };
        let card = resolve(KEY, &spec, &entities, at(12, 0, 0)).unwrap();

        assert_eq!(card.name, "Living Room");
        assert_eq!(card.state_text.as_deref(), Some("21°C"));
        assert_eq!(card.icon.as_deref(), Some("thermometer"));
        assert!(!card.interactable);
        assert!(!card.unavailable);
    }

    #[test]
    fn test_sensor_icon_hidden_for_long_names() {
        let entities = EntityCollection::from_states(vec![Entity::new("sensor.humidity", "40")]);
        let spec = CardSpec::Hass {
            entity_id: "sensor.humidity".to_string(),
            name: Some("Upstairs Humidity!".to_string()),
            icon: Some("water".to_string()),
        };
        let card = resolve(KEY, &spec, &entities, at(12, 0, 0)).unwrap();

        assert_eq!(card.name.chars().count(), 18);
        assert!(card.icon.is_none());
        assert_eq!(card.state_text.as_deref(), Some("40"));
    }

    #[test]
    fn test_icon_never_shown_for_non_sensor_hass_cards() {
        let entities = EntityCollection::from_states(vec![Entity::new("switch.fan", "on")]);
        let spec = CardSpec::Hass {
            entity_id: "switch.fan".to_string(),
            name: Some("Fan".to_string()),
            icon: Some("fan".to_string()),
        };
        let card = resolve(KEY, &spec, &entities, at(12, 0, 0)).unwrap();

        assert!(card.icon.is_none());
        assert!(card.active);
    }

    #[test]
    fn test_unavailable_entity_is_not_interactable() {
        let entities = EntityCollection::from_states(vec![Entity::new("switch.fan", "unavailable")]);
        let card = resolve(KEY, &hass("switch.fan"), &entities, at(12, 0, 0)).unwrap();

        assert!(card.unavailable);
        assert!(!card.interactable);
    }

    #[test]
    fn test_card_name_overrides_friendly_name() {
        let entities = EntityCollection::from_states(vec![
            Entity::new("light.kitchen", "on").with_attribute("friendly_name", "Kitchen Light"),
        ]);
        let spec = CardSpec::Hass {
            entity_id: "light.kitchen".to_string(),
            name: Some("Kitchen".to_string()),
            icon: None,
        };

        assert_eq!(resolve(KEY, &spec, &entities, at(12, 0, 0)).unwrap().name, "Kitchen");
    }

    #[test]
    fn test_link_and_unknown_cards() {
        let link = CardSpec::Link {
            name: "Grafana".to_string(),
            url: "https://grafana.local".to_string(),
            icon: Some("chart-line".to_string()),
        };
        let card = resolve(KEY, &link, &EntityCollection::default(), at(12, 0, 0)).unwrap();
        assert!(card.interactable);
        assert!(!card.unavailable);
        assert_eq!(card.icon.as_deref(), Some("chart-line"));

        let unknown = CardSpec::Unknown {
            kind: "weather".to_string(),
        };
        assert!(resolve(KEY, &unknown, &EntityCollection::default(), at(12, 0, 0)).is_none());
    }

    #[test]
    fn test_still_url_token_has_minute_resolution() {
        let card = camera();

        assert_eq!(still_url(&card, at(12, 3, 0)), "http://cam.local/still.jpg?1203");
        assert_eq!(still_url(&card, at(12, 3, 45)), still_url(&card, at(12, 3, 0)));
        assert_eq!(still_url(&card, at(12, 4, 1)), "http://cam.local/still.jpg?1204");
        assert_eq!(still_url(&card, at(7, 5, 0)), "http://cam.local/still.jpg?0705");
    }

    #[test]
    fn test_still_url_appends_to_existing_query() {
        let card = CardSpec::Camera {
            name: "Door".to_string(),
            url: String::new(),
            still_url: "http://cam.local/snap?channel=1".to_string(),
            icon: None,
        };

        assert_eq!(still_url(&card, at(23, 59, 0)), "http://cam.local/snap?channel=1&2359");
    }

    #[test]
    fn test_camera_card_recomputes_still_url_each_pass() {
        let first = resolve(KEY, &camera(), &EntityCollection::default(), at(12, 3, 0)).unwrap();
        let later = resolve(KEY, &camera(), &EntityCollection::default(), at(12, 4, 1)).unwrap();

        assert_eq!(first.kind, CardKind::Camera);
        assert!(first.interactable);
        assert_ne!(first.still_url, later.still_url);
    }
}
