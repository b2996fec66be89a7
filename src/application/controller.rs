// Dashboard controller - composes resolution, input disambiguation and overlays
use crate::application::card_resolver::{resolve, still_url};
use crate::application::collaborators::{CommandDispatcher, SessionStore};
use crate::application::error::Result;
use crate::application::overlay::OverlayManager;
use crate::application::press::{DEFAULT_HOLD_THRESHOLD, PressDisambiguator};
use crate::application::visibility::{DEFAULT_IDLE_HIDE, VisibilityMachine};
use crate::domain::card::{CameraView, GroupLayout, ServiceCommand, activation_command};
use crate::domain::entity::{Entity, EntityCollection};
use crate::domain::layout::{CardKey, CardSpec, DashboardConfig};
use crate::domain::ui_state::{OverlayState, UiSnapshot, VisibilityState};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub hold: Duration,
    pub idle_hide: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            hold: DEFAULT_HOLD_THRESHOLD,
            idle_hide: DEFAULT_IDLE_HIDE,
        }
    }
}

/// What an activation (click / tap) on a card led to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Activation {
    Dispatched { command: ServiceCommand },
    Navigate { url: String },
    CameraOpened { camera: CameraView },
    Ignored,
}

pub struct DashboardController {
    config: DashboardConfig,
    entities: EntityCollection,
    timings: Timings,
    press: PressDisambiguator,
    visibility: VisibilityMachine,
    overlays: OverlayManager,
    dispatcher: Arc<dyn CommandDispatcher>,
    session: Arc<dyn SessionStore>,
}

impl DashboardController {
    pub fn new(
        config: DashboardConfig,
        timings: Timings,
        dispatcher: Arc<dyn CommandDispatcher>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            entities: EntityCollection::default(),
            timings,
            press: PressDisambiguator::new(timings.hold),
            visibility: VisibilityMachine::new(timings.idle_hide),
            overlays: OverlayManager::default(),
            dispatcher,
            session,
        }
    }

    pub fn replace_entities(&mut self, entities: EntityCollection) {
        self.entities = entities;
    }

    /// Recompute every group's cards from the current configuration and entities.
    pub fn render_layout(&self, now: NaiveDateTime) -> Vec<GroupLayout> {
        self.config
            .items
            .iter()
            .enumerate()
            .map(|(group_idx, group)| GroupLayout {
                name: group.name.clone(),
                cards: group
                    .cards
                    .iter()
                    .enumerate()
                    .filter_map(|(card_idx, card)| {
                        resolve(CardKey::new(group_idx, card_idx), card, &self.entities, now)
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn visibility_state(&self) -> VisibilityState {
        self.visibility.state()
    }

    /// Overlay slots, with the more-info target re-bound to its live entity.
    pub fn overlay_state(&self) -> OverlayState {
        let mut state = self.overlays.state().clone();
        if let Some(snapshot) = state.more_info.take() {
            let live = self
                .entities
                .find(&snapshot.entity_id)
                .cloned()
                .unwrap_or(snapshot);
            state.more_info = Some(live);
        }
        state
    }

    pub fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            visibility: self.visibility_state(),
            overlay: self.overlay_state(),
            hold_pending: self.press.pending().is_some(),
        }
    }

    fn card(&self, key: CardKey) -> Result<&CardSpec> {
        self.config.card(key).ok_or_else(|| key.into())
    }

    fn interactable_entity(&self, card: &CardSpec) -> Option<&Entity> {
        let CardSpec::Hass { entity_id, .. } = card else {
            return None;
        };
        self.entities
            .find(entity_id)
            .filter(|entity| !entity.is_unavailable() && entity.domain() != "sensor")
    }

    /// Returns true when a hold timer was armed for this press.
    pub fn on_card_pointer_down(&mut self, key: CardKey, now: Instant) -> Result<bool> {
        let card = self.card(key)?;
        let Some(entity) = self.interactable_entity(card).cloned() else {
            return Ok(false);
        };
        Ok(self.press.press(key, &entity, now))
    }

    pub fn on_card_pointer_up(&mut self) {
        self.press.release();
    }

    pub fn on_card_pointer_cancel(&mut self) {
        self.press.release();
    }

    /// Native click / activation. Independent of the hold timer: a held light
    /// still toggles here when the platform delivers its click.
    pub fn on_card_activate(&mut self, key: CardKey, now: NaiveDateTime) -> Result<Activation> {
        let card = self.card(key)?.clone();
        let activation = match &card {
            CardSpec::Hass { .. } => match self
                .interactable_entity(&card)
                .and_then(activation_command)
            {
                Some(command) => {
                    tracing::info!(
                        "Dispatching {} {} for {}",
                        command.domain,
                        command.service(),
                        command.entity_id
                    );
                    self.dispatcher.dispatch(command.clone());
                    Activation::Dispatched { command }
                }
                None => Activation::Ignored,
            },
            CardSpec::Link { url, .. } => Activation::Navigate { url: url.clone() },
            CardSpec::Camera { name, url, .. } => {
                let camera = CameraView {
                    name: name.clone(),
                    still_url: still_url(&card, now),
                    url: url.clone(),
                };
                self.overlays.open_camera(camera.clone());
                Activation::CameraOpened { camera }
            }
            CardSpec::Unknown { .. } => Activation::Ignored,
        };
        Ok(activation)
    }

    pub fn on_surface_pointer_moved(&mut self, now: Instant) {
        self.visibility.pointer_moved(now);
    }

    pub fn on_chrome_enter(&mut self) {
        self.visibility.pointer_entered_chrome();
    }

    pub fn on_chrome_leave(&mut self, now: Instant) {
        self.visibility.pointer_left_chrome(now);
    }

    /// Click on the dashboard background outside any card dismisses the radio panel.
    pub fn on_background_click(&mut self) {
        self.overlays.hide_radio();
    }

    pub fn close_camera(&mut self) {
        self.overlays.close_camera();
    }

    pub fn close_more_info(&mut self) {
        self.overlays.close_more_info();
    }

    pub fn toggle_radio(&mut self) {
        self.overlays.toggle_radio();
    }

    pub fn show_radio(&mut self) {
        self.overlays.show_radio();
    }

    pub fn hide_radio(&mut self) {
        self.overlays.hide_radio();
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.press.deadline(), self.visibility.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire due timers. Returns true when any UI state changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(entity) = self.press.advance(now) {
            self.overlays.open_more_info(entity);
            changed = true;
        }
        if self.visibility.advance(now) {
            changed = true;
        }
        changed
    }

    /// Clears credentials and drops all session-lifetime UI state.
    pub fn log_out(&mut self) {
        tracing::info!("Logging out");
        self.session.clear_credentials();
        self.press = PressDisambiguator::new(self.timings.hold);
        self.visibility = VisibilityMachine::new(self.timings.idle_hide);
        self.overlays = OverlayManager::default();
    }
}
