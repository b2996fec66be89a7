// Press disambiguator - tells a tap from a press-and-hold
use crate::application::timer::OneShotTimer;
use crate::domain::entity::Entity;
use crate::domain::layout::CardKey;
use std::time::{Duration, Instant};

pub const DEFAULT_HOLD_THRESHOLD: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq)]
pub struct PendingHold {
    pub key: CardKey,
    pub domain: String,
    pub entity: Entity,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PressPhase {
    Idle,
    Pressed(PendingHold),
    Held(CardKey),
}

/// Only `light` cards that are currently `on` have a hold behavior.
pub fn has_hold_action(entity: &Entity) -> bool {
    entity.domain() == "light" && entity.is_on()
}

#[derive(Debug)]
pub struct PressDisambiguator {
    threshold: Duration,
    phase: PressPhase,
    timer: OneShotTimer,
}

impl Default for PressDisambiguator {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_THRESHOLD)
    }
}

impl PressDisambiguator {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            phase: PressPhase::Idle,
            timer: OneShotTimer::default(),
        }
    }

    pub fn pending(&self) -> Option<&PendingHold> {
        match &self.phase {
            PressPhase::Pressed(pending) => Some(pending),
            _ => None,
        }
    }

    /// Pointer-down / touch-start over a card. Returns true when a hold timer was started.
    ///
    /// A new press replaces any press still in flight.
    pub fn press(&mut self, key: CardKey, entity: &Entity, now: Instant) -> bool {
        self.timer.cancel();
        if !has_hold_action(entity) {
            self.phase = PressPhase::Idle;
            return false;
        }

        tracing::debug!("Hold armed for {} ({:?})", entity.entity_id, key);
        self.phase = PressPhase::Pressed(PendingHold {
            key,
            domain: entity.domain().to_string(),
            entity: entity.clone(),
        });
        self.timer.schedule(now, self.threshold);
        true
    }

    /// Pointer-up / touch-end / cancel. Ends the gesture without firing.
    pub fn release(&mut self) {
        match &self.phase {
            PressPhase::Pressed(pending) => {
                tracing::debug!("Hold released early for {}", pending.entity.entity_id)
            }
            PressPhase::Held(key) => tracing::debug!("Held press on {:?} released", key),
            PressPhase::Idle => {}
        }
        self.timer.cancel();
        self.phase = PressPhase::Idle;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Fires the hold at most once per gesture, returning the entity captured at press time.
    pub fn advance(&mut self, now: Instant) -> Option<Entity> {
        if !self.timer.fire_if_due(now) {
            return None;
        }
        match std::mem::replace(&mut self.phase, PressPhase::Idle) {
            PressPhase::Pressed(pending) => {
                tracing::debug!(
                    "Hold fired for {} ({})",
                    pending.entity.entity_id,
                    pending.domain
                );
                self.phase = PressPhase::Held(pending.key);
                Some(pending.entity)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: CardKey = CardKey { group: 0, card: 1 };

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_hold_fires_once_after_threshold() {
        let t0 = Instant::now();
        let mut press = PressDisambiguator::default();
        let light = Entity::new("light.kitchen", "on");

        assert!(press.press(KEY, &light, t0));
        assert!(press.advance(t0 + ms(999)).is_none());
        assert_eq!(press.advance(t0 + ms(1000)), Some(light));
        assert_eq!(&press.phase, &PressPhase::Held(KEY));
        assert!(press.advance(t0 + ms(1200)).is_none());

        press.release();
        assert_eq!(&press.phase, &PressPhase::Idle);
    }

    #[test]
    fn test_release_before_threshold_never_fires() {
        let t0 = Instant::now();
        let mut press = PressDisambiguator::default();

        press.press(KEY, &Entity::new("light.kitchen", "on"), t0);
        press.release();

        assert!(press.pending().is_none());
        assert!(press.deadline().is_none());
        assert!(press.advance(t0 + ms(5000)).is_none());
    }

    #[test]
    fn test_only_lights_that_are_on_arm_a_hold() {
        let t0 = Instant::now();
        let mut press = PressDisambiguator::default();

        assert!(!press.press(KEY, &Entity::new("light.kitchen", "off"), t0));
        assert!(!press.press(KEY, &Entity::new("switch.fan", "on"), t0));
        assert!(!press.press(KEY, &Entity::new("scene.movie", "on"), t0));
        assert!(press.advance(t0 + ms(2000)).is_none());
    }

    #[test]
    fn test_new_press_replaces_pending_one() {
        let t0 = Instant::now();
        let mut press = PressDisambiguator::default();
        let other = CardKey::new(1, 0);

        press.press(KEY, &Entity::new("light.kitchen", "on"), t0);
        press.press(other, &Entity::new("light.hall", "on"), t0 + ms(500));

        assert!(press.advance(t0 + ms(1000)).is_none());
        let fired = press.advance(t0 + ms(1500)).unwrap();
        assert_eq!(fired.entity_id, "light.hall");
    }

    #[test]
    fn test_custom_threshold() {
        let t0 = Instant::now();
        let mut press = PressDisambiguator::new(ms(300));

        press.press(KEY, &Entity::new("light.kitchen", "on"), t0);
        assert!(press.advance(t0 + ms(300)).is_some());
    }
}
