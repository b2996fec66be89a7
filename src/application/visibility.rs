// Visibility state machine for the auto-hiding header
use crate::application::timer::OneShotTimer;
use crate::domain::ui_state::VisibilityState;
use std::time::{Duration, Instant};

pub const DEFAULT_IDLE_HIDE: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityPhase {
    Hidden,
    ShownActive,
    ShownPinned,
}

#[derive(Debug)]
pub struct VisibilityMachine {
    idle_hide: Duration,
    state: VisibilityState,
    timer: OneShotTimer,
}

impl Default for VisibilityMachine {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_HIDE)
    }
}

impl VisibilityMachine {
    pub fn new(idle_hide: Duration) -> Self {
        Self {
            idle_hide,
            state: VisibilityState::default(),
            timer: OneShotTimer::default(),
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn phase(&self) -> VisibilityPhase {
        if self.state.hovered {
            VisibilityPhase::ShownPinned
        } else if self.state.moved {
            VisibilityPhase::ShownActive
        } else {
            VisibilityPhase::Hidden
        }
    }

    /// Movement anywhere on the surface restarts the inactivity window.
    pub fn pointer_moved(&mut self, now: Instant) {
        if self.state.hovered {
            return;
        }
        if self.phase() == VisibilityPhase::Hidden {
            tracing::debug!("Chrome shown");
        }
        self.state.moved = true;
        self.timer.schedule(now, self.idle_hide);
    }

    /// While the pointer rests on the chrome there is no hide timer at all.
    pub fn pointer_entered_chrome(&mut self) {
        self.state.hovered = true;
        self.timer.cancel();
    }

    pub fn pointer_left_chrome(&mut self, now: Instant) {
        self.state.hovered = false;
        if self.state.moved {
            self.timer.schedule(now, self.idle_hide);
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Returns true when the chrome was hidden by this call.
    pub fn advance(&mut self, now: Instant) -> bool {
        if !self.timer.fire_if_due(now) || self.state.hovered {
            return false;
        }
        tracing::debug!("Chrome hidden after inactivity");
        self.state.moved = false;
        true
    }
}
