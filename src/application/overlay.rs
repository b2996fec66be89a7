// Overlay manager - three independent optional slots
use crate::domain::card::CameraView;
use crate::domain::entity::Entity;
use crate::domain::ui_state::OverlayState;

#[derive(Debug, Default)]
pub struct OverlayManager {
    state: OverlayState,
}

impl OverlayManager {
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn open_camera(&mut self, view: CameraView) {
        tracing::debug!("Camera overlay opened: {}", view.name);
        self.state.camera = Some(view);
    }

    pub fn close_camera(&mut self) {
        self.state.camera = None;
    }

    pub fn open_more_info(&mut self, entity: Entity) {
        tracing::debug!("More-info overlay opened: {}", entity.entity_id);
        self.state.more_info = Some(entity);
    }

    pub fn close_more_info(&mut self) {
        self.state.more_info = None;
    }

    pub fn toggle_radio(&mut self) {
        self.state.radio_shown = !self.state.radio_shown;
    }

    pub fn show_radio(&mut self) {
        self.state.radio_shown = true;
    }

    pub fn hide_radio(&mut self) {
        self.state.radio_shown = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(name: &str) -> CameraView {
        CameraView {
            name: name.to_string(),
            still_url: format!("http://cam.local/{name}.jpg?1200"),
            url: format!("http://cam.local/{name}"),
        }
    }

    #[test]
    fn test_slots_are_independent() {
        let mut overlays = OverlayManager::default();
        overlays.show_radio();
        overlays.open_more_info(Entity::new("light.kitchen", "on"));
        overlays.open_camera(view("door"));

        assert!(overlays.state().radio_shown);
        assert!(overlays.state().more_info.is_some());

        overlays.close_camera();
        assert!(overlays.state().more_info.is_some());
        assert!(overlays.state().radio_shown);

        overlays.hide_radio();
        assert!(overlays.state().more_info.is_some());

        overlays.open_camera(view("garage"));
        overlays.close_more_info();
        assert_eq!(overlays.state().camera, Some(view("garage")));
    }

    #[test]
    fn test_single_slot_replaces_previous_target() {
        let mut overlays = OverlayManager::default();
        overlays.open_camera(view("door"));
        overlays.open_camera(view("garage"));

        assert_eq!(overlays.state().camera.as_ref().map(|c| c.name.as_str()), Some("garage"));
    }

    #[test]
    fn test_radio_toggle() {
        let mut overlays = OverlayManager::default();
        overlays.toggle_radio();
        assert!(overlays.state().radio_shown);
        overlays.toggle_radio();
        assert!(!overlays.state().radio_shown);
    }
}
