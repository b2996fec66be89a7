// UI state records exposed read-only to the presentation layer
use super::card::CameraView;
use super::entity::Entity;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisibilityState {
    pub moved: bool,
    pub hovered: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverlayState {
    pub camera: Option<CameraView>,
    pub more_info: Option<Entity>,
    pub radio_shown: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UiSnapshot {
    pub visibility: VisibilityState,
    pub overlay: OverlayState,
    pub hold_pending: bool,
}
