// Domain layer - pure data, no I/O
pub mod card;
pub mod entity;
pub mod layout;
pub mod ui_state;
