// Application layer - dashboard engine, services and ports
pub mod card_resolver;
pub mod collaborators;
pub mod controller;
pub mod dashboard_service;
pub mod entity_repository;
pub mod error;
pub mod overlay;
pub mod press;
pub mod timer;
pub mod visibility;
