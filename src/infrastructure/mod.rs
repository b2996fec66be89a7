// Infrastructure layer - External dependencies and adapters
pub mod command_dispatcher;
pub mod config;
pub mod hass_repository;
pub mod session;
