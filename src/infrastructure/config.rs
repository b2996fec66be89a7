use crate::application::controller::Timings;
use crate::domain::layout::DashboardConfig;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub home_assistant: HomeAssistantSettings,
    #[serde(default)]
    pub timings: TimingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HomeAssistantSettings {
    pub url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl HomeAssistantSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TimingSettings {
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    #[serde(default = "default_idle_hide_ms")]
    pub idle_hide_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            hold_ms: default_hold_ms(),
            idle_hide_ms: default_idle_hide_ms(),
        }
    }
}

impl From<&TimingSettings> for Timings {
    fn from(settings: &TimingSettings) -> Self {
        Timings {
            hold: Duration::from_millis(settings.hold_ms),
            idle_hide: Duration::from_millis(settings.idle_hide_ms),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_hold_ms() -> u64 {
    1000
}

fn default_idle_hide_ms() -> u64 {
    10_000
}

/// e.g. HASS_HOME_ASSISTANT__TOKEN overrides [home_assistant] token
fn environment_overrides() -> config::Environment {
    config::Environment::with_prefix("HASS")
        .prefix_separator("_")
        .separator("__")
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .add_source(environment_overrides())
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
