// Home Assistant REST repository implementation
use crate::application::entity_repository::EntityRepository;
use crate::domain::card::ServiceCommand;
use crate::domain::entity::Entity;
use crate::infrastructure::session::InMemorySession;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HassError {
    #[error("Not authenticated: no access token in session")]
    NotAuthenticated,

    #[error("Home Assistant request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Home Assistant transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct ServiceData<'a> {
    entity_id: &'a str,
}

#[derive(Debug, Clone)]
pub struct HassRepository {
    base_url: String,
    session: Arc<InMemorySession>,
    client: reqwest::Client,
}

impl HassRepository {
    pub fn new(base_url: String, session: Arc<InMemorySession>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            client: reqwest::Client::new(),
        }
    }

    fn states_url(&self) -> String {
        format!("{}/api/states", self.base_url)
    }

    fn service_url(&self, command: &ServiceCommand) -> String {
        format!(
            "{}/api/services/{}/{}",
            self.base_url,
            command.domain,
            command.service()
        )
    }

    fn bearer(&self) -> std::result::Result<String, HassError> {
        self.session
            .token()
            .map(|token| format!("Bearer {}", token))
            .ok_or(HassError::NotAuthenticated)
    }

    async fn check(response: reqwest::Response) -> std::result::Result<reqwest::Response, HassError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(HassError::Status { status, body })
    }
}

#[async_trait]
impl EntityRepository for HassRepository {
    async fn fetch_entities(&self) -> Result<Vec<Entity>> {
        let response = self
            .client
            .get(self.states_url())
            .header("Authorization", self.bearer()?)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(HassError::from)
            .context("Failed to send request to Home Assistant")?;

        let entities = Self::check(response)
            .await?
            .json::<Vec<Entity>>()
            .await
            .context("Failed to parse Home Assistant states")?;

        tracing::debug!("Fetched {} entities from {}", entities.len(), self.base_url);
        Ok(entities)
    }

    async fn call_service(&self, command: &ServiceCommand) -> Result<()> {
        let url = self.service_url(command);
        tracing::debug!("Calling {} for {}", url, command.entity_id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer()?)
            .json(&ServiceData {
                entity_id: &command.entity_id,
            })
            .send()
            .await
            .map_err(HassError::from)
            .with_context(|| format!("Failed to call {}", url))?;

        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository(token: &str) -> HassRepository {
        HassRepository::new(
            "http://hass.local:8123/".to_string(),
            Arc::new(InMemorySession::new(token.to_string())),
        )
    }

    #[test]
    fn test_urls() {
        let repo = repository("abc");

        assert_eq!(repo.states_url(), "http://hass.local:8123/api/states");
        assert_eq!(
            repo.service_url(&ServiceCommand::new("light", false, "light.kitchen")),
            "http://hass.local:8123/api/services/light/turn_off"
        );
        assert_eq!(
            repo.service_url(&ServiceCommand::new("scene", true, "scene.movie")),
            "http://hass.local:8123/api/services/scene/turn_on"
        );
    }

    #[test]
    fn test_bearer_requires_session() {
        assert_eq!(repository("abc").bearer().unwrap(), "Bearer abc");
        assert!(matches!(repository("").bearer(), Err(HassError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_logged_out_requests_fail_without_network() {
        let repo = repository("");
        let err = repo.fetch_entities().await.unwrap_err();

        assert!(matches!(err.downcast_ref::<HassError>(), Some(HassError::NotAuthenticated)));
    }

    #[test]
    fn test_service_body() {
        let body = serde_json::to_value(ServiceData {
            entity_id: "switch.fan",
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"entity_id": "switch.fan"}));
    }
}
