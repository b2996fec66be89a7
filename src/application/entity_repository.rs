// Repository trait for entity state transport
use crate::domain::card::ServiceCommand;
use crate::domain::entity::Entity;
use async_trait::async_trait;

#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Fetch the full current entity collection
    async fn fetch_entities(&self) -> anyhow::Result<Vec<Entity>>;

    /// Invoke a domain service (`turn_on` / `turn_off`) for one entity
    async fn call_service(&self, command: &ServiceCommand) -> anyhow::Result<()>;
}
