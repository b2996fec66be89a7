// Channel-backed command dispatcher and the worker that drains it
use crate::application::collaborators::CommandDispatcher;
use crate::application::entity_repository::EntityRepository;
use crate::domain::card::ServiceCommand;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    tx: mpsc::UnboundedSender<ServiceCommand>,
}

impl ChannelDispatcher {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ServiceCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl CommandDispatcher for ChannelDispatcher {
    fn dispatch(&self, command: ServiceCommand) {
        if self.tx.send(command).is_err() {
            tracing::warn!("Command worker is gone; dropping command");
        }
    }
}

/// Forward queued commands to the repository one at a time until every sender is dropped.
pub async fn run_command_worker(
    mut rx: mpsc::UnboundedReceiver<ServiceCommand>,
    repository: Arc<dyn EntityRepository>,
) {
    while let Some(command) = rx.recv().await {
        if let Err(e) = repository.call_service(&command).await {
            tracing::warn!(
                "Service call {}.{} for {} failed: {:#}",
                command.domain,
                command.service(),
                command.entity_id,
                e
            );
        }
    }
    tracing::info!("Command worker stopped");
}
