// Dashboard service - owns the controller and drives it from the async runtime
use crate::application::controller::DashboardController;
use crate::application::entity_repository::EntityRepository;
use crate::domain::card::GroupLayout;
use crate::domain::entity::EntityCollection;
use crate::domain::ui_state::UiSnapshot;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, Notify, watch};

#[derive(Clone)]
pub struct DashboardService {
    controller: Arc<Mutex<DashboardController>>,
    repository: Arc<dyn EntityRepository>,
    wake: Arc<Notify>,
    updates: watch::Sender<UiSnapshot>,
}

impl DashboardService {
    pub fn new(controller: DashboardController, repository: Arc<dyn EntityRepository>) -> Self {
        let (updates, _) = watch::channel(controller.snapshot());
        Self {
            controller: Arc::new(Mutex::new(controller)),
            repository,
            wake: Arc::new(Notify::new()),
            updates,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<UiSnapshot> {
        self.updates.subscribe()
    }

    /// Apply one input event. Publishes the resulting UI snapshot and re-arms the timer loop.
    pub async fn update<R>(&self, event: impl FnOnce(&mut DashboardController) -> R) -> R {
        let mut controller = self.controller.lock().await;
        let result = event(&mut *controller);
        self.publish(controller.snapshot());
        drop(controller);
        self.wake.notify_one();
        result
    }

    fn publish(&self, snapshot: UiSnapshot) {
        self.updates.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot;
            true
        });
    }

    pub async fn layout(&self) -> Vec<GroupLayout> {
        let now = chrono::Local::now().naive_local();
        self.controller.lock().await.render_layout(now)
    }

    pub async fn snapshot(&self) -> UiSnapshot {
        self.controller.lock().await.snapshot()
    }

    /// Fetch the entity collection once and replace the controller's copy wholesale.
    pub async fn sync_entities(&self) -> anyhow::Result<usize> {
        let states = self.repository.fetch_entities().await?;
        let count = states.len();
        self.update(|controller| controller.replace_entities(EntityCollection::from_states(states)))
            .await;
        Ok(count)
    }

    /// Poll the repository forever. A failed poll keeps the last snapshot.
    pub async fn run_entity_sync(self, every: Duration) {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match self.sync_entities().await {
                Ok(count) => tracing::debug!("Synced {} entities", count),
                Err(e) => tracing::warn!("Entity sync failed: {:#}", e),
            }
        }
    }

    /// Sleep until the controller's next deadline, woken early by any input.
    pub async fn run_timers(self) {
        loop {
            let deadline = self.controller.lock().await.next_deadline();
            match deadline {
                Some(deadline) => {
                    let at = tokio::time::Instant::from_std(deadline);
                    tokio::select! {
                        _ = tokio::time::sleep_until(at) => {
                            let fired = self.update(|controller| controller.advance(Instant::now())).await;
                            if fired {
                                tracing::trace!("Timer fired");
                            }
                        }
                        _ = self.wake.notified() => {}
                    }
                }
                None => self.wake.notified().await,
            }
        }
    }
}
