// Errors surfaced by dashboard input handling
use crate::domain::layout::CardKey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("No card at group {group}, position {card}")]
    UnknownCard { group: usize, card: usize },
}

impl From<CardKey> for DashboardError {
    fn from(key: CardKey) -> Self {
        DashboardError::UnknownCard {
            group: key.group,
            card: key.card,
        }
    }
}
