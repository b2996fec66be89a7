// Outbound collaborators the controller drives synchronously
use crate::domain::card::ServiceCommand;

/// Fire-and-forget command sink.
pub trait CommandDispatcher: Send + Sync {
    fn dispatch(&self, command: ServiceCommand);
}

pub trait SessionStore: Send + Sync {
    fn clear_credentials(&self);
}
