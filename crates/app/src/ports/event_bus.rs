//! Event bus port: publish/subscribe for home events.

use std::future::Future;

use homecontrol_domain::error::HomeControlError;
use homecontrol_domain::event::HomeEvent;

/// Publishes home events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: HomeEvent)
    -> impl Future<Output = Result<(), HomeControlError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: HomeEvent,
    ) -> impl Future<Output = Result<(), HomeControlError>> + Send {
        (**self).publish(event)
    }
}
