use async_trait::async_trait;
use wayfare_shared::LifecycleEvent;

/// Outbound hook for lifecycle events (confirmation mail, backoffice alerts).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        event: &LifecycleEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Notifier used when no broker is configured: records the event in the log only.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        event: &LifecycleEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!(topic = event.topic(), key = %event.key(), "Lifecycle event (not dispatched): {:?}", event);
        Ok(())
    }
}
