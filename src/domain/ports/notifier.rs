use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Delivers a rendered report to a chat endpoint.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    /// False when credentials are missing. Delivery is skipped, not attempted.
    fn is_configured(&self) -> bool;

    async fn send(&self, text: &str) -> Result<(), DomainError>;
}
