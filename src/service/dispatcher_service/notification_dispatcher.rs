use super::{DispatchOutcome, Error};
use axum::async_trait;
use time::OffsetDateTime;

///
/// Sends "your capsule is public" message to the capsule owner
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    ///
    /// ### Returns
    /// - [DispatchOutcome::Sent] when message was accepted by the channel
    /// - [DispatchOutcome::Skipped] when channel is not configured
    ///
    async fn send(
        &self,
        to_address: &str,
        title: &str,
        publish_at: OffsetDateTime,
    ) -> Result<DispatchOutcome, Error>;
}
