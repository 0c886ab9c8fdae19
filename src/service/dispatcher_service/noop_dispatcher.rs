use super::{DispatchOutcome, Error, NotificationDispatcher};
use axum::async_trait;
use time::OffsetDateTime;

pub struct NoopDispatcher;

#[async_trait]
impl NotificationDispatcher for NoopDispatcher {
    async fn send(
        &self,
        _to_address: &str,
        _title: &str,
        _publish_at: OffsetDateTime,
    ) -> Result<DispatchOutcome, Error> {
        tracing::debug!("notifications not configured, skipping");
        Ok(DispatchOutcome::Skipped)
    }
}
