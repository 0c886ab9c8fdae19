use super::{ReleaseSweeperConfig, SweepReport};
use crate::{
    repository::{self, Capsule, CapsulesRepository},
    service::dispatcher_service::{DispatchOutcome, NotificationDispatcher},
};
use std::{sync::Arc, time::Duration};
use time::OffsetDateTime;
use tokio::{
    sync::Notify,
    time::{interval, MissedTickBehavior},
};

enum CapsuleOutcome {
    Notified,
    SkippedEmptyEmail,
    AlreadyHandled,
    Failed,
}

///
/// Periodically notifies owners of capsules that became public.
///
/// Capsule is marked as notified only after the dispatcher succeeded (or skipped),
/// failed capsules stay unnotified and are retried by the next pass.
/// Mark is guarded by the capsule version, so when several sweepers race
/// only one of them marks the capsule.
///
pub struct ReleaseSweeper {
    repository: Arc<dyn CapsulesRepository>,
    dispatcher: Arc<dyn NotificationDispatcher>,

    interval: Duration,
}

impl ReleaseSweeper {
    pub fn new(
        config: ReleaseSweeperConfig,
        repository: Arc<dyn CapsulesRepository>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            interval: config.interval,
        }
    }

    #[tracing::instrument(name = "Release Sweeper", skip_all)]
    pub async fn run(self, close_notify: Arc<Notify>) {
        let mut interval = interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::select! {
            biased;

            // Wait for signal to close
            _ = close_notify.notified() => {
                tracing::info!("release sweeper closed");
            },

            // Run infinite loop and sweep periodically
            _ = async { loop {
                interval.tick().await;

                let now = OffsetDateTime::now_utc();
                if let Err(err) = self.run_once(now).await {
                    tracing::warn!(%err, "sweep failed, retrying in next interval");
                }
            }} => {}
        }
    }

    ///
    /// Runs a single pass over capsules due for notification at `now`.
    ///
    /// ### Errors
    /// Only when capsules could not be listed,
    /// failures of a single capsule are counted in [SweepReport::failed]
    ///
    pub async fn run_once(&self, now: OffsetDateTime) -> Result<SweepReport, repository::Error> {
        tracing::debug!("sweep started");

        let capsules = self.repository.find_many_due_for_notification(now).await?;

        let mut report = SweepReport {
            due: capsules.len(),
            ..Default::default()
        };

        for capsule in capsules.iter() {
            match self.process_capsule(capsule).await {
                CapsuleOutcome::Notified => report.notified += 1,
                CapsuleOutcome::SkippedEmptyEmail => report.skipped_empty_email += 1,
                CapsuleOutcome::AlreadyHandled => report.already_handled += 1,
                CapsuleOutcome::Failed => report.failed += 1,
            }
        }

        match report.due {
            0 => tracing::debug!("sweep finished, nothing due"),
            _ => tracing::info!(
                due = report.due,
                notified = report.notified,
                already_handled = report.already_handled,
                failed = report.failed,
                "sweep finished"
            ),
        }

        Ok(report)
    }

    #[tracing::instrument(skip_all, fields(id = %capsule.id))]
    async fn process_capsule(&self, capsule: &Capsule) -> CapsuleOutcome {
        let Some(email) = capsule.notification_email() else {
            return CapsuleOutcome::SkippedEmptyEmail;
        };

        match self
            .dispatcher
            .send(email, &capsule.title, capsule.publish_at)
            .await
        {
            Ok(DispatchOutcome::Sent) => tracing::info!("notification sent"),
            Ok(DispatchOutcome::Skipped) => tracing::debug!("notification skipped"),
            Err(err) => {
                tracing::warn!(%err, "failed to send notification");
                return CapsuleOutcome::Failed;
            }
        }

        match self.repository.update_notified(capsule).await {
            Ok(()) => {
                tracing::debug!("capsule marked as notified");
                CapsuleOutcome::Notified
            }
            Err(repository::Error::NoDocumentUpdated) => {
                tracing::info!("capsule already handled by another sweeper");
                CapsuleOutcome::AlreadyHandled
            }
            Err(err) => {
                tracing::warn!(%err, "failed to mark capsule as notified");
                CapsuleOutcome::Failed
            }
        }
    }
}
