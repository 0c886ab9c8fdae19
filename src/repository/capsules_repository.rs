use super::{dto::Capsule, error::Error};
use axum::async_trait;
use time::OffsetDateTime;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CapsulesRepository: Send + Sync {
    ///
    /// Inserts new capsule. Capsule is visible to every query issued after this returns.
    ///
    /// ### Errors
    /// - [Error::InsertUniqueViolation] when capsule with the same id already exists
    ///
    async fn insert(&self, capsule: &Capsule) -> Result<(), Error>;

    ///
    /// Finds capsules with publish_at <= now.
    /// Capsules are sorted ascending by publish_at.
    ///
    async fn find_many_public(&self, now: OffsetDateTime) -> Result<Vec<Capsule>, Error>;

    ///
    /// Finds capsules that are public, were not notified yet and have an email.
    /// Order is unspecified.
    ///
    async fn find_many_due_for_notification(
        &self,
        now: OffsetDateTime,
    ) -> Result<Vec<Capsule>, Error>;

    ///
    /// Sets notified = true, as long as the capsule was not modified since it was read.
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when
    ///     - capsule does not exist
    ///     - capsule version changed since it was read
    ///     - capsule is already notified
    ///
    async fn update_notified(&self, capsule: &Capsule) -> Result<(), Error>;
}
