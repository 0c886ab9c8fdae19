use super::{Capsule, CapsulesRepository, Error};
use axum::async_trait;
use std::collections::HashMap;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

///
/// Repository keeping capsules in a map, with the same version check
/// on update_notified as the mongo implementation
///
pub struct InMemoryCapsulesRepository {
    capsules: Mutex<HashMap<Uuid, Capsule>>,
}

impl InMemoryCapsulesRepository {
    pub fn new() -> Self {
        Self {
            capsules: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<Capsule> {
        self.capsules.lock().await.get(&id).cloned()
    }
}

#[async_trait]
impl CapsulesRepository for InMemoryCapsulesRepository {
    async fn insert(&self, capsule: &Capsule) -> Result<(), Error> {
        let mut capsules = self.capsules.lock().await;
        if capsules.contains_key(&capsule.id) {
            return Err(Error::InsertUniqueViolation);
        }
        capsules.insert(capsule.id, capsule.clone());

        Ok(())
    }

    async fn find_many_public(&self, now: OffsetDateTime) -> Result<Vec<Capsule>, Error> {
        let mut capsules = self
            .capsules
            .lock()
            .await
            .values()
            .filter(|capsule| capsule.is_public_at(now))
            .cloned()
            .collect::<Vec<_>>();
        capsules.sort_by_key(|capsule| (capsule.publish_at, capsule.id));

        Ok(capsules)
    }

    async fn find_many_due_for_notification(
        &self,
        now: OffsetDateTime,
    ) -> Result<Vec<Capsule>, Error> {
        let capsules = self
            .capsules
            .lock()
            .await
            .values()
            .filter(|capsule| capsule.is_due_for_notification_at(now))
            .cloned()
            .collect();

        Ok(capsules)
    }

    async fn update_notified(&self, capsule: &Capsule) -> Result<(), Error> {
        let mut capsules = self.capsules.lock().await;
        match capsules.get_mut(&capsule.id) {
            Some(stored) if stored.version == capsule.version && !stored.notified => {
                stored.notified = true;
                stored.version += 1;
                Ok(())
            }
            _ => Err(Error::NoDocumentUpdated),
        }
    }
}
