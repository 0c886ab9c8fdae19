use super::{
    entity::{to_unix_micros, CapsuleFindEntity, CapsuleInsertEntity},
    init_guard::InitGuard,
    Capsule, CapsulesRepository, Error,
};
use axum::async_trait;
use bson::{doc, Bson, DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::{
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use time::OffsetDateTime;

const CAPSULES: &str = "capsules";
const INDEX_NAME_PUBLISH_AT: &str = "index_publish_at";
const INDEX_NAME_NOTIFIED_PUBLISH_AT: &str = "index_notified_publish_at";

pub struct CapsulesRepositoryImpl {
    database: Database,
    init_guard: InitGuard,
}

impl CapsulesRepositoryImpl {
    ///
    /// Does not touch the database,
    /// collection and indexes are created by the first operation
    ///
    pub fn new(database: Database) -> Self {
        Self {
            database,
            init_guard: InitGuard::new(),
        }
    }

    async fn collection<T: Send + Sync>(&self) -> Result<Collection<T>, Error> {
        self.init_guard
            .get_or_init(|| Self::create_collection(&self.database))
            .await?;

        Ok(self.database.collection::<T>(CAPSULES))
    }

    async fn create_collection(database: &Database) -> Result<(), mongodb::error::Error> {
        let collection_names = database.list_collection_names().await?;
        if !collection_names.iter().any(|name| name == CAPSULES) {
            tracing::debug!(collection = CAPSULES, "creating collection");
            match database.create_collection(CAPSULES).await {
                Ok(()) => {}
                // another process created it in the meantime
                Err(err) if Self::is_namespace_exists(&err) => {}
                Err(err) => return Err(err),
            }
        }

        let collection = database.collection::<Document>(CAPSULES);

        tracing::debug!("fetching index names");
        let index_names = collection.list_index_names().await?;

        if !index_names.contains(&INDEX_NAME_PUBLISH_AT.to_string()) {
            Self::create_index(
                &collection,
                INDEX_NAME_PUBLISH_AT,
                doc! {
                    "publish_at": 1,
                },
            )
            .await?;
        }
        if !index_names.contains(&INDEX_NAME_NOTIFIED_PUBLISH_AT.to_string()) {
            Self::create_index(
                &collection,
                INDEX_NAME_NOTIFIED_PUBLISH_AT,
                doc! {
                    "notified": 1,
                    "publish_at": 1,
                },
            )
            .await?;
        }

        tracing::info!(collection = CAPSULES, "collection initialized");

        Ok(())
    }

    async fn create_index(
        collection: &Collection<Document>,
        name: &'static str,
        keys: Document,
    ) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().name(name.to_string()).build())
            .build();

        collection.create_index(index).await?;
        tracing::debug!(collection = CAPSULES, index = name, "created index");

        Ok(())
    }

    fn is_namespace_exists(err: &mongodb::error::Error) -> bool {
        const NAMESPACE_EXISTS_CODE: i32 = 48;
        matches!(
            *err.kind,
            ErrorKind::Command(ref command_error) if command_error.code == NAMESPACE_EXISTS_CODE
        )
    }

    fn into_capsules(entities: Vec<CapsuleFindEntity>) -> Vec<Capsule> {
        entities
            .into_iter()
            .filter_map(|entity| {
                let id = uuid::Uuid::from(entity._id);
                match Capsule::try_from(entity) {
                    Ok(capsule) => Some(capsule),
                    Err(reason) => {
                        tracing::warn!(%id, reason, "skipping invalid capsule document");
                        None
                    }
                }
            })
            .collect()
    }
}

#[async_trait]
impl CapsulesRepository for CapsulesRepositoryImpl {
    async fn insert(&self, capsule: &Capsule) -> Result<(), Error> {
        let insert_entity = CapsuleInsertEntity {
            _id: capsule.id.into(),
            title: &capsule.title,
            capsule_type: capsule.capsule_type(),
            text_content: capsule.content.text_content(),
            media_url: capsule.content.media_url(),
            publish_at: to_unix_micros(capsule.publish_at),
            created_at: DateTime::from(capsule.created_at),
            email: capsule.email.as_deref(),
            notified: capsule.notified,
            version: capsule.version,
        };

        self.collection::<CapsuleInsertEntity>()
            .await?
            .insert_one(insert_entity)
            .await
            .map_err(|err| {
                let ErrorKind::Write(ref write_failure) = *err.kind else {
                    return Error::Mongo(err);
                };

                let WriteFailure::WriteError(write_error) = write_failure else {
                    return Error::Mongo(err);
                };

                const DUPLICATE_KEY_CODE: i32 = 11000;
                match write_error.code == DUPLICATE_KEY_CODE {
                    true => Error::InsertUniqueViolation,
                    false => Error::Mongo(err),
                }
            })?;

        Ok(())
    }

    async fn find_many_public(&self, now: OffsetDateTime) -> Result<Vec<Capsule>, Error> {
        let entities = self
            .collection::<CapsuleFindEntity>()
            .await?
            .find(doc! {
                "publish_at": { "$lte": to_unix_micros(now) },
            })
            .sort(doc! {
                "publish_at": 1,
                "_id": 1,
            })
            .await?
            .try_collect::<Vec<_>>()
            .await?;

        Ok(Self::into_capsules(entities))
    }

    async fn find_many_due_for_notification(
        &self,
        now: OffsetDateTime,
    ) -> Result<Vec<Capsule>, Error> {
        let entities = self
            .collection::<CapsuleFindEntity>()
            .await?
            .find(doc! {
                "notified": false,
                "email": { "$nin": [Bson::Null, ""] },
                "publish_at": { "$lte": to_unix_micros(now) },
            })
            .await?
            .try_collect::<Vec<_>>()
            .await?;

        Ok(Self::into_capsules(entities))
    }

    async fn update_notified(&self, capsule: &Capsule) -> Result<(), Error> {
        let update_result = self
            .collection::<Document>()
            .await?
            .update_one(
                doc! {
                    "_id": bson::Uuid::from(capsule.id),
                    "version": capsule.version,
                    "notified": false,
                },
                doc! {
                    "$set": {
                        "notified": true,
                    },
                    "$inc": {
                        "version": 1_i64,
                    },
                },
            )
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }
}
