use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CreatedCapsule {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub publish_at: OffsetDateTime,
}
