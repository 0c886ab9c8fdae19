use crate::repository::{Capsule, CapsuleContent, CapsuleType};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

///
/// Capsule as visible to everyone, without owner's email and notification state
///
#[derive(Debug, Serialize)]
pub struct PublicCapsule {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub capsule_type: CapsuleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub publish_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Capsule> for PublicCapsule {
    fn from(value: Capsule) -> Self {
        let capsule_type = value.capsule_type();
        let (text_content, media_url) = match value.content {
            CapsuleContent::Text(text) => (Some(text), None),
            CapsuleContent::Image { url } | CapsuleContent::Audio { url } => (None, Some(url)),
        };

        Self {
            id: value.id,
            title: value.title,
            capsule_type,
            text_content,
            media_url,
            publish_at: value.publish_at,
            created_at: value.created_at,
        }
    }
}
