use super::unix_micros::from_unix_micros;
use crate::repository::{Capsule, CapsuleContent, CapsuleType};
use bson::{DateTime, Uuid};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CapsuleFindEntity {
    pub _id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub capsule_type: CapsuleType,
    pub text_content: Option<String>,
    pub media_url: Option<String>,
    pub publish_at: i64,
    pub created_at: DateTime,
    pub email: Option<String>,
    pub notified: bool,
    pub version: i64,
}

impl TryFrom<CapsuleFindEntity> for Capsule {
    type Error = &'static str;

    fn try_from(value: CapsuleFindEntity) -> Result<Self, Self::Error> {
        let content =
            CapsuleContent::from_parts(value.capsule_type, value.text_content, value.media_url)
                .ok_or("content does not match capsule type")?;
        let publish_at = from_unix_micros(value.publish_at).ok_or("publish_at out of range")?;

        Ok(Self {
            id: value._id.into(),
            title: value.title,
            content,
            publish_at,
            created_at: value.created_at.into(),
            email: value.email,
            notified: value.notified,
            version: value.version,
        })
    }
}
