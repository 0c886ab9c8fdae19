use crate::repository::CapsuleType;
use bson::{DateTime, Uuid};
use serde::Serialize;

#[derive(Serialize)]
pub struct CapsuleInsertEntity<'a> {
    pub _id: Uuid,
    pub title: &'a str,
    #[serde(rename = "type")]
    pub capsule_type: CapsuleType,
    pub text_content: Option<&'a str>,
    pub media_url: Option<&'a str>,

    /// Microseconds since the Unix epoch
    pub publish_at: i64,
    pub created_at: DateTime,

    pub email: Option<&'a str>,
    pub notified: bool,
    pub version: i64,
}
