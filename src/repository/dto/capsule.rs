use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CapsuleType {
    Text,
    Image,
    Audio,
}

///
/// Payload of a capsule. Text capsules carry their content inline,
/// media capsules point into the media store.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapsuleContent {
    Text(String),
    Image { url: String },
    Audio { url: String },
}

impl CapsuleContent {
    pub fn capsule_type(&self) -> CapsuleType {
        match self {
            CapsuleContent::Text(_) => CapsuleType::Text,
            CapsuleContent::Image { .. } => CapsuleType::Image,
            CapsuleContent::Audio { .. } => CapsuleType::Audio,
        }
    }

    pub fn text_content(&self) -> Option<&str> {
        match self {
            CapsuleContent::Text(text) => Some(text),
            CapsuleContent::Image { .. } | CapsuleContent::Audio { .. } => None,
        }
    }

    pub fn media_url(&self) -> Option<&str> {
        match self {
            CapsuleContent::Text(_) => None,
            CapsuleContent::Image { url } | CapsuleContent::Audio { url } => Some(url),
        }
    }

    ///
    /// Rebuilds content from its stored columns.
    /// Returns None when the columns do not match the type.
    ///
    pub fn from_parts(
        capsule_type: CapsuleType,
        text_content: Option<String>,
        media_url: Option<String>,
    ) -> Option<Self> {
        match (capsule_type, text_content, media_url) {
            (CapsuleType::Text, Some(text), None) => Some(CapsuleContent::Text(text)),
            (CapsuleType::Image, None, Some(url)) => Some(CapsuleContent::Image { url }),
            (CapsuleType::Audio, None, Some(url)) => Some(CapsuleContent::Audio { url }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capsule {
    pub id: Uuid,
    pub title: String,
    pub content: CapsuleContent,
    pub publish_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub email: Option<String>,
    pub notified: bool,

    /// Optimistic concurrency token, changes on every update
    pub version: i64,
}

impl Capsule {
    pub fn capsule_type(&self) -> CapsuleType {
        self.content.capsule_type()
    }

    pub fn notification_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }

    #[cfg(test)]
    pub fn is_public_at(&self, now: OffsetDateTime) -> bool {
        self.publish_at <= now
    }

    #[cfg(test)]
    pub fn is_due_for_notification_at(&self, now: OffsetDateTime) -> bool {
        !self.notified && self.notification_email().is_some() && self.is_public_at(now)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    use time::{macros::datetime, Duration};

    fn create_capsule(publish_at: OffsetDateTime, email: Option<&str>) -> Capsule {
        Capsule {
            id: Uuid::new_v4(),
            title: "Note to self".to_string(),
            content: CapsuleContent::Text("Hi future me".to_string()),
            publish_at,
            created_at: datetime!(2024-01-01 00:00:00 UTC),
            email: email.map(str::to_string),
            notified: false,
            version: 0,
        }
    }

    #[test]
    fn capsule_type_parse_case_insensitive() {
        assert_eq!(CapsuleType::from_str("Text").unwrap(), CapsuleType::Text);
        assert_eq!(CapsuleType::from_str("IMAGE").unwrap(), CapsuleType::Image);
        assert_eq!(CapsuleType::from_str("audio").unwrap(), CapsuleType::Audio);
        assert!(CapsuleType::from_str("video").is_err());
    }

    #[test]
    fn capsule_type_as_ref_lowercase() {
        assert_eq!(CapsuleType::Image.as_ref(), "image");
        assert_eq!(CapsuleType::Audio.to_string(), "audio");
    }

    #[test]
    fn content_from_parts_matching_columns() {
        let text = CapsuleContent::from_parts(CapsuleType::Text, Some("hello".to_string()), None);
        let image = CapsuleContent::from_parts(
            CapsuleType::Image,
            None,
            Some("http://localhost/media/image/1.png".to_string()),
        );

        assert_eq!(text, Some(CapsuleContent::Text("hello".to_string())));
        assert_eq!(
            image.as_ref().and_then(CapsuleContent::media_url),
            Some("http://localhost/media/image/1.png")
        );
    }

    #[test]
    fn content_from_parts_mismatched_columns() {
        let text_with_media = CapsuleContent::from_parts(
            CapsuleType::Text,
            Some("hello".to_string()),
            Some("url".to_string()),
        );
        let audio_without_media = CapsuleContent::from_parts(CapsuleType::Audio, None, None);
        let audio_with_text =
            CapsuleContent::from_parts(CapsuleType::Audio, Some("hello".to_string()), None);

        assert!(text_with_media.is_none());
        assert!(audio_without_media.is_none());
        assert!(audio_with_text.is_none());
    }

    #[test]
    fn is_public_at_inclusive_boundary() {
        let now = datetime!(2024-05-01 12:00:00.0005 UTC);

        let exactly_now = create_capsule(now, None);
        let microsecond_before = create_capsule(now - Duration::microseconds(1), None);
        let microsecond_after = create_capsule(now + Duration::microseconds(1), None);

        assert!(exactly_now.is_public_at(now));
        assert!(microsecond_before.is_public_at(now));
        assert!(!microsecond_after.is_public_at(now));
    }

    #[test]
    fn is_due_for_notification_requires_email() {
        let now = datetime!(2024-05-01 12:00:00 UTC);

        let without_email = create_capsule(now - Duration::seconds(1), None);
        let empty_email = create_capsule(now - Duration::seconds(1), Some(""));
        let with_email = create_capsule(now - Duration::seconds(1), Some("a@b.com"));

        assert!(!without_email.is_due_for_notification_at(now));
        assert!(!empty_email.is_due_for_notification_at(now));
        assert!(with_email.is_due_for_notification_at(now));
    }

    #[test]
    fn is_due_for_notification_not_before_publish_at() {
        let now = datetime!(2024-05-01 12:00:00 UTC);

        let capsule = create_capsule(now + Duration::seconds(1), Some("a@b.com"));

        assert!(!capsule.is_due_for_notification_at(now));
    }

    #[test]
    fn is_due_for_notification_not_when_notified() {
        let now = datetime!(2024-05-01 12:00:00 UTC);

        let mut capsule = create_capsule(now - Duration::seconds(1), Some("a@b.com"));
        capsule.notified = true;

        assert!(!capsule.is_due_for_notification_at(now));
    }
}
